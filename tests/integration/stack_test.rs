use errtrail::{stack_of, Error, Frames, ResultExt};

#[inline(never)]
fn fail_innermost() -> Error {
    let err = Error::new("innermost");
    std::hint::black_box(err)
}

#[inline(never)]
fn fail_middle() -> Error {
    let err = fail_innermost();
    std::hint::black_box(err)
}

#[inline(never)]
fn fail_outer() -> Error {
    let err = fail_middle();
    std::hint::black_box(err)
}

#[inline(never)]
fn wrap_in_helper() -> errtrail::Result<()> {
    let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
    let wrapped = result.wrap("formatting");
    std::hint::black_box(wrapped)
}

fn names(frames: &Frames) -> Vec<String> {
    frames
        .iter()
        .map(|f| f.function.clone().unwrap_or_default())
        .collect()
}

#[test]
fn test_rendered_stack_round_trip() {
    let err = fail_outer().wrap("context");
    let frames = stack_of(&err).expect("stack present");
    assert!(frames.len() >= 3);

    let rendered = frames.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), frames.len());
    assert!(lines[0].ends_with("fail_innermost"), "{lines:?}");
    assert!(lines[1].ends_with("fail_middle"), "{lines:?}");
    assert!(lines[2].ends_with("fail_outer"), "{lines:?}");
    assert!(lines[0].contains("stack_test.rs:"), "{lines:?}");
}

#[test]
fn test_result_ext_stack_starts_at_call_site() {
    let err = wrap_in_helper().unwrap_err();
    let frames = stack_of(&err).expect("stack present");
    assert!(names(&frames)[0].ends_with("wrap_in_helper"), "{:?}", names(&frames));
}

#[test]
fn test_frames_resolve_to_files_and_lines() {
    let err = fail_outer();
    let frames = err.stack().expect("stack present").frames();
    let first = frames.innermost().unwrap();
    assert!(first.line.is_some());
    assert!(first
        .file
        .as_ref()
        .map(|f| f.ends_with("stack_test.rs"))
        .unwrap_or(false));
}

#[test]
fn test_stack_depth_is_capped() {
    fn recurse(n: usize) -> Error {
        if n == 0 {
            return Error::new("bottom");
        }
        std::hint::black_box(recurse(n - 1))
    }

    let err = recurse(64);
    assert!(err.stack().unwrap().len() <= errtrail::stack::DEFAULT_MAX_DEPTH);
}
