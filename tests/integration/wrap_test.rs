use std::io;

use errtrail::{join, newf, stack_of, wrap, wrapf, Error, ResultExt};

fn unsupported() -> Error {
    Error::msg("unsupported operation")
}

#[test]
fn test_wrap_message_is_context_then_cause() {
    let causes = [
        unsupported(),
        Error::new("with stack"),
        Error::from_std(io::Error::new(io::ErrorKind::Other, "io")),
        join([Some(Error::msg("a")), Some(Error::msg("b"))]).unwrap(),
    ];
    for cause in causes {
        let expected = format!("foo: {cause}");
        assert_eq!(cause.wrap("foo").to_string(), expected);
    }
}

#[test]
fn test_wrap_of_nothing_is_nothing() {
    assert!(wrap(None, "foo").is_none());
    assert!(wrapf!(None, "foo {}", 1).is_none());
    assert!(wrapf!(None, "foo"; Error::msg("extra")).is_none());
}

#[test]
fn test_wrapped_is_cause() {
    let cause = unsupported();
    let err = wrap(Some(cause.clone()), "foo").unwrap();
    assert!(err.is(&cause));
    assert_eq!(err.to_string(), "foo: unsupported operation");
}

#[test]
fn test_stack_not_captured_twice() {
    let cause = unsupported();
    let once = cause.wrap("a");
    let twice = once.clone().wrap("b");

    assert_eq!(stack_of(&twice), stack_of(&once));
    assert!(std::ptr::eq(
        twice.find_stack().unwrap(),
        once.find_stack().unwrap()
    ));
}

#[test]
fn test_stack_of_plain_and_empty() {
    assert!(stack_of(&unsupported()).is_none());
    assert!(stack_of(None::<&Error>).is_none());
}

#[test]
fn test_result_ext_in_question_mark_chain() {
    fn read() -> errtrail::Result<String> {
        let missing: std::result::Result<String, io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        let contents = missing.wrap("reading settings")?;
        Ok(contents)
    }

    fn load() -> errtrail::Result<String> {
        read().wrap_with(|| format!("loading profile {}", "dev"))
    }

    let err = load().unwrap_err();
    assert_eq!(
        err.to_string(),
        "loading profile dev: reading settings: no such file"
    );
    assert_eq!(err.find::<io::Error>().unwrap().kind(), io::ErrorKind::NotFound);
    assert!(err.stack().is_none());
    assert!(stack_of(&err).is_some());
}

#[test]
fn test_newf_embeds_causes_in_order() {
    let first = Error::msg("first");
    let second = Error::msg("second");
    let err = newf!("{first}; {second}"; first, second);

    let order: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    assert_eq!(order, ["first; second", "first", "second"]);
}
