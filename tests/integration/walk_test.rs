use errtrail::{join, skip, walk, Error};

struct Tree {
    e1: Error,
    e2: Error,
    e3: Error,
    e4: Error,
    e5: Error,
}

fn tree() -> Tree {
    let e1 = Error::new("1");
    let e2 = Error::new("2");
    let e3 = join([Some(e1.clone()), Some(e2.clone())]).unwrap();
    let e4 = e3.clone().wrap("4");
    let e5 = e4.clone().wrap("5");
    Tree { e1, e2, e3, e4, e5 }
}

fn label(t: &Tree, e: &Error) -> i32 {
    [&t.e1, &t.e2, &t.e3, &t.e4, &t.e5]
        .iter()
        .position(|candidate| Error::ptr_eq(candidate, e))
        .map(|i| i as i32 + 1)
        .unwrap_or(0)
}

#[test]
fn test_walk_empty_root() {
    let mut visited = 0;
    assert!(walk(None::<&Error>, |_| {
        visited += 1;
        Ok(())
    })
    .is_ok());
    assert_eq!(visited, 0);
}

#[test]
fn test_walk_full_tree_in_preorder() {
    let t = tree();
    let mut got = Vec::new();
    walk(&t.e5, |e| {
        got.push(label(&t, e));
        Ok(())
    })
    .unwrap();
    assert_eq!(got, vec![5, 4, 3, 1, 2]);
}

#[test]
fn test_walk_skip_at_join_prunes_children() {
    let t = tree();
    let mut got = Vec::new();
    let result = walk(&t.e5, |e| {
        got.push(label(&t, e));
        if Error::ptr_eq(e, &t.e3) {
            return Err(skip());
        }
        Ok(())
    });
    assert!(result.is_ok());
    assert_eq!(got, vec![5, 4, 3]);
}

#[test]
fn test_walk_abort_stops_before_sibling() {
    let t = tree();
    let failure = Error::msg("classification failed");
    let mut got = Vec::new();
    let result = walk(&t.e5, |e| {
        got.push(label(&t, e));
        if Error::ptr_eq(e, &t.e1) {
            return Err(failure.clone());
        }
        Ok(())
    });
    assert!(Error::ptr_eq(&result.unwrap_err(), &failure));
    assert_eq!(got, vec![5, 4, 3, 1]);
}

#[test]
fn test_walk_sees_foreign_leaves() {
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
    let err = join([Some(Error::from_std(io)), Some(Error::msg("other"))])
        .unwrap()
        .wrap("sync");

    let mut foreign = 0;
    walk(&err, |e| {
        if e.is_foreign() {
            foreign += 1;
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(foreign, 1);
}

#[test]
fn test_walk_with_subscriber_installed() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();

    let t = tree();
    let mut count = 0;
    walk(&t.e5, |e| {
        count += 1;
        if Error::ptr_eq(e, &t.e4) {
            return Err(skip().wrap("stop here"));
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(count, 2);
}
