//! Iterator over a cause tree

use crate::error::{Causes, Error};

/// Preorder iterator over a cause tree, created by [`Error::chain`].
///
/// Visits nodes in the same order as [`walk`](crate::walk::walk) with a visitor
/// that never returns an error.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    pending: Vec<&'a Error>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(root: &'a Error) -> Self {
        Self {
            pending: vec![root],
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        match node.causes() {
            Causes::Leaf => {}
            Causes::Single(cause) => self.pending.push(cause),
            // reversed so the leftmost child is popped first
            Causes::Multi(causes) => self.pending.extend(causes.iter().rev()),
        }
        Some(node)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}
