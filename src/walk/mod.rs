//! Cause tree traversal
//!
//! The cause tree of an error consists of the error itself and, recursively,
//! its direct causes as reported by [`Error::causes`]. Every traversal in this
//! crate visits nodes in the same preorder, depth-first order: a node, then
//! each child's whole subtree, children left to right.

pub mod chain;

use once_cell::sync::Lazy;

use crate::error::{Causes, Error};

pub use chain::Chain;

/// Sentinel a [`walk`] visitor returns to prune the current subtree without
/// failing the walk.
///
/// Matching uses [`Error::is`], so the sentinel still counts when wrapped.
pub static SKIP: Lazy<Error> = Lazy::new(|| Error::msg("skip"));

/// A handle to [`SKIP`], ready to be returned from a visitor
pub fn skip() -> Error {
    Error::clone(&SKIP)
}

/// Walk the cause tree of `root`, calling `visit` on each node in preorder.
///
/// - An empty root returns `Ok(())` without calling `visit`.
/// - If `visit` returns an error matching [`SKIP`], the node's children are
///   not visited and the walk carries on with the rest of the tree.
/// - Any other error aborts the walk and is returned unchanged.
///
/// ```
/// use errtrail::{join, walk, Error};
///
/// let e1 = Error::msg("1");
/// let e2 = Error::msg("2");
/// let top = join([Some(e1), Some(e2)]).unwrap().wrap("top");
///
/// let mut seen = Vec::new();
/// walk(&top, |e| {
///     seen.push(e.message().unwrap_or("<join>").to_string());
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(seen, ["top", "<join>", "1", "2"]);
/// ```
pub fn walk<'a, F>(root: impl Into<Option<&'a Error>>, mut visit: F) -> Result<(), Error>
where
    F: FnMut(&Error) -> Result<(), Error>,
{
    match root.into() {
        Some(root) => walk_node(root, &mut visit),
        None => Ok(()),
    }
}

fn walk_node<F>(node: &Error, visit: &mut F) -> Result<(), Error>
where
    F: FnMut(&Error) -> Result<(), Error>,
{
    if let Err(err) = visit(node) {
        if err.is(&SKIP) {
            tracing::trace!(node = %node, "skipping subtree");
            return Ok(());
        }
        return Err(err);
    }

    match node.causes() {
        Causes::Leaf => Ok(()),
        Causes::Single(cause) => walk_node(cause, visit),
        Causes::Multi(causes) => {
            for cause in causes {
                walk_node(cause, visit)?;
            }
            Ok(())
        }
    }
}

impl Error {
    /// Iterate over the cause tree in walk order, starting with `self`.
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// Returns true if `target` is this error or any node of its cause tree.
    ///
    /// Comparison is by identity, not by message.
    pub fn is(&self, target: &Error) -> bool {
        self.chain().any(|node| Error::ptr_eq(node, target))
    }

    /// First foreign error of type `E` in the cause tree, in walk order.
    pub fn find<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.chain()
            .filter_map(Error::foreign_ref)
            .find_map(|foreign| foreign.downcast_ref::<E>())
    }

    /// Follows first causes down to a leaf.
    pub fn root_cause(&self) -> &Error {
        let mut node = self;
        loop {
            node = match node.causes() {
                Causes::Leaf => return node,
                Causes::Single(cause) => cause,
                Causes::Multi(causes) => match causes.first() {
                    Some(first) => first,
                    None => return node,
                },
            };
        }
    }
}
