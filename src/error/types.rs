//! Error types and definitions for errtrail
//!
//! An [`Error`] is an immutable handle over one node of a cause tree. Nodes are
//! built bottom-up and never mutated, so a tree can be shared freely between
//! threads and walked any number of times.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::stack::Stack;

/// An error value carrying an optional context message, its causes and at
/// most one stack snapshot per wrap chain.
#[derive(Clone)]
pub struct Error {
    pub(super) inner: Arc<ErrorInner>,
}

pub(super) struct ErrorInner {
    pub repr: Repr,
    pub stack: Option<Stack>,
}

/// The concrete shape of a node
pub(super) enum Repr {
    /// Base error made from a message
    Message(String),
    /// Error from outside this crate, or one link of its `source()` chain.
    ///
    /// Every link shares the adopted root; `depth` counts the `source()` calls
    /// from the root to this link, and `source` is the next link as a node.
    Foreign {
        root: Arc<dyn StdError + Send + Sync + 'static>,
        depth: usize,
        source: Option<Error>,
    },
    /// Context over exactly one cause. An empty message renders as the cause alone.
    Wrapped { message: String, cause: Error },
    /// Formatted message embedding two or more causes
    Formatted { message: String, causes: Vec<Error> },
    /// Independent errors with no unifying message
    Joined(Vec<Error>),
}

impl Repr {
    pub(super) fn causes(&self) -> Causes<'_> {
        match self {
            Repr::Message(_) | Repr::Foreign { source: None, .. } => Causes::Leaf,
            Repr::Foreign {
                source: Some(source),
                ..
            } => Causes::Single(source),
            Repr::Wrapped { cause, .. } => Causes::Single(cause),
            Repr::Formatted { causes, .. } if causes.len() == 1 => Causes::Single(&causes[0]),
            Repr::Formatted { causes, .. } | Repr::Joined(causes) => Causes::Multi(causes),
        }
    }
}

/// Cause shape of a single node, as seen by the walker
#[derive(Debug, Clone, Copy)]
pub enum Causes<'a> {
    /// No causes
    Leaf,
    /// Exactly one direct cause
    Single(&'a Error),
    /// An ordered sequence of direct causes
    Multi(&'a [Error]),
}

impl<'a> Causes<'a> {
    /// Returns true if the node has no causes
    pub fn is_leaf(&self) -> bool {
        matches!(self, Causes::Leaf)
    }

    /// Number of direct causes
    pub fn len(&self) -> usize {
        match self {
            Causes::Leaf => 0,
            Causes::Single(_) => 1,
            Causes::Multi(causes) => causes.len(),
        }
    }

    /// Returns true if there are no direct causes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Error {
    pub(super) fn from_parts(repr: Repr, stack: Option<Stack>) -> Self {
        Self {
            inner: Arc::new(ErrorInner { repr, stack }),
        }
    }

    /// Direct causes of this node
    pub fn causes(&self) -> Causes<'_> {
        self.inner.repr.causes()
    }

    /// The single direct cause, if this node has exactly one
    pub fn cause(&self) -> Option<&Error> {
        match self.causes() {
            Causes::Single(cause) => Some(cause),
            _ => None,
        }
    }

    /// The stack snapshot captured when this node was built.
    ///
    /// Only the node itself is consulted; use [`crate::stack_of`] to find the
    /// snapshot of a whole chain.
    pub fn stack(&self) -> Option<&Stack> {
        self.inner.stack.as_ref()
    }

    /// The context message of this node, if it carries one
    pub fn message(&self) -> Option<&str> {
        match &self.inner.repr {
            Repr::Message(message) => Some(message.as_str()),
            Repr::Wrapped { message, .. } | Repr::Formatted { message, .. } if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Returns true if this node adopts an error from outside the crate
    pub fn is_foreign(&self) -> bool {
        matches!(self.inner.repr, Repr::Foreign { .. })
    }

    /// Returns true if this node is a join aggregate
    pub fn is_joined(&self) -> bool {
        matches!(self.inner.repr, Repr::Joined(_))
    }

    /// Identity comparison: both handles point at the same node
    pub fn ptr_eq(a: &Error, b: &Error) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// The adopted foreign error this node stands for
    pub(crate) fn foreign_ref(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.inner.repr {
            Repr::Foreign { root, depth, .. } => Some(source_at(root.as_ref(), *depth)),
            _ => None,
        }
    }
}

/// Follow `depth` links of a `source()` chain, stopping early at its end
fn source_at<'a>(root: &'a (dyn StdError + 'static), depth: usize) -> &'a (dyn StdError + 'static) {
    let mut err = root;
    for _ in 0..depth {
        match err.source() {
            Some(next) => err = next,
            None => break,
        }
    }
    err
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.repr {
            Repr::Message(message) => f.write_str(message),
            Repr::Foreign { root, depth, .. } => {
                fmt::Display::fmt(source_at(root.as_ref(), *depth), f)
            }
            Repr::Wrapped { message, cause } if message.is_empty() => fmt::Display::fmt(cause, f),
            Repr::Wrapped { message, cause } => write!(f, "{message}: {cause}"),
            Repr::Formatted { message, .. } => f.write_str(message),
            Repr::Joined(causes) => {
                for (i, cause) in causes.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{cause}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = match &self.inner.repr {
            Repr::Message(message) => {
                let mut d = f.debug_struct("Message");
                d.field("message", message);
                d
            }
            Repr::Foreign { root, depth, .. } => {
                let mut d = f.debug_struct("Foreign");
                d.field("error", &source_at(root.as_ref(), *depth))
                    .field("depth", depth);
                d
            }
            Repr::Wrapped { message, cause } => {
                let mut d = f.debug_struct("Wrapped");
                d.field("message", message).field("cause", cause);
                d
            }
            Repr::Formatted { message, causes } => {
                let mut d = f.debug_struct("Formatted");
                d.field("message", message).field("causes", causes);
                d
            }
            Repr::Joined(causes) => {
                let mut d = f.debug_struct("Joined");
                d.field("causes", causes);
                d
            }
        };
        if let Some(stack) = &self.inner.stack {
            dbg.field("stack_depth", &stack.len());
        }
        dbg.finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.inner.repr {
            Repr::Foreign { root, depth, .. } => source_at(root.as_ref(), *depth).source(),
            _ => self.cause().map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
