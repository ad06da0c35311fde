//! Error constructors
//!
//! Every constructor that may capture a stack goes through [`Error::build`],
//! which checks the causes for an existing snapshot before capturing a new
//! one. The call depth between a public constructor and the capture is fixed
//! by [`CAPTURE_SKIP_FRAMES`](crate::stack::CAPTURE_SKIP_FRAMES), so every
//! constructor passes the built value through `black_box`. Without it an
//! optimized build may turn the call into a tail call and drop the
//! constructor's frame, and the capture would then skip the caller instead.

use std::hint::black_box;

use std::error::Error as StdError;
use std::sync::Arc;

use super::types::{Causes, Error, Repr};
use crate::config;
use crate::stack::Stack;

impl Error {
    /// Create a base error from a message, capturing the stack.
    #[inline(never)]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        black_box(Self::build(Repr::Message(message.into())))
    }

    /// Create a plain message-only error without a stack.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::from_parts(Repr::Message(message.into()), None)
    }

    /// Adopt an error from outside this crate.
    ///
    /// Each link of the error's `source()` chain becomes a single-cause node,
    /// so walks and searches see the whole chain. A link that is itself an
    /// [`Error`] is shared as-is, with its own cause tree. No stack is
    /// captured. Passing an [`Error`] returns it unchanged.
    #[must_use]
    pub fn from_std<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(err);
        let root: Arc<dyn StdError + Send + Sync + 'static> = match boxed.downcast::<Error>() {
            Ok(err) => return *err,
            Err(foreign) => Arc::from(foreign),
        };

        // Nodes are built from the bottom up, so measure the chain first.
        let mut foreign_links = 0;
        let mut tail: Option<Error> = None;
        let mut link = root.source();
        while let Some(current) = link {
            if let Some(ours) = current.downcast_ref::<Error>() {
                tail = Some(ours.clone());
                break;
            }
            foreign_links += 1;
            link = current.source();
        }

        let mut source = tail;
        for depth in (1..=foreign_links).rev() {
            source = Some(Self::from_parts(
                Repr::Foreign {
                    root: Arc::clone(&root),
                    depth,
                    source,
                },
                None,
            ));
        }
        Self::from_parts(
            Repr::Foreign {
                root,
                depth: 0,
                source,
            },
            None,
        )
    }

    /// Attach a context message to this error.
    ///
    /// The result renders as `"{message}: {self}"` and captures a stack only
    /// if nothing in `self`'s cause tree already carries one.
    #[inline(never)]
    #[must_use]
    pub fn wrap(self, message: impl Into<String>) -> Self {
        black_box(Self::build(Repr::Wrapped {
            message: message.into(),
            cause: self,
        }))
    }

    /// Wrap without a message, only to make sure a stack is attached.
    ///
    /// Renders exactly like the cause.
    #[inline(never)]
    #[must_use]
    pub fn traced(self) -> Self {
        black_box(Self::build(Repr::Wrapped {
            message: String::new(),
            cause: self,
        }))
    }

    /// Backing function of [`newf!`](crate::newf).
    #[doc(hidden)]
    #[inline(never)]
    pub fn __newf(message: String, causes: Vec<Error>) -> Self {
        black_box(Self::build(Self::formatted(message, causes)))
    }

    /// Backing function of [`wrapf!`](crate::wrapf).
    #[doc(hidden)]
    #[inline(never)]
    pub fn __wrapf(cause: Option<Error>, message: String, extra: Vec<Error>) -> Option<Self> {
        let cause = cause?;
        let rendered = format!("{message}: {cause}");
        let repr = if extra.is_empty() {
            Repr::Wrapped { message, cause }
        } else {
            let mut causes = extra;
            causes.push(cause);
            Repr::Formatted {
                message: rendered,
                causes,
            }
        };
        Some(black_box(Self::build(repr)))
    }

    fn formatted(message: String, causes: Vec<Error>) -> Repr {
        if causes.is_empty() {
            Repr::Message(message)
        } else {
            Repr::Formatted { message, causes }
        }
    }

    /// Internal construction helper shared by all stack-capturing constructors.
    #[inline(never)]
    pub(super) fn build(repr: Repr) -> Self {
        let settings = config::current();
        let inherited = match repr.causes() {
            Causes::Leaf => false,
            Causes::Single(cause) => cause.find_stack().is_some(),
            Causes::Multi(causes) => causes.iter().any(|c| c.find_stack().is_some()),
        };

        let stack = if inherited {
            tracing::debug!("cause already carries a stack, skipping capture");
            None
        } else if !settings.enabled {
            tracing::debug!("stack capture disabled by configuration");
            None
        } else {
            Some(Stack::capture(settings.max_depth))
        };

        Self::from_parts(repr, stack)
    }

    /// First stack snapshot in the cause tree, in walk order.
    pub fn find_stack(&self) -> Option<&Stack> {
        self.chain().find_map(Error::stack)
    }
}

/// Attach a context message to an optional error.
///
/// `None` in gives `None` out, so call sites need no presence check.
#[inline(never)]
pub fn wrap(cause: Option<Error>, message: impl Into<String>) -> Option<Error> {
    let cause = cause?;
    Some(black_box(Error::build(Repr::Wrapped {
        message: message.into(),
        cause,
    })))
}

/// Combine independent errors into one aggregate.
///
/// Empty entries are dropped; if none remain the result is `None`. The
/// aggregate renders as the causes' messages joined by newlines and captures
/// no stack of its own.
pub fn join<I>(errors: I) -> Option<Error>
where
    I: IntoIterator<Item = Option<Error>>,
{
    let causes: Vec<Error> = errors.into_iter().flatten().collect();
    if causes.is_empty() {
        return None;
    }
    Some(Error::from_parts(Repr::Joined(causes), None))
}

/// Create an error from a format string, capturing the stack.
///
/// Errors listed after `;` become direct causes, in order. They are usually
/// referenced from the message as well:
///
/// ```
/// use errtrail::{newf, Error};
///
/// let io = Error::msg("disk full");
/// let err = newf!("saving {}: {io}", "report.csv"; io);
/// assert_eq!(err.to_string(), "saving report.csv: disk full");
/// assert!(err.is(&io));
/// ```
#[macro_export]
macro_rules! newf {
    ($fmt:literal $(, $arg:expr)* $(,)? $(; $($cause:expr),+ $(,)?)?) => {{
        let message = ::std::format!($fmt $(, $arg)*);
        $crate::Error::__newf(
            message,
            ::std::vec![$($($crate::Error::clone(&$cause)),+)?],
        )
    }};
}

/// Wrap an optional error with a formatted message.
///
/// `None` in gives `None` out. Errors listed after `;` become additional
/// causes placed before the wrapped one.
///
/// ```
/// use errtrail::{wrapf, Error};
///
/// let cause = Some(Error::msg("connection refused"));
/// let err = wrapf!(cause, "dialing {}", "db:5432").unwrap();
/// assert_eq!(err.to_string(), "dialing db:5432: connection refused");
/// ```
#[macro_export]
macro_rules! wrapf {
    ($cause:expr, $fmt:literal $(, $arg:expr)* $(,)? $(; $($extra:expr),+ $(,)?)?) => {{
        let cause: ::std::option::Option<$crate::Error> = $cause;
        match cause {
            ::std::option::Option::None => ::std::option::Option::None,
            cause => {
                let message = ::std::format!($fmt $(, $arg)*);
                $crate::Error::__wrapf(
                    cause,
                    message,
                    ::std::vec![$($($crate::Error::clone(&$extra)),+)?],
                )
            }
        }
    }};
}
