//! Context extensions for `Result` and `Option`
//!
//! These let call sites attach context with `?` in one step. Each method calls
//! [`Error::build`] directly, and keeps its own frame with `black_box`, so the
//! captured stack starts at the call site.

use std::error::Error as StdError;
use std::fmt;
use std::hint::black_box;

use super::types::{Error, Repr, Result};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T> {
    /// Wrap the error with a context message. `Ok` passes through untouched.
    fn wrap(self, message: impl Into<String>) -> Result<T>;

    /// Wrap the error with a lazily built context message
    fn wrap_with<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: fmt::Display;

    /// Convert the error, making sure its chain carries a stack
    fn traced(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[inline(never)]
    fn wrap(self, message: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(black_box(Error::build(Repr::Wrapped {
                message: message.into(),
                cause: Error::from_std(err),
            }))),
        }
    }

    #[inline(never)]
    fn wrap_with<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: fmt::Display,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(black_box(Error::build(Repr::Wrapped {
                message: context().to_string(),
                cause: Error::from_std(err),
            }))),
        }
    }

    #[inline(never)]
    fn traced(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(black_box(Error::build(Repr::Wrapped {
                message: String::new(),
                cause: Error::from_std(err),
            }))),
        }
    }
}

/// Extension trait for Option to convert to Result with a new error
pub trait OptionExt<T> {
    /// Convert `None` into an error carrying `message` and a stack
    fn ok_or_msg(self, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline(never)]
    fn ok_or_msg(self, message: impl Into<String>) -> Result<T> {
        match self {
            Some(value) => Ok(value),
            None => Err(black_box(Error::build(Repr::Message(message.into())))),
        }
    }
}
