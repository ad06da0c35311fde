//! Multi-line rendering of a whole cause tree

use std::fmt;

use super::types::{Causes, Error};

/// Displays an error, every cause below it and the resolved stack.
///
/// Created by [`Error::report`]. Causes are listed in walk order and indented
/// by their depth in the tree.
pub struct Report<'a> {
    error: &'a Error,
    with_stack: bool,
}

impl Error {
    /// Render the full cause tree and the stack, for humans
    pub fn report(&self) -> Report<'_> {
        Report {
            error: self,
            with_stack: true,
        }
    }
}

impl<'a> Report<'a> {
    /// Leave the stack out of the rendering
    pub fn without_stack(mut self) -> Self {
        self.with_stack = false;
        self
    }
}

fn write_causes(f: &mut fmt::Formatter<'_>, node: &Error, depth: usize) -> fmt::Result {
    for cause in node.causes_slice() {
        writeln!(f, "{:indent$}- {}", "", first_line(cause), indent = depth * 2)?;
        write_causes(f, cause, depth + 1)?;
    }
    Ok(())
}

fn first_line(err: &Error) -> String {
    if err.is_joined() {
        return format!("{} errors", err.causes().len());
    }
    let rendered = err.to_string();
    match rendered.split_once('\n') {
        Some((first, _)) => format!("{first} ..."),
        None => rendered,
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.error)?;
        if !self.error.causes().is_leaf() {
            writeln!(f, "\nCaused by:")?;
            write_causes(f, self.error, 1)?;
        }
        if self.with_stack {
            if let Some(stack) = self.error.find_stack() {
                writeln!(f, "\nStack:")?;
                for frame in stack.frames().iter() {
                    writeln!(f, "    {frame}")?;
                }
            }
        }
        Ok(())
    }
}

impl Error {
    fn causes_slice(&self) -> &[Error] {
        match self.causes() {
            Causes::Leaf => &[],
            Causes::Single(cause) => std::slice::from_ref(cause),
            Causes::Multi(causes) => causes,
        }
    }
}
