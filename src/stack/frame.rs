//! Resolved stack frames and their text rendering

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One resolved entry of a stack snapshot.
///
/// Any of the fields may be missing when the runtime could not resolve them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Demangled function name, without the trailing hash
    pub function: Option<String>,
    /// Source file
    pub file: Option<PathBuf>,
    /// Line number within `file`
    pub line: Option<u32>,
}

impl Frame {
    /// Returns true if nothing about this frame could be resolved
    pub fn is_unknown(&self) -> bool {
        self.function.is_none() && self.file.is_none()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, &self.function, self.line) {
            (Some(file), Some(function), line) => {
                write!(f, "{}:", file.display())?;
                if let Some(line) = line {
                    write!(f, "{line}:")?;
                }
                write!(f, " {function}")
            }
            (_, Some(function), _) => f.write_str(function),
            (Some(file), None, Some(line)) => {
                write!(f, "{}:{}: (unknown function)", file.display(), line)
            }
            _ => f.write_str("(unknown)"),
        }
    }
}

/// Resolved frames of a snapshot, innermost (closest to the error site) first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frames(pub Vec<Frame>);

impl Frames {
    /// The frame closest to where the error was created
    pub fn innermost(&self) -> Option<&Frame> {
        self.0.first()
    }
}

impl std::ops::Deref for Frames {
    type Target = [Frame];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Frames {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Frames {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Frames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.0 {
            writeln!(f, "{frame}")?;
        }
        Ok(())
    }
}
