//! Stack snapshots
//!
//! A [`Stack`] stores raw instruction pointers only. Symbol resolution is
//! deferred until [`Stack::frames`] is called, since most errors are handled
//! without anyone looking at their trace.

pub mod frame;

use std::ffi::c_void;
use std::fmt;

use crate::error::Error;

pub use frame::{Frame, Frames};

/// Default maximum number of frames kept per snapshot
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Number of this crate's own frames on top of every capture: the capture
/// primitive, the internal construction helper and the public constructor
/// that called it. Every public constructor must call the helper directly and
/// must not tail-call it, and the helper must call [`Stack::capture`]
/// directly, or this count drifts.
pub const CAPTURE_SKIP_FRAMES: usize = 3;

/// An immutable snapshot of return addresses, innermost first
#[derive(Clone, PartialEq, Eq)]
pub struct Stack {
    ips: Box<[usize]>,
}

impl Stack {
    /// Record up to `max_depth` frames above the crate's own call path.
    ///
    /// The capture locates its own frame by symbol address and skips
    /// [`CAPTURE_SKIP_FRAMES`] from there. If that frame cannot be found the
    /// trace is kept from the top. Never records more than `max_depth` frames.
    #[inline(never)]
    pub(crate) fn capture(max_depth: usize) -> Stack {
        if max_depth == 0 {
            return Stack { ips: Box::new([]) };
        }

        let anchor = Stack::capture as *const () as usize;
        let mut ips = Vec::with_capacity(max_depth.min(DEFAULT_MAX_DEPTH));
        let mut unanchored = Vec::with_capacity(max_depth.min(DEFAULT_MAX_DEPTH));
        let mut to_skip: Option<usize> = None;

        backtrace::trace(|frame| {
            match to_skip {
                None => {
                    if frame.symbol_address() as usize == anchor {
                        to_skip = Some(CAPTURE_SKIP_FRAMES - 1);
                    } else if unanchored.len() < max_depth {
                        unanchored.push(frame.ip() as usize);
                    }
                    true
                }
                Some(0) => {
                    if ips.len() < max_depth {
                        ips.push(frame.ip() as usize);
                    }
                    ips.len() < max_depth
                }
                Some(n) => {
                    to_skip = Some(n - 1);
                    true
                }
            }
        });

        if to_skip.is_none() {
            tracing::debug!("capture frame not found in trace, keeping unanchored stack");
            ips = unanchored;
        }
        tracing::trace!(frames = ips.len(), max_depth, "captured stack");

        Stack {
            ips: ips.into_boxed_slice(),
        }
    }

    /// Number of raw frames
    pub fn len(&self) -> usize {
        self.ips.len()
    }

    /// Returns true if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// Raw instruction pointers, innermost first
    pub fn ips(&self) -> &[usize] {
        &self.ips
    }

    /// Resolve the snapshot into frames.
    ///
    /// Inlined calls expand into one frame each, innermost first, so the
    /// result can be longer than [`Stack::len`]. Addresses that resolve to
    /// nothing produce an unknown frame.
    pub fn frames(&self) -> Frames {
        let mut frames = Vec::with_capacity(self.ips.len());
        for &ip in self.ips.iter() {
            let before = frames.len();
            backtrace::resolve(ip as *mut c_void, |symbol| {
                frames.push(Frame {
                    function: symbol.name().map(|name| format!("{name:#}")),
                    file: symbol.filename().map(|path| path.to_path_buf()),
                    line: symbol.lineno(),
                });
            });
            if frames.len() == before {
                frames.push(Frame::default());
            }
        }
        Frames(frames)
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.ips.iter().map(|ip| format!("{ip:#x}")))
            .finish()
    }
}

/// Resolved stack of an error chain.
///
/// Returns `None` for an empty argument or when no node of the cause tree
/// carries a snapshot. Otherwise the first snapshot in walk order is resolved;
/// for a wrap chain that is the single capture made when the chain began.
pub fn stack_of<'a>(err: impl Into<Option<&'a Error>>) -> Option<Frames> {
    err.into()?.find_stack().map(Stack::frames)
}
