//! Error types for SubstrateDB.

use thiserror::Error;

use crate::common::FrameId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in SubstrateDB.
///
/// Only genuine caller misuse is represented here. Routine outcomes -
/// a trie lookup miss, an eviction scan that finds no candidate, a no-op
/// edit - are expressed as `Option`/unchanged state, never as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A frame ID outside the replacer's configured range `[0, max_num_frames)`.
    ///
    /// This indicates a bug in the caller (buffer pool) and must not be
    /// swallowed. No replacer state changes when this is returned.
    #[error("invalid frame ID: {0} (max_num_frames = {1})")]
    InvalidFrameId(FrameId, usize),

    /// Attempted to remove a frame that is tracked but not evictable.
    ///
    /// A non-evictable frame is pinned by the buffer pool; removing it
    /// would corrupt pin accounting. This is an invariant violation, not
    /// a normal outcome.
    #[error("{0} is non-evictable and cannot be removed")]
    FrameNotEvictable(FrameId),
}
