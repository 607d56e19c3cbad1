//! Frame identifier type.

use std::fmt;

/// Identifies a frame in the buffer pool.
///
/// The replacer never touches frame contents; a `FrameId` is purely a key
/// into its per-frame bookkeeping. Using `usize` because:
/// 1. The buffer pool stores frames in a `Vec` and indexes with it directly
/// 2. It hashes cheaply as a `HashMap` key
///
/// Valid IDs fall in `[0, max_num_frames)` for the replacer they are passed
/// to; anything outside that range is rejected as caller misuse.
///
/// # Example
/// ```
/// use substratedb::FrameId;
///
/// let frame_id = FrameId::new(5);
/// assert_eq!(frame_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_id_new() {
        let fid = FrameId::new(10);
        assert_eq!(fid.0, 10);
    }

    #[test]
    fn test_frame_id_equality() {
        assert_eq!(FrameId::new(5), FrameId::new(5));
        assert_ne!(FrameId::new(5), FrameId::new(6));
    }

    #[test]
    fn test_frame_id_ordering() {
        // The eviction scan breaks timestamp ties on the smaller ID.
        assert!(FrameId::new(1) < FrameId::new(2));
    }

    #[test]
    fn test_frame_id_display() {
        assert_eq!(format!("{}", FrameId::new(42)), "Frame(42)");
    }
}
