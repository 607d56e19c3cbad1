//! Configuration constants for SubstrateDB.

/// Default K value for the LRU-K replacer.
///
/// With K = 2 the replacer degenerates to the classic LRU-2 policy:
/// a frame only becomes a strong eviction candidate after its second
/// access, which is enough to keep one-off sequential scans from
/// flushing the hot set.
pub const DEFAULT_REPLACER_K: usize = 2;

/// Why a frame was accessed.
///
/// Passed to [`record_access`](crate::buffer::replacer::LruKReplacer::record_access)
/// by the buffer pool. Purely informational: the eviction algorithm treats
/// all access types identically, but callers report them so a future policy
/// (e.g. scan-resistant variants) can distinguish them without an API change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessType {
    /// Access reason unknown or unclassified.
    #[default]
    Unknown,
    /// Point lookup through an index.
    Lookup,
    /// Sequential scan.
    Scan,
    /// Index traversal (internal pages).
    Index,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_k_is_lru2() {
        assert_eq!(DEFAULT_REPLACER_K, 2);
    }

    #[test]
    fn test_access_type_default() {
        assert_eq!(AccessType::default(), AccessType::Unknown);
    }
}
