//! LRU-K replacement policy.
//!
//! LRU-K evicts the frame whose K-th most recent access is furthest in the
//! past (largest "backward K-distance"). A frame with fewer than K recorded
//! accesses has infinite distance, so frames touched once by a sequential
//! scan are evicted before frequently-reused ones ever are - the pollution
//! resistance plain LRU lacks.
//!
//! Victim order, most evictable first:
//! 1. any frame with fewer than K accesses, earliest single access first;
//! 2. otherwise the frame with the smallest K-th-most-recent timestamp.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::common::{AccessType, Error, FrameId, Result};

/// Bounded access history for one frame.
///
/// Holds the logical timestamps of the most recent accesses, oldest at the
/// front, capped at `k` entries. With the cap in place the front entry *is*
/// the K-th most recent access once the frame has k of them.
struct LruKNode {
    history: VecDeque<u64>,

    /// Whether the buffer pool currently allows evicting this frame.
    /// Newly registered frames start pinned.
    is_evictable: bool,
}

impl LruKNode {
    fn new(k: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(k),
            is_evictable: false,
        }
    }

    /// Append a timestamp, discarding the oldest entry beyond the K-window.
    fn record(&mut self, timestamp: u64, k: usize) {
        self.history.push_back(timestamp);
        if self.history.len() > k {
            self.history.pop_front();
        }
    }

    /// Oldest retained timestamp: the earliest access for a frame still
    /// under k accesses, the K-th most recent one otherwise.
    fn oldest_retained(&self) -> Option<u64> {
        self.history.front().copied()
    }
}

/// State behind the replacer's single latch.
struct LruKReplacerInner {
    /// Per-frame access history, keyed by frame ID.
    node_store: HashMap<FrameId, LruKNode>,

    /// Global logical clock; incremented once per recorded access.
    current_timestamp: u64,

    /// Number of evictable frames, maintained so `size` is O(1).
    curr_size: usize,

    /// Highest valid frame ID is `max_num_frames - 1`.
    max_num_frames: usize,

    /// The K in LRU-K.
    k: usize,
}

impl LruKReplacerInner {
    fn check_frame_id(&self, frame_id: FrameId) -> Result<()> {
        if frame_id.0 >= self.max_num_frames {
            return Err(Error::InvalidFrameId(frame_id, self.max_num_frames));
        }
        Ok(())
    }
}

/// LRU-K eviction policy engine.
///
/// Tracks an access history and an evictable flag per frame and selects
/// eviction victims by backward K-distance. Driven by the buffer pool:
/// every page access calls [`record_access`](Self::record_access),
/// pinning/unpinning toggles [`set_evictable`](Self::set_evictable), and
/// a full pool calls [`evict`](Self::evict).
///
/// Frame lifecycle: unregistered → tracked-nonevictable →
/// tracked-evictable → (evicted → unregistered). A frame re-registers on
/// its next recorded access, nonevictable again.
///
/// # Thread Safety
/// One `parking_lot::Mutex` guards the whole state. Every public operation
/// is a short critical section of pure in-memory bookkeeping - no I/O, no
/// waiting, no callbacks while the latch is held, no second lock - so
/// concurrent calls are linearized and cannot deadlock.
///
/// # Example
/// ```
/// use substratedb::{AccessType, FrameId, LruKReplacer};
///
/// let replacer = LruKReplacer::new(8, 2);
/// replacer.record_access(FrameId::new(0), AccessType::Lookup).unwrap();
/// replacer.set_evictable(FrameId::new(0), true).unwrap();
///
/// assert_eq!(replacer.size(), 1);
/// assert_eq!(replacer.evict(), Some(FrameId::new(0)));
/// assert_eq!(replacer.evict(), None);
/// ```
pub struct LruKReplacer {
    inner: Mutex<LruKReplacerInner>,
}

impl LruKReplacer {
    /// Create a replacer for `max_num_frames` frames with window `k`.
    ///
    /// # Panics
    /// Panics if `k` is 0.
    pub fn new(max_num_frames: usize, k: usize) -> Self {
        assert!(k >= 1, "k must be >= 1");

        Self {
            inner: Mutex::new(LruKReplacerInner {
                node_store: HashMap::new(),
                current_timestamp: 0,
                curr_size: 0,
                max_num_frames,
                k,
            }),
        }
    }

    /// Record an access to `frame_id` at the next logical timestamp.
    ///
    /// Registers the frame on first sight (nonevictable, empty history).
    /// `_access_type` is reported by the caller but does not influence the
    /// algorithm.
    ///
    /// # Errors
    /// `Error::InvalidFrameId` if `frame_id` is outside
    /// `[0, max_num_frames)`; no state changes in that case.
    pub fn record_access(&self, frame_id: FrameId, _access_type: AccessType) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.check_frame_id(frame_id)?;

        inner.current_timestamp += 1;
        let timestamp = inner.current_timestamp;
        let k = inner.k;

        inner
            .node_store
            .entry(frame_id)
            .or_insert_with(|| LruKNode::new(k))
            .record(timestamp, k);

        Ok(())
    }

    /// Mark `frame_id` as evictable or pinned.
    ///
    /// A no-op for unregistered frames and for toggles that don't change
    /// the flag; a genuine flip adjusts the evictable count by one.
    ///
    /// # Errors
    /// `Error::InvalidFrameId` if `frame_id` is outside
    /// `[0, max_num_frames)`.
    pub fn set_evictable(&self, frame_id: FrameId, evictable: bool) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.check_frame_id(frame_id)?;

        let flipped = match inner.node_store.get_mut(&frame_id) {
            Some(node) if node.is_evictable != evictable => {
                node.is_evictable = evictable;
                true
            }
            _ => false,
        };

        if flipped {
            if evictable {
                inner.curr_size += 1;
            } else {
                inner.curr_size -= 1;
            }
        }

        Ok(())
    }

    /// Drop all tracking for `frame_id`.
    ///
    /// Called when the buffer pool deletes a page. A no-op for
    /// unregistered frames.
    ///
    /// # Errors
    /// `Error::FrameNotEvictable` if the frame is tracked but pinned -
    /// removing an in-use frame would corrupt pin accounting, so it is
    /// surfaced instead of ignored. No state changes in that case.
    pub fn remove(&self, frame_id: FrameId) -> Result<()> {
        let mut inner = self.inner.lock();

        let evictable = match inner.node_store.get(&frame_id) {
            None => return Ok(()),
            Some(node) => node.is_evictable,
        };
        if !evictable {
            return Err(Error::FrameNotEvictable(frame_id));
        }

        inner.node_store.remove(&frame_id);
        inner.curr_size -= 1;
        Ok(())
    }

    /// Select, unregister, and return the eviction victim.
    ///
    /// Scans the evictable frames and picks by the module-level victim
    /// order. Timestamps come from one monotone clock and never collide;
    /// the scan still breaks ties on the smaller frame ID so selection is
    /// deterministic. Returns `None` when nothing is evictable - a normal
    /// outcome the buffer pool reports upward, not an error.
    pub fn evict(&self) -> Option<FrameId> {
        let mut inner = self.inner.lock();
        let k = inner.k;

        // Sort key: infinite-distance frames (history < k) precede finite
        // ones, then oldest retained timestamp, then frame ID.
        let victim = inner
            .node_store
            .iter()
            .filter(|(_, node)| node.is_evictable)
            .filter_map(|(&frame_id, node)| {
                let finite = node.history.len() >= k;
                node.oldest_retained().map(|ts| (finite, ts, frame_id))
            })
            .min();

        let (_, _, frame_id) = victim?;
        inner.node_store.remove(&frame_id);
        inner.curr_size -= 1;
        Some(frame_id)
    }

    /// Number of evictable frames, in O(1).
    pub fn size(&self) -> usize {
        self.inner.lock().curr_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(replacer: &LruKReplacer, ids: &[usize]) {
        for &id in ids {
            replacer
                .record_access(FrameId::new(id), AccessType::Unknown)
                .unwrap();
        }
    }

    fn set_evictable(replacer: &LruKReplacer, ids: &[usize], evictable: bool) {
        for &id in ids {
            replacer.set_evictable(FrameId::new(id), evictable).unwrap();
        }
    }

    #[test]
    fn test_evict_empty() {
        let replacer = LruKReplacer::new(4, 2);
        assert_eq!(replacer.evict(), None);
        assert_eq!(replacer.size(), 0);
    }

    #[test]
    fn test_infinite_distance_preferred() {
        let replacer = LruKReplacer::new(4, 2);

        // Frame 0 reaches k accesses; frame 1 stays under.
        record(&replacer, &[0, 0, 1]);
        set_evictable(&replacer, &[0, 1], true);

        // 1 has infinite distance and goes first even though 0 is older.
        assert_eq!(replacer.evict(), Some(FrameId::new(1)));
        assert_eq!(replacer.evict(), Some(FrameId::new(0)));
    }

    #[test]
    fn test_infinite_group_earliest_first() {
        let replacer = LruKReplacer::new(4, 3);

        // All single-access (k = 3): earliest-seen evicts first.
        record(&replacer, &[2, 0, 1]);
        set_evictable(&replacer, &[0, 1, 2], true);

        assert_eq!(replacer.evict(), Some(FrameId::new(2)));
        assert_eq!(replacer.evict(), Some(FrameId::new(0)));
        assert_eq!(replacer.evict(), Some(FrameId::new(1)));
    }

    #[test]
    fn test_finite_group_kth_recent() {
        let replacer = LruKReplacer::new(4, 2);

        // Timestamps: 0 -> [1, 4], 1 -> [2, 5], 2 -> [3, 6].
        record(&replacer, &[0, 1, 2, 0, 1, 2]);
        set_evictable(&replacer, &[0, 1, 2], true);

        // Smallest K-th-most-recent timestamp wins: 0 (ts 1).
        assert_eq!(replacer.evict(), Some(FrameId::new(0)));
        assert_eq!(replacer.evict(), Some(FrameId::new(1)));
        assert_eq!(replacer.evict(), Some(FrameId::new(2)));
    }

    #[test]
    fn test_history_window_is_bounded() {
        let replacer = LruKReplacer::new(4, 2);

        // Frame 0 accessed five times (window keeps [4, 5]), frame 1 twice
        // ([6, 7]). Frame 0's K-th most recent access is older, so its
        // earlier accesses beyond the window must not save it.
        record(&replacer, &[0, 0, 0, 0, 0, 1, 1]);
        set_evictable(&replacer, &[0, 1], true);

        assert_eq!(replacer.evict(), Some(FrameId::new(0)));
    }

    #[test]
    fn test_evicted_frame_unregisters() {
        let replacer = LruKReplacer::new(4, 2);

        record(&replacer, &[0, 0]);
        set_evictable(&replacer, &[0], true);
        assert_eq!(replacer.evict(), Some(FrameId::new(0)));

        // Gone: toggling does nothing, size stays 0.
        replacer.set_evictable(FrameId::new(0), true).unwrap();
        assert_eq!(replacer.size(), 0);
        assert_eq!(replacer.evict(), None);

        // Re-registration starts nonevictable with fresh history.
        record(&replacer, &[0]);
        assert_eq!(replacer.evict(), None);
        set_evictable(&replacer, &[0], true);
        assert_eq!(replacer.evict(), Some(FrameId::new(0)));
    }

    #[test]
    fn test_set_evictable_counts_flips_only() {
        let replacer = LruKReplacer::new(4, 2);
        record(&replacer, &[0]);

        set_evictable(&replacer, &[0], true);
        set_evictable(&replacer, &[0], true);
        assert_eq!(replacer.size(), 1);

        set_evictable(&replacer, &[0], false);
        set_evictable(&replacer, &[0], false);
        assert_eq!(replacer.size(), 0);
    }

    #[test]
    fn test_set_evictable_unregistered_is_noop() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.set_evictable(FrameId::new(3), true).unwrap();
        assert_eq!(replacer.size(), 0);
    }

    #[test]
    fn test_record_access_rejects_out_of_range() {
        let replacer = LruKReplacer::new(4, 2);

        let err = replacer
            .record_access(FrameId::new(4), AccessType::Unknown)
            .unwrap_err();
        assert_eq!(err, Error::InvalidFrameId(FrameId::new(4), 4));

        // No partial update: the clock did not tick, nothing registered.
        record(&replacer, &[0]);
        set_evictable(&replacer, &[0], true);
        assert_eq!(replacer.size(), 1);
    }

    #[test]
    fn test_set_evictable_rejects_out_of_range() {
        let replacer = LruKReplacer::new(4, 2);
        let err = replacer.set_evictable(FrameId::new(9), true).unwrap_err();
        assert_eq!(err, Error::InvalidFrameId(FrameId::new(9), 4));
    }

    #[test]
    fn test_remove_pinned_frame_fails() {
        let replacer = LruKReplacer::new(4, 2);
        record(&replacer, &[0]);

        // Still nonevictable: removal is an invariant violation.
        let err = replacer.remove(FrameId::new(0)).unwrap_err();
        assert_eq!(err, Error::FrameNotEvictable(FrameId::new(0)));

        // Back to evictable: removal succeeds and size drops.
        set_evictable(&replacer, &[0], true);
        assert_eq!(replacer.size(), 1);
        replacer.remove(FrameId::new(0)).unwrap();
        assert_eq!(replacer.size(), 0);
    }

    #[test]
    fn test_remove_unregistered_is_noop() {
        let replacer = LruKReplacer::new(4, 2);
        replacer.remove(FrameId::new(2)).unwrap();
        assert_eq!(replacer.size(), 0);
    }

    #[test]
    #[should_panic(expected = "k must be >= 1")]
    fn test_zero_k_panics() {
        let _ = LruKReplacer::new(4, 0);
    }

    #[test]
    fn test_pinned_frames_skipped_by_evict() {
        let replacer = LruKReplacer::new(4, 2);
        record(&replacer, &[0, 1, 2]);
        set_evictable(&replacer, &[1], true);

        // 0 and 2 are older but pinned.
        assert_eq!(replacer.evict(), Some(FrameId::new(1)));
        assert_eq!(replacer.evict(), None);
    }
}
