//! SubstrateDB - core data-structure engines for a database kernel.
//!
//! This crate holds the two decision engines the rest of the kernel is built
//! on: a persistent (copy-on-write) trie used as a typed key-value index,
//! and an LRU-K replacer that picks buffer-pool eviction victims.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         SubstrateDB                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Catalog / Execution Layers (external)            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Engine (index/)                      │   │
//! │  │   Trie: immutable snapshots, path-sharing mutation      │   │
//! │  │   ┌──────────┐    Put/Remove    ┌──────────┐            │   │
//! │  │   │ Trie v1  │ ───────────────▶ │ Trie v2  │            │   │
//! │  │   └──────────┘  (shared nodes)  └──────────┘            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                                                                 │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │         BufferPoolManager (external)                    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Eviction Engine (buffer/replacer/)            │   │
//! │  │   LruKReplacer: per-frame access history + K-distance   │   │
//! │  │   victim selection behind a single latch                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The boxes marked external (buffer pool manager, disk manager, catalog)
//! live elsewhere in the kernel and consume these engines through the
//! interfaces re-exported below.
//!
//! # Modules
//! - [`common`] - Shared primitives (FrameId, Error, config)
//! - [`index`] - Index structures (persistent trie)
//! - [`buffer`] - Buffer eviction policies (LRU-K)
//!
//! # Quick Start
//! ```
//! use substratedb::index::trie::Trie;
//! use substratedb::buffer::replacer::LruKReplacer;
//! use substratedb::common::{AccessType, FrameId};
//!
//! // Every put returns a new snapshot; the old one is untouched.
//! let t1 = Trie::new().put(b"key", 42u32);
//! let t2 = t1.put(b"key", 43u32);
//! assert_eq!(t1.get::<u32>(b"key"), Some(&42));
//! assert_eq!(t2.get::<u32>(b"key"), Some(&43));
//!
//! // The replacer tracks per-frame access history with k = 2.
//! let replacer = LruKReplacer::new(8, 2);
//! replacer.record_access(FrameId::new(0), AccessType::Unknown).unwrap();
//! replacer.set_evictable(FrameId::new(0), true).unwrap();
//! assert_eq!(replacer.evict(), Some(FrameId::new(0)));
//! ```

// Core modules
pub mod buffer;
pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::DEFAULT_REPLACER_K;
pub use common::{AccessType, Error, FrameId, Result};

pub use buffer::replacer::LruKReplacer;
pub use index::trie::Trie;
