//! Eviction policy implementations (replacers).
//!
//! Currently implements:
//! - [`LruKReplacer`] - backward K-distance policy (scan-resistant LRU)

mod lru_k;

pub use lru_k::LruKReplacer;
