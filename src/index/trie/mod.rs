//! Persistent trie keyed by byte strings.
//!
//! Every mutation ([`put`](Trie::put), [`remove`](Trie::remove)) returns a
//! *new* [`Trie`] and leaves the receiver untouched. The new version clones
//! only the nodes on the root-to-terminal path of the edited key; all other
//! subtrees are shared by `Arc` with the prior version (path cloning).
//!
//! ```text
//!        v1                 v2 = v1.put("ad", x)
//!       root ──a── n1       root'──a── n1'
//!        │          │          │         │ d
//!        b          c          b         └── [x]
//!        │          │          │
//!       [1]        [2]        (shared with v1: b-subtree, c-subtree)
//! ```
//!
//! # Concurrency
//! A snapshot is frozen forever, so any number of threads may read it with
//! zero synchronization, concurrently with writers deriving new snapshots
//! from any version. Publishing a shared "current" trie across threads is
//! the caller's problem (the catalog serializes or atomically swaps a
//! handle); this engine only guarantees the snapshots themselves.

mod node;

use std::any::Any;
use std::sync::Arc;

use node::{TrieNode, ValueRef};

/// An immutable handle over a trie root.
///
/// `Clone` is O(1): it shares the root. The empty trie has no root at all.
///
/// # Example
/// ```
/// use substratedb::Trie;
///
/// let t1 = Trie::new().put(b"table", 7u32);
/// let t2 = t1.put(b"table", 8u32);
///
/// // t1 is a frozen snapshot; t2 sees the overwrite.
/// assert_eq!(t1.get::<u32>(b"table"), Some(&7));
/// assert_eq!(t2.get::<u32>(b"table"), Some(&8));
/// ```
#[derive(Clone, Default)]
pub struct Trie {
    /// Shared ownership of the root node, or `None` for the empty trie.
    root: Option<Arc<TrieNode>>,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Look up `key` and borrow its value as type `T`.
    ///
    /// Returns `None` if any edge on the path is missing, if the terminal
    /// node carries no value, or if the stored value is not a `T`. A type
    /// mismatch is a routine miss, not an error: the catalog stores values
    /// of many types under one namespace and probes with the type it
    /// expects.
    ///
    /// The borrow is valid for as long as this snapshot is kept alive.
    /// No side effects; concurrent readers need no synchronization.
    pub fn get<T: Any>(&self, key: &[u8]) -> Option<&T> {
        let mut node = self.root.as_ref()?;
        for byte in key {
            node = node.children.get(byte)?;
        }
        node.value.as_ref()?.downcast_ref::<T>()
    }

    /// Store `value` under `key`, returning the new trie version.
    ///
    /// `value` is moved into the new terminal node exactly once, so `T`
    /// does not need to be `Clone`. Re-putting an existing key replaces
    /// the value; the replacement may even have a different type, in which
    /// case a `get` with the old type misses.
    ///
    /// An empty key attaches the value to the root node itself, preserving
    /// any existing children.
    pub fn put<T: Any + Send + Sync>(&self, key: &[u8], value: T) -> Trie {
        let value: ValueRef = Arc::new(value);
        let new_root = put_path(self.root.as_deref(), key, value);
        Trie {
            root: Some(Arc::new(new_root)),
        }
    }

    /// Clear the value at `key`, returning the new trie version.
    ///
    /// If the key is absent, or present but value-less, this is a no-op
    /// and the returned handle shares the receiver's root. Otherwise the
    /// path is cloned, the terminal's value is dropped, and every node
    /// that became a bare leaf is pruned - up to the deepest ancestor that
    /// still carries a value or another child. A terminal that has
    /// children survives as a value-less internal node.
    pub fn remove(&self, key: &[u8]) -> Trie {
        let Some(root) = self.root.as_deref() else {
            return self.clone();
        };
        match remove_path(root, key) {
            // Key not present: share the existing root unchanged.
            None => self.clone(),
            Some(new_root) => Trie {
                root: new_root.map(Arc::new),
            },
        }
    }
}

/// Rebuild the path for `key` with the terminal holding `value`.
///
/// Each level shallow-clones the existing node (re-sharing all off-path
/// children) or starts a fresh one where the trie had no node at all.
/// One new node per key byte plus the terminal; nothing else is allocated.
fn put_path(node: Option<&TrieNode>, key: &[u8], value: ValueRef) -> TrieNode {
    match key.split_first() {
        // Terminal: keep the children, engage the value.
        None => {
            let mut terminal = node.map_or_else(TrieNode::new, TrieNode::shallow_clone);
            terminal.value = Some(value);
            terminal
        }
        Some((&edge, rest)) => {
            let mut clone = node.map_or_else(TrieNode::new, TrieNode::shallow_clone);
            let child = clone.children.get(&edge).cloned();
            let new_child = put_path(child.as_deref(), rest, value);
            clone.children.insert(edge, Arc::new(new_child));
            clone
        }
    }
}

/// Remove the value at `key` below `node`.
///
/// Returns `None` when the key is not present (the caller keeps the old
/// root). Otherwise `Some(replacement)`, where a `None` replacement means
/// this node became a bare leaf and the parent must drop its edge - that
/// is how pruning propagates upward until it reaches a node that is still
/// needed.
fn remove_path(node: &TrieNode, key: &[u8]) -> Option<Option<TrieNode>> {
    match key.split_first() {
        None => {
            // Terminal without a value: nothing to remove.
            node.value.as_ref()?;
            if node.children.is_empty() {
                Some(None)
            } else {
                Some(Some(TrieNode::with_children(node.children.clone())))
            }
        }
        Some((&edge, rest)) => {
            let child = node.children.get(&edge)?;
            let outcome = remove_path(child, rest)?;

            let mut clone = node.shallow_clone();
            match outcome {
                Some(new_child) => {
                    clone.children.insert(edge, Arc::new(new_child));
                }
                None => {
                    clone.children.remove(&edge);
                }
            }

            if clone.children.is_empty() && !clone.is_value_node() {
                Some(None)
            } else {
                Some(Some(clone))
            }
        }
    }
}
