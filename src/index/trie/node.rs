//! Trie node - one character-edge step of a key.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Type-erased, shared ownership of a stored value.
///
/// Values go in as whatever type the caller instantiated `put` with and
/// come back out through a checked downcast in `get`. `Send + Sync` is
/// required so snapshots can cross threads.
pub(crate) type ValueRef = Arc<dyn Any + Send + Sync>;

/// A single immutable node of the persistent trie.
///
/// A node is never mutated once it is reachable from a published
/// [`Trie`](super::Trie). Mutations build a *new* node (see
/// [`shallow_clone`](TrieNode::shallow_clone)) and re-share every child
/// `Arc` that is not on the edited path. Children always extend the key by
/// one more byte, so the structure is a DAG with strictly increasing depth
/// and reference counting alone reclaims it.
pub(crate) struct TrieNode {
    /// Child edge per key byte. Entries are shared across trie versions.
    pub(crate) children: HashMap<u8, Arc<TrieNode>>,

    /// The stored value, if this node terminates a key.
    pub(crate) value: Option<ValueRef>,
}

impl TrieNode {
    /// Create a value-less node with no children.
    pub(crate) fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }

    /// Create a value-less node that adopts an existing children map.
    ///
    /// Used when a value node is converted back to a plain internal node
    /// during removal.
    pub(crate) fn with_children(children: HashMap<u8, Arc<TrieNode>>) -> Self {
        Self {
            children,
            value: None,
        }
    }

    /// Copy this node one level deep.
    ///
    /// The children map is copied entry-by-entry, but each entry only bumps
    /// the child's reference count; no subtree is duplicated. This is the
    /// building block of path cloning.
    pub(crate) fn shallow_clone(&self) -> Self {
        Self {
            children: self.children.clone(),
            value: self.value.clone(),
        }
    }

    /// Whether this node carries a value.
    pub(crate) fn is_value_node(&self) -> bool {
        self.value.is_some()
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        Self::new()
    }
}
