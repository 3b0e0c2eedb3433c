//! Top-down splay tree
//!
//! Every access splays the accessed key (or the last node visited while
//! looking for it) to the root. No balance invariant is kept; the cost of a
//! sequence of operations is amortized O(log n) per operation, while a single
//! operation may take linear time.
//!
//! Because lookups reshape the tree, even queries take `&mut self`. Node
//! references returned by queries stay valid until the next mutating call.

use crate::error::{Result, TraceModelError};
use crate::index::comparator::{KeyComparator, NaturalOrder};
use crate::index::iter::{Iter, Keys, Values};
use std::cmp::Ordering;
use std::fmt;

type Link<K, V> = Option<Box<SplayNode<K, V>>>;

/// A tree node: one key/value association plus its subtrees
pub struct SplayNode<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> SplayNode<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(SplayNode {
            key,
            value,
            left: None,
            right: None,
        })
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn left(&self) -> Option<&SplayNode<K, V>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&SplayNode<K, V>> {
        self.right.as_deref()
    }

    /// Left-most node of the subtree rooted here
    pub fn min(&self) -> &SplayNode<K, V> {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node
    }

    /// Right-most node of the subtree rooted here
    pub fn max(&self) -> &SplayNode<K, V> {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        node
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SplayNode<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayNode")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Splay `root` on the key described by `order`.
///
/// `order(k)` gives the ordering of the searched key relative to `k`. Nodes
/// passed on the way down are collected into a left tree (all smaller than the
/// searched key) and a right tree (all larger), then reassembled under the
/// last node reached.
fn splay<K, V, F>(mut root: Box<SplayNode<K, V>>, mut order: F) -> Box<SplayNode<K, V>>
where
    F: FnMut(&K) -> Ordering,
{
    // Each node's right (left tree) or left (right tree) link points to the
    // next entry; links are filled in during reassembly.
    let mut left_tree: Vec<Box<SplayNode<K, V>>> = Vec::new();
    let mut right_tree: Vec<Box<SplayNode<K, V>>> = Vec::new();

    loop {
        match order(&root.key) {
            Ordering::Equal => break,
            Ordering::Less => {
                let mut next = match root.left.take() {
                    Some(next) => next,
                    None => break,
                };
                if order(&next.key) == Ordering::Less {
                    // zig-zig: rotate right
                    root.left = next.right.take();
                    next.right = Some(root);
                    root = next;
                    next = match root.left.take() {
                        Some(next) => next,
                        None => break,
                    };
                }
                right_tree.push(root);
                root = next;
            }
            Ordering::Greater => {
                let mut next = match root.right.take() {
                    Some(next) => next,
                    None => break,
                };
                if order(&next.key) == Ordering::Greater {
                    // zig-zig: rotate left
                    root.right = next.left.take();
                    next.left = Some(root);
                    root = next;
                    next = match root.right.take() {
                        Some(next) => next,
                        None => break,
                    };
                }
                left_tree.push(root);
                root = next;
            }
        }
    }

    let mut left = root.left.take();
    while let Some(mut node) = left_tree.pop() {
        node.right = left;
        left = Some(node);
    }

    let mut right = root.right.take();
    while let Some(mut node) = right_tree.pop() {
        node.left = right;
        right = Some(node);
    }

    root.left = left;
    root.right = right;
    root
}

fn missing_key() -> TraceModelError {
    TraceModelError::key_not_found("no such key in index")
}

/// Self-adjusting ordered map.
///
/// `C` decides key order: [`NaturalOrder`] for `K: Ord`, or any
/// `Fn(&K, &K) -> Ordering` passed to [`SplayTree::with_comparator`]. Both
/// produce identical shapes for identical key orders.
pub struct SplayTree<K, V, C = NaturalOrder> {
    root: Link<K, V>,
    len: usize,
    comparator: C,
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Create an empty tree ordered by `K`'s `Ord`
    pub fn new() -> Self {
        SplayTree {
            root: None,
            len: 0,
            comparator: NaturalOrder,
        }
    }
}

impl<K: Ord, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: KeyComparator<K>> SplayTree<K, V, C> {
    /// Create an empty tree ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        SplayTree {
            root: None,
            len: 0,
            comparator,
        }
    }

    fn splay(&mut self, key: &K) {
        let comparator = &self.comparator;
        if let Some(root) = self.root.take() {
            self.root = Some(splay(root, |node_key| comparator.compare(key, node_key)));
        }
    }

    fn root_holds(&self, key: &K) -> bool {
        self.root
            .as_deref()
            .is_some_and(|root| self.comparator.compare(key, &root.key) == Ordering::Equal)
    }

    /// Insert `key` with `value`.
    ///
    /// If the key is already present the existing value is kept and `false` is
    /// returned; the key is still splayed to the root.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let root = match self.root.take() {
            Some(root) => root,
            None => {
                self.root = Some(SplayNode::leaf(key, value));
                self.len = 1;
                return true;
            }
        };

        let comparator = &self.comparator;
        let mut root = splay(root, |node_key| comparator.compare(&key, node_key));

        let node = match comparator.compare(&key, &root.key) {
            Ordering::Equal => {
                self.root = Some(root);
                return false;
            }
            Ordering::Greater => {
                let mut node = SplayNode::leaf(key, value);
                node.right = root.right.take();
                node.left = Some(root);
                node
            }
            Ordering::Less => {
                let mut node = SplayNode::leaf(key, value);
                node.left = root.left.take();
                node.right = Some(root);
                node
            }
        };

        self.root = Some(node);
        self.len += 1;
        true
    }

    /// Remove `key` and return its value
    ///
    /// # Errors
    /// Returns `KeyNotFound` if the key is absent (including on an empty tree)
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let root = self.root.take().ok_or_else(missing_key)?;

        let comparator = &self.comparator;
        let root = splay(root, |node_key| comparator.compare(key, node_key));
        if comparator.compare(key, &root.key) != Ordering::Equal {
            self.root = Some(root);
            return Err(missing_key());
        }

        let SplayNode {
            value, left, right, ..
        } = *root;

        self.root = match left {
            None => right,
            Some(left) => {
                // Every key in `left` is smaller, so the splayed root has no
                // right child and can take the old right subtree.
                let mut new_root = splay(left, |node_key| comparator.compare(key, node_key));
                new_root.right = right;
                Some(new_root)
            }
        };
        self.len -= 1;
        Ok(value)
    }

    /// Splay on `key` and return its node if present
    pub fn find(&mut self, key: &K) -> Option<&SplayNode<K, V>> {
        self.splay(key);
        if self.root_holds(key) {
            self.root.as_deref()
        } else {
            None
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.find(key).map(SplayNode::value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.splay(key);
        if self.root_holds(key) {
            self.root.as_deref_mut().map(|root| &mut root.value)
        } else {
            None
        }
    }

    pub fn contains_key(&mut self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Node with the greatest key `<= key`
    pub fn find_greatest_less_or_equal(&mut self, key: &K) -> Option<&SplayNode<K, V>> {
        self.splay(key);
        let root = self.root.as_deref()?;
        if self.comparator.compare(&root.key, key) != Ordering::Greater {
            Some(root)
        } else {
            root.left().map(SplayNode::max)
        }
    }

    /// Node with the least key `>= key`
    pub fn find_least_greater_or_equal(&mut self, key: &K) -> Option<&SplayNode<K, V>> {
        self.splay(key);
        let root = self.root.as_deref()?;
        if self.comparator.compare(&root.key, key) != Ordering::Less {
            Some(root)
        } else {
            root.right().map(SplayNode::min)
        }
    }
}

impl<K, V, C> SplayTree<K, V, C> {
    /// Smallest entry. Walks the left spine without splaying.
    pub fn find_min(&self) -> Option<&SplayNode<K, V>> {
        self.root.as_deref().map(SplayNode::min)
    }

    /// Largest entry. Walks the right spine without splaying.
    pub fn find_max(&self) -> Option<&SplayNode<K, V>> {
        self.root.as_deref().map(SplayNode::max)
    }

    pub fn root(&self) -> Option<&SplayNode<K, V>> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&SplayNode<K, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        // Iterative teardown: a splay tree may degenerate into a long chain,
        // and recursive `Box` drops would follow it frame by frame.
        let mut stack: Vec<Box<SplayNode<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Entries in key order, without splaying
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C> Drop for SplayTree<K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SplayTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a SplayTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: KeyComparator<K>> Extend<(K, V)> for SplayTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SplayTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = SplayTree::new();
        tree.extend(iter);
        tree
    }
}
