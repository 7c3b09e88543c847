//! Iterators and cursors over the tree's insertion-order list.
//!
//! Everything here walks the intrusive order list, never the trie itself:
//! one step is one link hop, regardless of how deep the entry sits.

use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::list::{Linked, ListHead, RawIter};
use crate::node::DataNode;
use crate::tree::RadixTree;

/// Shared-reference traversal of a [`RadixTree`] in insertion order.
pub struct Iter<'a, K, V> {
    raw: RawIter,
    _marker: PhantomData<&'a DataNode<K, V>>,
}

impl<K, V> Iter<'_, K, V> {
    pub(crate) fn new(raw: RawIter) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.raw.next()?;
        let node = unsafe { DataNode::from_link(link).as_ref() };
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let link = self.raw.next_back()?;
        let node = unsafe { DataNode::from_link(link).as_ref() };
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

/// Mutable-value traversal of a [`RadixTree`] in insertion order.
pub struct IterMut<'a, K, V> {
    raw: RawIter,
    _marker: PhantomData<&'a mut DataNode<K, V>>,
}

impl<K, V> IterMut<'_, K, V> {
    pub(crate) fn new(raw: RawIter) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.raw.next()?;
        let node = unsafe { &mut *DataNode::from_link(link).as_ptr() };
        Some((&node.key, &mut node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let link = self.raw.next_back()?;
        let node = unsafe { &mut *DataNode::from_link(link).as_ptr() };
        Some((&node.key, &mut node.value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning traversal; drains the tree front to back.
pub struct IntoIter<K, V> {
    tree: RadixTree<K, V>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(tree: RadixTree<K, V>) -> Self {
        Self { tree }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.tree.order.first()?;
        Some(unsafe { self.tree.remove_data(DataNode::from_link(first)) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// A mutable position over a tree's order list.
///
/// The cursor sits either on an entry or on the "ghost" position past the
/// last entry (an empty tree has only the ghost). Removal at the cursor
/// needs no key descent: the entry's own back-pointers reach its owning
/// branch directly, so eviction is a couple of pointer moves plus whatever
/// dead ancestors the removal leaves to collapse.
///
/// # Examples
///
/// ```rust
/// use ordix::RadixTree;
///
/// let mut tree = RadixTree::<u64, &str>::new();
/// tree.insert(1, "one");
/// tree.insert(2, "two");
///
/// let mut cursor = tree.cursor_front_mut();
/// assert_eq!(cursor.remove_current(), Some((1, "one")));
/// assert_eq!(cursor.current().map(|(k, _)| *k), Some(2));
/// ```
pub struct CursorMut<'a, K, V> {
    tree: &'a mut RadixTree<K, V>,
    pos: NonNull<ListHead>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) fn new(tree: &'a mut RadixTree<K, V>, pos: NonNull<ListHead>) -> Self {
        Self { tree, pos }
    }

    fn ghost(&self) -> NonNull<ListHead> {
        self.tree.order.sentinel()
    }

    /// The entry under the cursor, or `None` at the ghost position.
    pub fn current(&mut self) -> Option<(&K, &mut V)> {
        if self.pos == self.ghost() {
            return None;
        }
        let node = unsafe { &mut *DataNode::<K, V>::from_link(self.pos).as_ptr() };
        Some((&node.key, &mut node.value))
    }

    /// Step towards newer entries, wrapping from the last entry to the
    /// ghost position and from the ghost position to the first entry.
    pub fn move_next(&mut self) {
        self.pos = unsafe { self.pos.as_ref().next };
    }

    /// Step towards older entries; the mirror of [`CursorMut::move_next`].
    pub fn move_prev(&mut self) {
        self.pos = unsafe { self.pos.as_ref().prev };
    }

    /// Remove the entry under the cursor and step to its successor.
    /// Returns `None` at the ghost position.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.pos == self.ghost() {
            return None;
        }
        let node = unsafe { DataNode::from_link(self.pos) };
        self.pos = unsafe { self.pos.as_ref().next };
        Some(unsafe { self.tree.remove_data(node) })
    }
}

// Same reasoning as for the tree itself: the iterators hold borrows of
// tree-confined links.
unsafe impl<K: Sync, V: Sync> Send for Iter<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for Iter<'_, K, V> {}
unsafe impl<K: Send, V: Send> Send for IterMut<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}
