use std::mem;
use std::ptr::NonNull;

use crate::list::{Linked, ListHead};

/// Bits of key consumed per trie level.
pub(crate) const BRANCH_BITS: u32 = 6;
/// Children per branch node.
pub(crate) const BRANCH_FACTOR: usize = 1 << BRANCH_BITS;

/// A non-empty slot. Data nodes appear only at height 0; the parent branch
/// exclusively owns whatever sits in its slots.
pub(crate) enum Child<K, V> {
    Branch(Box<BranchNode<K, V>>),
    Data(Box<DataNode<K, V>>),
}

/// Internal trie node.
///
/// `occupancy` is always the exact count of non-empty slots; a branch left
/// with zero occupants by an erase is dead and gets collapsed. `parent` is
/// `None` only for the root.
pub(crate) struct BranchNode<K, V> {
    pub(crate) parent: Option<NonNull<BranchNode<K, V>>>,
    pub(crate) height: u32,
    pub(crate) occupancy: u16,
    pub(crate) offset: u16,
    pub(crate) slots: [Option<Child<K, V>>; BRANCH_FACTOR],
}

impl<K, V> BranchNode<K, V> {
    pub(crate) fn boxed(
        height: u32,
        parent: Option<NonNull<BranchNode<K, V>>>,
        offset: u16,
    ) -> Box<Self> {
        Box::new(Self {
            parent,
            height,
            occupancy: 0,
            offset,
            slots: std::array::from_fn(|_| None),
        })
    }
}

/// Leaf record: one key/value pair, threaded into the tree's order list
/// through its embedded link.
pub(crate) struct DataNode<K, V> {
    pub(crate) link: ListHead,
    pub(crate) parent: NonNull<BranchNode<K, V>>,
    pub(crate) offset: u16,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> DataNode<K, V> {
    pub(crate) fn boxed(
        key: K,
        value: V,
        parent: NonNull<BranchNode<K, V>>,
        offset: u16,
    ) -> Box<Self> {
        Box::new(Self {
            link: ListHead::unlinked(),
            parent,
            offset,
            key,
            value,
        })
    }
}

unsafe impl<K, V> Linked for DataNode<K, V> {
    const LINK_OFFSET: usize = mem::offset_of!(DataNode<K, V>, link);
}
