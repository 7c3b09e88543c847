//! Intrusive circular doubly-linked list substrate.
//!
//! Both containers in this crate thread their records through [`ListHead`]
//! links: the radix tree for its global insertion-order list, the hash map
//! for that plus its per-bucket chains. A link owns nothing: it only
//! threads and unthreads the record it is embedded in, and the record is
//! recovered from a link position by a fixed offset computation
//! ([`Linked`]), never by a runtime tag.
//!
//! Lists are sentinel-terminated, never null-terminated: following `next`
//! from any linked node eventually returns to that node.

use std::ptr::NonNull;

/// A two-pointer circular-list link embeddable inside any record.
#[derive(Clone, Copy)]
pub(crate) struct ListHead {
    pub(crate) next: NonNull<ListHead>,
    pub(crate) prev: NonNull<ListHead>,
}

impl ListHead {
    /// A link that is not yet a member of any list. Its pointers are
    /// dangling until [`ListHead::link_before`] or
    /// [`ListHead::init_cycle`] runs on it.
    pub(crate) fn unlinked() -> Self {
        Self {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        }
    }

    /// Make `node` a one-element cycle. This is how sentinels start out.
    ///
    /// # Safety
    ///
    /// `node` must be valid for writes and must stay at this address for
    /// as long as anything is linked through it.
    pub(crate) unsafe fn init_cycle(node: NonNull<ListHead>) {
        (*node.as_ptr()).next = node;
        (*node.as_ptr()).prev = node;
    }

    /// Thread `node` into the list immediately before `at`.
    ///
    /// # Safety
    ///
    /// `at` must be linked into a well-formed cycle and `node` must not be
    /// a member of any list.
    pub(crate) unsafe fn link_before(node: NonNull<ListHead>, at: NonNull<ListHead>) {
        let prev = at.as_ref().prev;
        (*node.as_ptr()).prev = prev;
        (*node.as_ptr()).next = at;
        (*prev.as_ptr()).next = node;
        (*at.as_ptr()).prev = node;
    }

    /// Unthread `node` from its list. The node's own pointers are left
    /// stale; relink or discard it.
    ///
    /// # Safety
    ///
    /// `node` must be linked into a well-formed cycle.
    pub(crate) unsafe fn unlink(node: NonNull<ListHead>) {
        let ListHead { next, prev } = *node.as_ptr();
        (*prev.as_ptr()).next = next;
        (*next.as_ptr()).prev = prev;
    }
}

/// Recovery of the record owning an embedded link.
///
/// # Safety
///
/// `LINK_OFFSET` must be the byte offset of a [`ListHead`] field within
/// `Self`, and every link passed to [`Linked::from_link`] must be that
/// field of a live `Self`.
pub(crate) unsafe trait Linked: Sized {
    const LINK_OFFSET: usize;

    /// Step from a link position back to the record containing it.
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn from_link(link: NonNull<ListHead>) -> NonNull<Self> {
        NonNull::new_unchecked(
            link.as_ptr()
                .cast::<u8>()
                .sub(Self::LINK_OFFSET)
                .cast::<Self>(),
        )
    }
}

/// The global insertion-order list: a heap-pinned sentinel threading live
/// records oldest-first. The sentinel is boxed so its address survives
/// moves of the owning container; the list never owns the records it
/// threads.
pub(crate) struct OrderList {
    sentinel: Box<ListHead>,
}

impl OrderList {
    pub(crate) fn new() -> Self {
        let mut sentinel = Box::new(ListHead::unlinked());
        unsafe { ListHead::init_cycle(NonNull::from(&mut *sentinel)) };
        Self { sentinel }
    }

    pub(crate) fn sentinel(&self) -> NonNull<ListHead> {
        NonNull::from(&*self.sentinel)
    }

    /// Append at the tail, so traversal from `sentinel.next` visits
    /// records in the order they arrived.
    pub(crate) fn push_back(&mut self, link: NonNull<ListHead>) {
        let sentinel = NonNull::from(&mut *self.sentinel);
        unsafe { ListHead::link_before(link, sentinel) };
    }

    /// The oldest linked record, if any.
    pub(crate) fn first(&self) -> Option<NonNull<ListHead>> {
        let first = self.sentinel.next;
        (first != self.sentinel()).then_some(first)
    }

    /// Forget all membership without touching the records themselves.
    pub(crate) fn reset(&mut self) {
        let sentinel = NonNull::from(&mut *self.sentinel);
        unsafe { ListHead::init_cycle(sentinel) };
    }

    pub(crate) fn raw_iter(&self, len: usize) -> RawIter {
        RawIter {
            front: self.sentinel.next,
            back: self.sentinel.prev,
            remaining: len,
        }
    }
}

/// Raw cursor over a span of linked records, shared by every public
/// iterator in the crate. The remaining count is the stop condition, so
/// the sentinel is never yielded and front/back traversal cannot cross.
#[derive(Clone)]
pub(crate) struct RawIter {
    front: NonNull<ListHead>,
    back: NonNull<ListHead>,
    remaining: usize,
}

impl RawIter {
    pub(crate) fn next(&mut self) -> Option<NonNull<ListHead>> {
        if self.remaining == 0 {
            return None;
        }
        let link = self.front;
        self.front = unsafe { link.as_ref().next };
        self.remaining -= 1;
        Some(link)
    }

    pub(crate) fn next_back(&mut self) -> Option<NonNull<ListHead>> {
        if self.remaining == 0 {
            return None;
        }
        let link = self.back;
        self.back = unsafe { link.as_ref().prev };
        self.remaining -= 1;
        Some(link)
    }

    pub(crate) fn len(&self) -> usize {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    struct Rec {
        tag: u32,
        link: ListHead,
    }

    unsafe impl Linked for Rec {
        const LINK_OFFSET: usize = mem::offset_of!(Rec, link);
    }

    fn linked_recs(tags: &[u32]) -> (OrderList, Vec<Box<Rec>>) {
        let mut list = OrderList::new();
        let mut recs: Vec<Box<Rec>> = tags
            .iter()
            .map(|&tag| {
                Box::new(Rec {
                    tag,
                    link: ListHead::unlinked(),
                })
            })
            .collect();
        for rec in recs.iter_mut() {
            list.push_back(NonNull::from(&mut rec.link));
        }
        (list, recs)
    }

    fn collect_tags(list: &OrderList, len: usize) -> Vec<u32> {
        let mut iter = list.raw_iter(len);
        let mut tags = Vec::new();
        while let Some(link) = iter.next() {
            tags.push(unsafe { Rec::from_link(link).as_ref().tag });
        }
        tags
    }

    #[test]
    fn push_back_preserves_arrival_order() {
        let (list, recs) = linked_recs(&[7, 3, 9, 1]);
        assert_eq!(collect_tags(&list, recs.len()), [7, 3, 9, 1]);
    }

    #[test]
    fn unlink_is_position_local() {
        let (list, mut recs) = linked_recs(&[0, 1, 2, 3]);
        unsafe { ListHead::unlink(NonNull::from(&mut recs[2].link)) };
        assert_eq!(collect_tags(&list, 3), [0, 1, 3]);
    }

    #[test]
    fn raw_iter_walks_both_ends() {
        let (list, recs) = linked_recs(&[4, 5, 6]);
        let mut iter = list.raw_iter(recs.len());
        let back = iter.next_back().unwrap();
        assert_eq!(unsafe { Rec::from_link(back).as_ref().tag }, 6);
        let front = iter.next().unwrap();
        assert_eq!(unsafe { Rec::from_link(front).as_ref().tag }, 4);
        assert_eq!(iter.len(), 1);
        let last = iter.next().unwrap();
        assert_eq!(unsafe { Rec::from_link(last).as_ref().tag }, 5);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn empty_list_has_no_first() {
        let list = OrderList::new();
        assert!(list.first().is_none());
        assert!(list.raw_iter(0).next().is_none());
    }
}
