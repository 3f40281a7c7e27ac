//! Arena-resident pairing-heap nodes and their merge algorithms
//!
//! A heap is a leftmost-child/right-sibling tree laid out in a slice of
//! [`Node`]s. Links are arena indices rather than pointers:
//!
//! - `desc` points at the head of a node's child list
//! - `next` points at the following sibling in whatever list the node is on
//!
//! Every function here takes the arena slice explicitly, so the borrow checker
//! sees a single `&mut` for the whole tree and no node ever owns another.
//!
//! # Merge discipline
//!
//! [`merge_roots`] is the only primitive: the loser of one comparison
//! becomes the new first child of the winner. [`merge_pairs`] reduces a sibling
//! list to a single root with the standard two-pass pairing scheme, which is
//! what gives delete-min its O(log n) amortized bound.

use crate::order::{Orientation, OrderingKey};
use nonmax::NonMaxU32;

/// Position of a node in the arena
pub(crate) type Index = NonMaxU32;

/// A possibly-absent link. `Option<NonMaxU32>` is the same size as `u32`.
pub(crate) type Link = Option<Index>;

#[inline(always)]
pub(crate) fn slot(index: Index) -> usize {
    index.get() as usize
}

/// One arena slot
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<P> {
    pub(crate) key: OrderingKey<P>,
    pub(crate) next: Link,
    pub(crate) desc: Link,
}

impl<P> Node<P> {
    #[inline]
    pub(crate) fn new(key: OrderingKey<P>) -> Self {
        Self {
            key,
            next: None,
            desc: None,
        }
    }
}

/// Puts root `node` and the optional root `other` into heap order.
///
/// Returns the surviving root, with its `next` cleared.
#[inline]
pub(crate) fn merge_roots<P: PartialOrd, O: Orientation>(
    arena: &mut [Node<P>],
    node: Index,
    other: Link,
) -> Index {
    let Some(other) = other else {
        return node;
    };
    let winner = merge_roots_unsafe::<P, O>(arena, node, other);
    arena[slot(winner)].next = None;
    winner
}

/// Compares once and links the loser under the winner.
///
/// Does not clear the winner's `next`.
#[inline]
fn merge_roots_unsafe<P: PartialOrd, O: Orientation>(
    arena: &mut [Node<P>],
    a: Index,
    b: Index,
) -> Index {
    if O::precedes(&arena[slot(a)].key, &arena[slot(b)].key) {
        merge_roots_unchecked::<P, O>(arena, a, b)
    } else {
        merge_roots_unchecked::<P, O>(arena, b, a)
    }
}

/// Links `loser` as the first child of `winner`.
///
/// The caller has already compared the pair: `loser` must not strictly
/// precede `winner`. The winner's `next` is left as it was.
#[inline]
fn merge_roots_unchecked<P: PartialOrd, O: Orientation>(
    arena: &mut [Node<P>],
    winner: Index,
    loser: Index,
) -> Index {
    debug_assert_ne!(winner, loser, "cannot merge a node with itself");
    debug_assert!(
        !O::precedes(&arena[slot(loser)].key, &arena[slot(winner)].key),
        "merge_roots_unchecked called with the order reversed"
    );

    arena[slot(loser)].next = arena[slot(winner)].desc;
    arena[slot(winner)].desc = Some(loser);
    winner
}

/// Two-pass pairing merge of the sibling list starting at `first`.
///
/// Pass one merges adjacent pairs left to right and threads the winners back
/// through `next` in reverse order; an odd trailing node joins unmerged.
/// Pass two folds that reversed chain into one root. No allocation.
pub(crate) fn merge_pairs<P: PartialOrd, O: Orientation>(
    arena: &mut [Node<P>],
    first: Index,
) -> Index {
    let mut a = first;
    let mut paired: Link = None;

    let mut acc = loop {
        match arena[slot(a)].next {
            Some(b) => {
                let rest = arena[slot(b)].next;
                let winner = merge_roots_unsafe::<P, O>(arena, a, b);
                arena[slot(winner)].next = paired;
                paired = Some(winner);
                match rest {
                    Some(c) => a = c,
                    None => break winner,
                }
            }
            None => {
                arena[slot(a)].next = paired;
                break a;
            }
        }
    };

    // The last pair formed sits at the head, so folding from the head is
    // right-to-left in the original sibling order.
    let mut pending = arena[slot(acc)].next;
    while let Some(node) = pending {
        pending = arena[slot(node)].next;
        acc = merge_roots_unsafe::<P, O>(arena, node, acc);
    }

    arena[slot(acc)].next = None;
    acc
}
