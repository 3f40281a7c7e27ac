//! Fixed-capacity pairing queue
//!
//! [`PairingQueue`] owns one arena of nodes, reserved at construction and
//! reused across search runs. Each [`emplace`](PairingQueue::emplace) claims
//! the next unused slot; slots are never returned individually, only
//! wholesale by [`reset`](PairingQueue::reset). After construction no
//! operation allocates.
//!
//! # Time Complexity
//!
//! | Operation | Complexity          |
//! |-----------|---------------------|
//! | `emplace` | O(1)                |
//! | `top`     | O(1)                |
//! | `pop`     | O(log n) amortized  |
//! | `reset`   | O(1)                |
//!
//! # Capacity
//!
//! Capacity bounds the number of insertions between resets, not the number
//! of live entries: a popped entry's slot stays claimed until the next
//! `reset`. Size the queue for the total pushes one search performs.
//!
//! # Example
//!
//! ```rust
//! use arena_pairing_queue::{MinQueue, QueueError};
//!
//! let mut queue: MinQueue<f64> = MinQueue::try_with_capacity(3)?;
//! queue.emplace(1, 0, 5.0)?;
//! queue.emplace(2, 0, 1.0)?;
//! queue.emplace(3, 0, 3.0)?;
//!
//! assert_eq!(queue.pop()?.identity, 2);
//! assert_eq!(queue.top()?.identity, 3);
//!
//! // All three slots are spent until the next reset
//! assert_eq!(
//!     queue.emplace(4, 0, 0.5),
//!     Err(QueueError::CapacityExceeded { capacity: 3 })
//! );
//! queue.reset();
//! assert!(queue.is_empty());
//! # Ok::<(), QueueError>(())
//! ```

use crate::error::{QueueError, Result};
use crate::node::{self, slot, Link, Node};
use crate::order::{MaxFirst, MinFirst, Orientation, OrderingKey};
use nonmax::NonMaxU32;
use std::fmt;
use std::marker::PhantomData;

/// Largest capacity a queue can be built with
///
/// Links are `u32` indices with `u32::MAX` reserved as the empty niche.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Arena-backed pairing heap with a fixed insertion budget
pub struct PairingQueue<P, O: Orientation = MinFirst> {
    /// Claimed slots; `arena.len()` is the number of insertions since reset.
    /// Capacity is reserved up front and never exceeded.
    arena: Vec<Node<P>>,
    capacity: usize,
    root: Link,
    /// Entries emplaced and not yet popped
    len: usize,
    _orientation: PhantomData<O>,
}

/// Queue yielding the smallest `(priority, tie_break)` first
pub type MinQueue<P> = PairingQueue<P, MinFirst>;

/// Queue yielding the largest `(priority, tie_break)` first
pub type MaxQueue<P> = PairingQueue<P, MaxFirst>;

impl<P: PartialOrd + Copy, O: Orientation> PairingQueue<P, O> {
    /// Creates a queue whose arena holds `capacity` insertions.
    ///
    /// # Errors
    ///
    /// - [`QueueError::CapacityTooLarge`] if `capacity > MAX_CAPACITY`
    /// - [`QueueError::OutOfMemory`] if the arena cannot be allocated
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        if capacity > MAX_CAPACITY {
            tracing::warn!(
                requested = capacity,
                max = MAX_CAPACITY,
                "pairing queue capacity too large"
            );
            return Err(QueueError::CapacityTooLarge {
                requested: capacity,
                max: MAX_CAPACITY,
            });
        }

        let mut arena = Vec::new();
        if arena.try_reserve_exact(capacity).is_err() {
            tracing::warn!(capacity, "pairing queue arena allocation failed");
            return Err(QueueError::OutOfMemory { capacity });
        }

        tracing::debug!(
            capacity,
            orientation = O::NAME,
            "pairing queue arena allocated"
        );
        Ok(Self {
            arena,
            capacity,
            root: None,
            len: 0,
            _orientation: PhantomData,
        })
    }

    /// Creates a queue whose arena holds `capacity` insertions.
    ///
    /// # Panics
    ///
    /// Panics if [`try_with_capacity`](Self::try_with_capacity) fails.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(queue) => queue,
            Err(err) => panic!("PairingQueue::with_capacity: {err}"),
        }
    }

    /// Forgets every entry and makes all slots available again.
    ///
    /// The arena allocation is kept.
    #[inline]
    pub fn reset(&mut self) {
        tracing::trace!(
            consumed = self.arena.len(),
            live = self.len,
            "pairing queue reset"
        );
        // `P: Copy`, so this only rewinds the length.
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns true if no live entries remain
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Insertions allowed between resets
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots claimed since the last reset, including popped entries
    #[inline]
    pub fn consumed(&self) -> usize {
        self.arena.len()
    }

    /// Insertions left before the next reset is required
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.arena.len()
    }

    /// Inserts a fresh entry.
    ///
    /// # Errors
    ///
    /// [`QueueError::CapacityExceeded`] if every slot has been claimed since
    /// the last reset. Nothing is written in that case.
    #[inline]
    pub fn emplace(&mut self, identity: usize, tie_break: u64, priority: P) -> Result<()> {
        self.push(OrderingKey::new(identity, tie_break, priority))
    }

    /// Inserts a fresh entry; see [`emplace`](Self::emplace).
    pub fn push(&mut self, key: OrderingKey<P>) -> Result<()> {
        debug_assert!(
            key.priority.partial_cmp(&key.priority).is_some(),
            "priority is not totally ordered (NaN?)"
        );

        let at = self.arena.len();
        let index = match NonMaxU32::new(at as u32) {
            Some(index) if at < self.capacity => index,
            _ => {
                tracing::debug!(capacity = self.capacity, "pairing queue capacity exceeded");
                return Err(QueueError::CapacityExceeded {
                    capacity: self.capacity,
                });
            }
        };

        // Within the reservation, so this never reallocates.
        self.arena.push(Node::new(key));
        self.root = Some(node::merge_roots::<P, O>(&mut self.arena, index, self.root));
        self.len += 1;
        Ok(())
    }

    /// Returns a copy of the first entry without removing it.
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if the queue is empty.
    #[inline]
    pub fn top(&self) -> Result<OrderingKey<P>> {
        match self.peek() {
            Some(key) => Ok(*key),
            None => {
                tracing::debug!("top on empty pairing queue");
                Err(QueueError::EmptyQueue)
            }
        }
    }

    /// Borrows the first entry, or `None` if the queue is empty
    #[inline]
    pub fn peek(&self) -> Option<&OrderingKey<P>> {
        self.root.map(|root| &self.arena[slot(root)].key)
    }

    /// Removes and returns the first entry.
    ///
    /// The entry's slot stays claimed until the next [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if the queue is empty.
    pub fn pop(&mut self) -> Result<OrderingKey<P>> {
        let Some(root) = self.root else {
            tracing::debug!("pop on empty pairing queue");
            return Err(QueueError::EmptyQueue);
        };

        let popped = &mut self.arena[slot(root)];
        let key = popped.key;
        let children = popped.desc.take();

        self.root = children.map(|first| node::merge_pairs::<P, O>(&mut self.arena, first));
        self.len -= 1;
        Ok(key)
    }

    /// Pops entries in order until the queue is empty.
    ///
    /// Dropping the iterator early leaves the remaining entries in place.
    pub fn drain_ordered(&mut self) -> DrainOrdered<'_, P, O> {
        DrainOrdered { queue: self }
    }

    /// Walks the tree from the root and checks its structure.
    ///
    /// Returns true if every parent precedes-or-ties each of its children,
    /// every reachable node lies in a claimed slot and is reached exactly
    /// once, the root has no sibling, and the node count equals
    /// [`len`](Self::len). Allocates; meant for tests and verification.
    pub fn verify_heap_property(&self) -> bool {
        let Some(root) = self.root else {
            return self.len == 0;
        };
        if self.arena[slot(root)].next.is_some() {
            return false;
        }

        let mut seen = vec![false; self.arena.len()];
        let mut stack = vec![root];
        let mut count = 0usize;

        while let Some(parent) = stack.pop() {
            let p = slot(parent);
            if p >= self.arena.len() || seen[p] {
                return false;
            }
            seen[p] = true;
            count += 1;

            let mut child = self.arena[p].desc;
            while let Some(c) = child {
                if slot(c) >= self.arena.len() {
                    return false;
                }
                if O::precedes(&self.arena[slot(c)].key, &self.arena[p].key) {
                    return false;
                }
                stack.push(c);
                child = self.arena[slot(c)].next;
                if count + stack.len() > self.arena.len() {
                    // A sibling cycle would otherwise spin forever
                    return false;
                }
            }
        }

        count == self.len
    }
}

impl<P, O: Orientation> fmt::Debug for PairingQueue<P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairingQueue")
            .field("orientation", &O::NAME)
            .field("capacity", &self.capacity)
            .field("consumed", &self.arena.len())
            .field("len", &self.len)
            .finish()
    }
}

/// Iterator returned by [`PairingQueue::drain_ordered`]
pub struct DrainOrdered<'a, P: PartialOrd + Copy, O: Orientation> {
    queue: &'a mut PairingQueue<P, O>,
}

impl<P: PartialOrd + Copy, O: Orientation> Iterator for DrainOrdered<'_, P, O> {
    type Item = OrderingKey<P>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<P: PartialOrd + Copy, O: Orientation> ExactSizeIterator for DrainOrdered<'_, P, O> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    #[test]
    fn test_basic_operations() {
        let mut queue: MinQueue<i32> = MinQueue::with_capacity(8);
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);

        queue.emplace(0, 0, 5).unwrap();
        queue.emplace(1, 1, 3).unwrap();
        queue.emplace(2, 2, 7).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.top(), Ok(OrderingKey::new(1, 1, 3)));
        assert_eq!(queue.pop(), Ok(OrderingKey::new(1, 1, 3)));
        assert_eq!(queue.top(), Ok(OrderingKey::new(0, 0, 5)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.consumed(), 3);
        assert_eq!(queue.remaining(), 5);
    }

    #[test]
    fn test_max_first() {
        let mut queue: MaxQueue<i32> = MaxQueue::with_capacity(4);
        for (i, p) in [4, 9, 1, 6].into_iter().enumerate() {
            queue.emplace(i, i as u64, p).unwrap();
        }
        let order: Vec<i32> = queue.drain_ordered().map(|k| k.priority).collect();
        assert_eq!(order, vec![9, 6, 4, 1]);
    }

    #[test]
    fn test_empty_errors() {
        let mut queue: MinQueue<u32> = MinQueue::with_capacity(2);
        assert_eq!(queue.top(), Err(QueueError::EmptyQueue));
        assert_eq!(queue.pop(), Err(QueueError::EmptyQueue));
        assert_eq!(queue.peek(), None);
    }

    /// Counts events dispatched on the current thread
    struct EventCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for EventCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }
        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
        fn event(&self, _: &tracing::Event<'_>) {
            self.0.fetch_add(1, AtomicOrdering::SeqCst);
        }
        fn enter(&self, _: &tracing::span::Id) {}
        fn exit(&self, _: &tracing::span::Id) {}
    }

    #[test]
    fn test_empty_top_is_logged_but_peek_is_silent() {
        let events = Arc::new(AtomicUsize::new(0));
        let queue: MinQueue<u32> = MinQueue::with_capacity(1);

        tracing::subscriber::with_default(EventCounter(Arc::clone(&events)), || {
            assert_eq!(queue.peek(), None);
            assert_eq!(events.load(AtomicOrdering::SeqCst), 0);

            assert_eq!(queue.top(), Err(QueueError::EmptyQueue));
            assert_eq!(events.load(AtomicOrdering::SeqCst), 1);
        });
    }

    #[test]
    fn test_capacity_counts_popped_slots() {
        let mut queue: MinQueue<u32> = MinQueue::with_capacity(2);
        queue.emplace(0, 0, 1).unwrap();
        queue.pop().unwrap();
        queue.emplace(1, 1, 2).unwrap();
        assert_eq!(
            queue.emplace(2, 2, 3),
            Err(QueueError::CapacityExceeded { capacity: 2 })
        );
        // Rejected insert leaves the queue untouched
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.top().unwrap().identity, 1);
        assert!(queue.verify_heap_property());
    }

    #[test]
    fn test_zero_capacity() {
        let mut queue: MinQueue<u8> = MinQueue::with_capacity(0);
        assert_eq!(
            queue.emplace(0, 0, 0),
            Err(QueueError::CapacityExceeded { capacity: 0 })
        );
        assert!(queue.is_empty());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_capacity_too_large() {
        let result = MinQueue::<u8>::try_with_capacity(MAX_CAPACITY + 1);
        assert!(matches!(result, Err(QueueError::CapacityTooLarge { .. })));
    }

    #[test]
    fn test_reset_keeps_allocation() {
        let mut queue: MinQueue<u16> = MinQueue::with_capacity(16);
        for i in 0..16 {
            queue.emplace(i, i as u64, (i * 3 % 7) as u16).unwrap();
        }
        let ptr = queue.arena.as_ptr();
        queue.reset();
        assert!(queue.is_empty());
        assert_eq!(queue.consumed(), 0);
        for i in 0..16 {
            queue.emplace(i, i as u64, i as u16).unwrap();
        }
        assert_eq!(queue.arena.as_ptr(), ptr);
        assert!(queue.arena.capacity() >= 16);
    }

    #[test]
    fn test_verify_heap_property_through_pops() {
        let mut queue: MinQueue<i64> = MinQueue::with_capacity(64);
        for i in 0..64 {
            queue.emplace(i, i as u64, (i as i64 * 37) % 23).unwrap();
            assert!(queue.verify_heap_property());
        }
        while !queue.is_empty() {
            queue.pop().unwrap();
            assert!(queue.verify_heap_property());
        }
    }

    #[test]
    fn test_debug_output() {
        let queue: MaxQueue<f32> = MaxQueue::with_capacity(3);
        let debug = format!("{queue:?}");
        assert!(debug.contains("max-first"));
        assert!(debug.contains("capacity: 3"));
    }
}
