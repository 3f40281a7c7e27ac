//! Fixed-capacity pairing-heap priority queue for best-first graph search
//!
//! This crate provides [`PairingQueue`], the frontier structure for
//! Dijkstra-style expansion loops that run many times in a row. The queue
//! is built on a pairing heap stored in a preallocated arena:
//!
//! - **Insert**: O(1), no allocation
//! - **Peek**: O(1)
//! - **Delete-min**: O(log n) amortized (two-pass pairing merge)
//! - **Reset**: O(1); the arena is reused by the next search
//!
//! Entries are [`OrderingKey`]s: a priority plus a `tie_break` that makes the
//! extraction order total and deterministic. Whether the smallest or largest
//! key comes out first is chosen by the [`Orientation`] type parameter
//! ([`MinFirst`] or [`MaxFirst`]).
//!
//! There is no `decrease_key`. A search that improves a distance pushes a
//! fresh entry and skips stale ones when they surface.
//!
//! # Example
//!
//! ```rust
//! use arena_pairing_queue::{MinQueue, QueueError};
//!
//! let mut queue: MinQueue<u32> = MinQueue::try_with_capacity(16)?;
//! queue.emplace(7, 0, 30)?;
//! queue.emplace(8, 1, 10)?;
//! queue.emplace(9, 2, 20)?;
//!
//! let order: Vec<usize> = queue.drain_ordered().map(|k| k.identity).collect();
//! assert_eq!(order, vec![8, 9, 7]);
//!
//! // Next search reuses the same arena
//! queue.reset();
//! assert_eq!(queue.remaining(), 16);
//! # Ok::<(), QueueError>(())
//! ```

pub mod error;
mod node;
pub mod order;
pub mod queue;

pub use error::{QueueError, Result};
pub use order::{MaxFirst, MinFirst, Orientation, OrderingKey};
pub use queue::{DrainOrdered, MaxQueue, MinQueue, PairingQueue, MAX_CAPACITY};
