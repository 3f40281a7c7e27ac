//! Ordering keys and queue orientation
//!
//! Every entry in a [`PairingQueue`](crate::queue::PairingQueue) is an
//! [`OrderingKey`]: a caller-chosen `identity`, a `priority`, and a
//! `tie_break` that makes equal priorities resolve deterministically.
//!
//! Whether the queue yields the smallest or the largest key first is fixed at
//! the type level by an [`Orientation`] marker:
//!
//! - [`MinFirst`]: smaller priority first, ties go to the smaller `tie_break`
//! - [`MaxFirst`]: larger priority first, ties go to the larger `tie_break`
//!
//! The orientation is monomorphized into the merge loops, so there is no
//! runtime branch on it.
//!
//! # Example
//!
//! ```rust
//! use arena_pairing_queue::{MaxFirst, MinFirst, OrderingKey};
//!
//! let a = OrderingKey::new(1, 5, 2.0);
//! let b = OrderingKey::new(2, 3, 2.0);
//!
//! assert!(b.precedes::<MinFirst>(&a));
//! assert!(a.precedes::<MaxFirst>(&b));
//! ```

use std::fmt;

/// A queue entry: identity, tie-breaker and priority
///
/// `identity` is carried along for the caller and never takes part in
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderingKey<P> {
    /// Caller's handle for the entry (typically a graph vertex)
    pub identity: usize,
    /// Secondary key; should be unique among live entries
    pub tie_break: u64,
    /// Primary key
    pub priority: P,
}

impl<P> OrderingKey<P> {
    /// Creates a key
    #[inline]
    pub const fn new(identity: usize, tie_break: u64, priority: P) -> Self {
        Self {
            identity,
            tie_break,
            priority,
        }
    }

    /// Returns true if `self` comes out of an `O`-oriented queue strictly
    /// before `other`
    #[inline]
    pub fn precedes<O: Orientation>(&self, other: &Self) -> bool
    where
        P: PartialOrd,
    {
        O::precedes(self, other)
    }
}

impl<P: fmt::Display> fmt::Display for OrderingKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.identity, self.tie_break, self.priority
        )
    }
}

/// Marker trait selecting which end of the order a queue yields first.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait Orientation: sealed::Sealed + Copy + Default + fmt::Debug + 'static {
    /// Short name used in logs and `Debug` output
    const NAME: &'static str;

    /// Strict precedence: irreflexive, and total over keys whose
    /// `(priority, tie_break)` pairs differ
    fn precedes<P: PartialOrd>(a: &OrderingKey<P>, b: &OrderingKey<P>) -> bool;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::MinFirst {}
    impl Sealed for super::MaxFirst {}
}

/// Smallest `(priority, tie_break)` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinFirst;

/// Largest `(priority, tie_break)` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxFirst;

impl Orientation for MinFirst {
    const NAME: &'static str = "min-first";

    #[inline]
    fn precedes<P: PartialOrd>(a: &OrderingKey<P>, b: &OrderingKey<P>) -> bool {
        a.priority < b.priority || (a.priority == b.priority && a.tie_break < b.tie_break)
    }
}

impl Orientation for MaxFirst {
    const NAME: &'static str = "max-first";

    #[inline]
    fn precedes<P: PartialOrd>(a: &OrderingKey<P>, b: &OrderingKey<P>) -> bool {
        a.priority > b.priority || (a.priority == b.priority && a.tie_break > b.tie_break)
    }
}
