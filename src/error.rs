//! Error type for queue operations

/// Errors reported by [`PairingQueue`](crate::queue::PairingQueue)
///
/// None of these are transient. `OutOfMemory` and `CapacityTooLarge` come from
/// construction; the rest are caller-contract violations surfaced at the call
/// that made them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum QueueError {
    /// The arena for `capacity` nodes could not be allocated
    #[error("failed to allocate arena for {capacity} nodes")]
    OutOfMemory {
        /// Requested number of slots
        capacity: usize,
    },
    /// The requested capacity cannot be addressed by the node links
    #[error("capacity {requested} exceeds the maximum of {max} nodes")]
    CapacityTooLarge {
        /// Requested number of slots
        requested: usize,
        /// Largest supported capacity
        max: usize,
    },
    /// Every arena slot has been claimed since the last reset
    #[error("queue capacity of {capacity} insertions exhausted; call reset() first")]
    CapacityExceeded {
        /// Capacity the queue was built with
        capacity: usize,
    },
    /// `top` or `pop` was called on an empty queue
    #[error("queue is empty")]
    EmptyQueue,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, QueueError>;
