//! Domain events
//!
//! Messages that travel between the mutation sources, the cache facade and
//! the invalidation bus.

pub mod invalidation;
pub mod mutation;

pub use invalidation::InvalidationMessage;
pub use mutation::MutationEvent;
