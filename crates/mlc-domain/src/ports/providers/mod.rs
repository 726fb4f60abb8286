//! Provider ports
//!
//! Contracts implemented in `mlc-providers`.

pub mod distributed_store;
pub mod entry_store;
pub mod invalidation_bus;

pub use distributed_store::DistributedStore;
pub use entry_store::{EntryStore, KeyMatcher};
pub use invalidation_bus::{InvalidationBus, InvalidationStream};
