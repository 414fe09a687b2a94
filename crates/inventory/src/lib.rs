//! Storage-handler decoration layer.
//!
//! Every inventory that joins a storage network passes through a
//! [`StorageHandler`], which layers access restriction, partitioning and
//! extract filtering over it. Inventories that front a whole sub-network
//! ([`NetworkInventoryHandler`]) have their enumeration memoized per query in
//! an [`IterationCache`] carried by the [`QueryContext`].
//!
//! Pure in-process logic: no IO, no async.

pub mod access;
pub mod handler;
pub mod inventory;
pub mod memory;
pub mod monitor;
pub mod network;
pub mod partition;
pub mod passthrough;
pub mod query;
pub mod settings;
pub mod stack;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{AccessRestriction, ActionSource, Actionable, IncludeExclude, StorageFilter};
pub use handler::{Attachment, ExtractFilter, StorageHandler};
pub use inventory::{Inventory, InventoryHandler};
pub use memory::MemoryInventory;
pub use monitor::MonitorInventory;
pub use network::NetworkInventoryHandler;
pub use partition::{DefaultPartitionList, PartitionList, PrecisePartitionList};
pub use passthrough::PassThrough;
pub use query::{IterationCache, IterationToken, QueryContext};
pub use settings::HandlerSettings;
pub use stack::{ResourceKey, ResourceStack, StackList, StorageChannel};
