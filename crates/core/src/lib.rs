//! `gridstore-core`: shared building blocks for the storage network.
//!
//! Identifiers, the error model and small marker traits. No IO, no storage
//! policy.

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{StorageError, StorageResult};
pub use id::{MachineId, NetworkId, PlayerId};
pub use value_object::ValueObject;
