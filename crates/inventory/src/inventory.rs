//! Inventory capability contracts.
//!
//! [`Inventory`] is the minimal contract every storage must satisfy.
//! [`InventoryHandler`] adds the policy surface the network routes against
//! (access, acceptance, priority, stickiness). Plain inventories are lifted
//! into handlers by [`crate::PassThrough`].

use gridstore_core::NetworkId;

use crate::access::{AccessRestriction, ActionSource, Actionable};
use crate::query::QueryContext;
use crate::stack::{ResourceStack, StackList, StorageChannel};

/// Minimal inventory contract.
///
/// All operations take `&self`; implementations that hold mutable contents
/// use interior mutability, since one inventory can be reachable from several
/// handlers at once.
pub trait Inventory: Send + Sync + core::fmt::Debug {
    /// Store `input`, returning whatever could not be stored (`None` when
    /// everything was consumed).
    fn inject_items(
        &self,
        input: ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack>;

    /// Remove up to `request.amount()` of the requested resource, returning
    /// what was removed (`None` when nothing was).
    fn extract_items(
        &self,
        request: &ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack>;

    /// Merge everything this inventory can currently offer into `out`.
    fn available_items(&self, out: StackList, ctx: &mut QueryContext) -> StackList;

    /// Probe a single resource type.
    fn available_item(&self, request: &ResourceStack, ctx: &mut QueryContext)
    -> Option<ResourceStack>;

    fn channel(&self) -> StorageChannel;

    /// The network aggregation point this inventory ultimately fronts.
    ///
    /// Transparent wrappers (pass-through, monitor) forward the question to
    /// what they wrap; aggregation points answer with their own identity;
    /// everything else answers `None`.
    fn aggregation_point(&self) -> Option<NetworkId> {
        None
    }
}

/// Rich handler contract.
pub trait InventoryHandler: Inventory {
    fn access(&self) -> AccessRestriction;

    fn is_prioritized(&self, input: &ResourceStack) -> bool;

    fn can_accept(&self, input: &ResourceStack) -> bool;

    fn priority(&self) -> i32;

    fn slot(&self) -> i32;

    fn valid_for_pass(&self, pass: i32) -> bool;

    fn is_sticky(&self) -> bool;

    /// Contents may be listed even without read access.
    fn always_visible(&self) -> bool {
        false
    }
}
