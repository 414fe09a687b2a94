//! Pass-through adapter: lifts a plain [`Inventory`] into an [`InventoryHandler`].

use std::sync::Arc;

use gridstore_core::{NetworkId, StorageError, StorageResult};

use crate::access::{AccessRestriction, ActionSource, Actionable};
use crate::inventory::{Inventory, InventoryHandler};
use crate::query::QueryContext;
use crate::stack::{ResourceStack, StackList, StorageChannel};

/// Neutral policy around a plain inventory.
///
/// Full access, accepts anything the inventory takes, never prioritizes and
/// is never sticky. Data movement goes straight to the wrapped inventory.
#[derive(Debug, Clone)]
pub struct PassThrough {
    internal: Arc<dyn Inventory>,
    channel: StorageChannel,
}

impl PassThrough {
    pub fn new(internal: Arc<dyn Inventory>, channel: StorageChannel) -> StorageResult<Self> {
        if internal.channel() != channel {
            return Err(StorageError::channel_mismatch(channel, internal.channel()));
        }
        Ok(Self { internal, channel })
    }

    pub fn internal(&self) -> &Arc<dyn Inventory> {
        &self.internal
    }
}

impl Inventory for PassThrough {
    fn inject_items(
        &self,
        input: ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        self.internal.inject_items(input, mode, src)
    }

    fn extract_items(
        &self,
        request: &ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        self.internal.extract_items(request, mode, src)
    }

    fn available_items(&self, out: StackList, ctx: &mut QueryContext) -> StackList {
        self.internal.available_items(out, ctx)
    }

    fn available_item(
        &self,
        request: &ResourceStack,
        ctx: &mut QueryContext,
    ) -> Option<ResourceStack> {
        self.internal.available_item(request, ctx)
    }

    fn channel(&self) -> StorageChannel {
        self.channel
    }

    fn aggregation_point(&self) -> Option<NetworkId> {
        self.internal.aggregation_point()
    }
}

impl InventoryHandler for PassThrough {
    fn access(&self) -> AccessRestriction {
        AccessRestriction::ReadWrite
    }

    fn is_prioritized(&self, _input: &ResourceStack) -> bool {
        false
    }

    fn can_accept(&self, _input: &ResourceStack) -> bool {
        true
    }

    fn priority(&self) -> i32 {
        0
    }

    fn slot(&self) -> i32 {
        0
    }

    fn valid_for_pass(&self, _pass: i32) -> bool {
        true
    }

    fn is_sticky(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryInventory;

    #[test]
    fn rejects_wrapping_across_channels() {
        let fluids: Arc<dyn Inventory> = Arc::new(MemoryInventory::new(StorageChannel::Fluids));
        let err = PassThrough::new(fluids, StorageChannel::Items).unwrap_err();
        assert_eq!(err, StorageError::channel_mismatch("items", "fluids"));
    }

    #[test]
    fn reports_neutral_policy_over_a_restricted_inventory() {
        let cell = MemoryInventory::new(StorageChannel::Items)
            .with_access(AccessRestriction::Read)
            .with_sticky(true);
        let pass = PassThrough::new(Arc::new(cell), StorageChannel::Items).unwrap();
        let dirt = ResourceStack::new("minecraft:dirt", 1);

        assert_eq!(pass.access(), AccessRestriction::ReadWrite);
        assert!(pass.can_accept(&dirt));
        assert!(!pass.is_prioritized(&dirt));
        assert!(!pass.is_sticky());
    }
}
