//! Monitor adapter with a display mode.

use std::sync::Arc;

use gridstore_core::NetworkId;

use crate::access::{AccessRestriction, ActionSource, Actionable, StorageFilter};
use crate::inventory::{Inventory, InventoryHandler};
use crate::query::QueryContext;
use crate::stack::{ResourceStack, StackList, StorageChannel};

/// Watches a handler and decides how its contents are displayed.
///
/// In [`StorageFilter::None`] mode the contents are always visible, which lets
/// an operator inspect an access-restricted terminal without being able to
/// extract from it.
#[derive(Debug, Clone)]
pub struct MonitorInventory {
    internal: Arc<dyn InventoryHandler>,
    mode: StorageFilter,
}

impl MonitorInventory {
    pub fn new(internal: Arc<dyn InventoryHandler>, mode: StorageFilter) -> Self {
        Self { internal, mode }
    }

    pub fn mode(&self) -> StorageFilter {
        self.mode
    }

    pub fn set_mode(&mut self, mode: StorageFilter) {
        self.mode = mode;
    }

    pub fn internal(&self) -> &Arc<dyn InventoryHandler> {
        &self.internal
    }
}

impl Inventory for MonitorInventory {
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
        self.internal.channel()
    }

    fn aggregation_point(&self) -> Option<NetworkId> {
        self.internal.aggregation_point()
    }
}

impl InventoryHandler for MonitorInventory {
    fn access(&self) -> AccessRestriction {
        self.internal.access()
    }

    fn is_prioritized(&self, input: &ResourceStack) -> bool {
        self.internal.is_prioritized(input)
    }

    fn can_accept(&self, input: &ResourceStack) -> bool {
        self.internal.can_accept(input)
    }

    fn priority(&self) -> i32 {
        self.internal.priority()
    }

    fn slot(&self) -> i32 {
        self.internal.slot()
    }

    fn valid_for_pass(&self, pass: i32) -> bool {
        self.internal.valid_for_pass(pass)
    }

    fn is_sticky(&self) -> bool {
        self.internal.is_sticky()
    }

    fn always_visible(&self) -> bool {
        self.mode == StorageFilter::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryInventory;

    #[test]
    fn visibility_follows_display_mode() {
        let cell: Arc<dyn InventoryHandler> = Arc::new(MemoryInventory::new(StorageChannel::Items));
        let mut monitor = MonitorInventory::new(cell, StorageFilter::ExtractableOnly);
        assert!(!monitor.always_visible());

        monitor.set_mode(StorageFilter::None);
        assert!(monitor.always_visible());
    }
}
