//! In-memory storage cell.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::access::{AccessRestriction, ActionSource, Actionable};
use crate::inventory::{Inventory, InventoryHandler};
use crate::query::QueryContext;
use crate::stack::{ResourceKey, ResourceStack, StackList, StorageChannel};

/// Thread-safe in-memory inventory with an optional total capacity.
///
/// - No IO
/// - Native access and stickiness are fixed at construction
/// - Simulated operations never change contents
#[derive(Debug)]
pub struct MemoryInventory {
    channel: StorageChannel,
    contents: Mutex<StackList>,
    capacity: Option<u64>,
    access: AccessRestriction,
    sticky: bool,
}

impl MemoryInventory {
    pub fn new(channel: StorageChannel) -> Self {
        Self {
            channel,
            contents: Mutex::new(channel.create_list()),
            capacity: None,
            access: AccessRestriction::ReadWrite,
            sticky: false,
        }
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_access(mut self, access: AccessRestriction) -> Self {
        self.access = access;
        self
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn with_contents(self, stacks: impl IntoIterator<Item = ResourceStack>) -> Self {
        {
            let mut contents = self.lock();
            for stack in stacks {
                contents.add(stack);
            }
        }
        self
    }

    /// Snapshot of the current contents.
    pub fn contents(&self) -> StackList {
        self.lock().clone()
    }

    pub fn stored(&self, key: &ResourceKey) -> u64 {
        self.lock().amount_of(key)
    }

    // A poisoned lock still guards consistent data: every mutation below is a
    // single StackList call.
    fn lock(&self) -> MutexGuard<'_, StackList> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inventory for MemoryInventory {
    fn inject_items(
        &self,
        input: ResourceStack,
        mode: Actionable,
        _src: &ActionSource,
    ) -> Option<ResourceStack> {
        if input.is_empty() {
            return None;
        }
        let mut contents = self.lock();
        let free = match self.capacity {
            Some(capacity) => capacity.saturating_sub(contents.total_amount()),
            None => u64::MAX,
        };
        let accepted = input.amount().min(free);
        if accepted > 0 && !mode.is_simulation() {
            contents.add(input.with_amount(accepted));
        }

        let leftover = input.amount() - accepted;
        (leftover > 0).then(|| input.with_amount(leftover))
    }

    fn extract_items(
        &self,
        request: &ResourceStack,
        mode: Actionable,
        _src: &ActionSource,
    ) -> Option<ResourceStack> {
        let mut contents = self.lock();
        if mode.is_simulation() {
            let available = contents.amount_of(request.key()).min(request.amount());
            return (available > 0).then(|| request.with_amount(available));
        }
        contents.take(request.key(), request.amount())
    }

    fn available_items(&self, mut out: StackList, _ctx: &mut QueryContext) -> StackList {
        for stack in self.lock().iter() {
            out.add(stack);
        }
        out
    }

    fn available_item(
        &self,
        request: &ResourceStack,
        _ctx: &mut QueryContext,
    ) -> Option<ResourceStack> {
        self.lock().find(request.key())
    }

    fn channel(&self) -> StorageChannel {
        self.channel
    }
}

impl InventoryHandler for MemoryInventory {
    fn access(&self) -> AccessRestriction {
        self.access
    }

    fn is_prioritized(&self, input: &ResourceStack) -> bool {
        self.lock().amount_of(input.key()) > 0
    }

    fn can_accept(&self, _input: &ResourceStack) -> bool {
        match self.capacity {
            Some(capacity) => self.lock().total_amount() < capacity,
            None => true,
        }
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
        self.sticky
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::IterationToken;

    fn cobble(amount: u64) -> ResourceStack {
        ResourceStack::new("minecraft:cobblestone", amount)
    }

    #[test]
    fn inject_respects_capacity() {
        let cell = MemoryInventory::new(StorageChannel::Items).with_capacity(100);

        let leftover = cell.inject_items(cobble(150), Actionable::Modulate, &ActionSource::Base);

        assert_eq!(leftover, Some(cobble(50)));
        assert_eq!(cell.stored(cobble(0).key()), 100);
        assert!(!cell.can_accept(&cobble(1)));
    }

    #[test]
    fn simulation_leaves_contents_untouched() {
        let cell = MemoryInventory::new(StorageChannel::Items).with_contents([cobble(10)]);

        assert_eq!(cell.inject_items(cobble(5), Actionable::Simulate, &ActionSource::Base), None);
        assert_eq!(
            cell.extract_items(&cobble(4), Actionable::Simulate, &ActionSource::Base),
            Some(cobble(4))
        );
        assert_eq!(cell.stored(cobble(0).key()), 10);
    }

    #[test]
    fn extract_returns_at_most_what_is_stored() {
        let cell = MemoryInventory::new(StorageChannel::Items).with_contents([cobble(3)]);

        let got = cell.extract_items(&cobble(64), Actionable::Modulate, &ActionSource::Base);

        assert_eq!(got, Some(cobble(3)));
        assert_eq!(
            cell.extract_items(&cobble(1), Actionable::Modulate, &ActionSource::Base),
            None
        );
    }

    #[test]
    fn enumeration_merges_into_caller_list() {
        let cell = MemoryInventory::new(StorageChannel::Items).with_contents([cobble(3)]);
        let mut ctx = QueryContext::new(IterationToken::new(1));
        let mut out = StorageChannel::Items.create_list();
        out.add(cobble(2));

        let out = cell.available_items(out, &mut ctx);

        assert_eq!(out.amount_of(cobble(0).key()), 5);
    }
}
