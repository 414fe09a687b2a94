//! Test doubles shared by the unit tests of this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::access::{AccessRestriction, ActionSource, Actionable};
use crate::inventory::{Inventory, InventoryHandler};
use crate::memory::MemoryInventory;
use crate::query::QueryContext;
use crate::stack::{ResourceStack, StackList, StorageChannel};

/// A scriptable handler that counts how often it is reached.
#[derive(Debug)]
pub(crate) struct ProbeInventory {
    pub store: MemoryInventory,
    access: Mutex<AccessRestriction>,
    pub accepts: bool,
    pub prioritized: bool,
    pub sticky: bool,
    pub visible: bool,
    pub injects: AtomicUsize,
    pub extracts: AtomicUsize,
    pub enumerations: AtomicUsize,
}

impl ProbeInventory {
    pub fn new() -> Self {
        Self {
            store: MemoryInventory::new(StorageChannel::Items),
            access: Mutex::new(AccessRestriction::ReadWrite),
            accepts: true,
            prioritized: false,
            sticky: false,
            visible: false,
            injects: AtomicUsize::new(0),
            extracts: AtomicUsize::new(0),
            enumerations: AtomicUsize::new(0),
        }
    }

    pub fn holding(stacks: impl IntoIterator<Item = ResourceStack>) -> Self {
        let mut probe = Self::new();
        probe.store = MemoryInventory::new(StorageChannel::Items).with_contents(stacks);
        probe
    }

    /// Change the native access as a reconfigured cell would.
    pub fn set_access(&self, access: AccessRestriction) {
        *self.access.lock().unwrap() = access;
    }

    pub fn injects(&self) -> usize {
        self.injects.load(Ordering::SeqCst)
    }

    pub fn extracts(&self) -> usize {
        self.extracts.load(Ordering::SeqCst)
    }

    pub fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

impl Inventory for ProbeInventory {
    fn inject_items(
        &self,
        input: ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        self.injects.fetch_add(1, Ordering::SeqCst);
        self.store.inject_items(input, mode, src)
    }

    fn extract_items(
        &self,
        request: &ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        self.extracts.fetch_add(1, Ordering::SeqCst);
        self.store.extract_items(request, mode, src)
    }

    fn available_items(&self, out: StackList, ctx: &mut QueryContext) -> StackList {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        self.store.available_items(out, ctx)
    }

    fn available_item(
        &self,
        request: &ResourceStack,
        ctx: &mut QueryContext,
    ) -> Option<ResourceStack> {
        self.store.available_item(request, ctx)
    }

    fn channel(&self) -> StorageChannel {
        StorageChannel::Items
    }
}

impl InventoryHandler for ProbeInventory {
    fn access(&self) -> AccessRestriction {
        *self.access.lock().unwrap()
    }

    fn is_prioritized(&self, _input: &ResourceStack) -> bool {
        self.prioritized
    }

    fn can_accept(&self, _input: &ResourceStack) -> bool {
        self.accepts
    }

    fn priority(&self) -> i32 {
        0
    }

    fn slot(&self) -> i32 {
        3
    }

    fn valid_for_pass(&self, _pass: i32) -> bool {
        false
    }

    fn is_sticky(&self) -> bool {
        self.sticky
    }

    fn always_visible(&self) -> bool {
        self.visible
    }
}
