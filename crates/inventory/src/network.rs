//! Network aggregation handler: one inventory fronting a whole sub-network.

use std::sync::Arc;

use tracing::debug;

use gridstore_core::{NetworkId, StorageError, StorageResult};

use crate::access::{AccessRestriction, ActionSource, Actionable};
use crate::inventory::{Inventory, InventoryHandler};
use crate::query::QueryContext;
use crate::stack::{ResourceStack, StackList, StorageChannel};

/// Aggregates the member handlers of one storage network.
///
/// Identity, not contents, is what matters to the enumeration cache: every
/// handler that reaches this aggregation point shares its `NetworkId`.
///
/// Members are kept in descending priority order (stable for equal
/// priorities). Injection offers a stack to writable members that already
/// prioritize it before the rest; extraction and enumeration walk the
/// readable members in order.
#[derive(Debug)]
pub struct NetworkInventoryHandler {
    id: NetworkId,
    channel: StorageChannel,
    members: Vec<Arc<dyn InventoryHandler>>,
}

impl NetworkInventoryHandler {
    pub fn new(channel: StorageChannel) -> Self {
        Self::with_id(NetworkId::new(), channel)
    }

    pub fn with_id(id: NetworkId, channel: StorageChannel) -> Self {
        Self {
            id,
            channel,
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> NetworkId {
        self.id
    }

    pub fn members(&self) -> &[Arc<dyn InventoryHandler>] {
        &self.members
    }

    /// Order is fixed by the member's priority when it is added.
    pub fn add_member(&mut self, member: Arc<dyn InventoryHandler>) -> StorageResult<()> {
        if member.channel() != self.channel {
            return Err(StorageError::channel_mismatch(self.channel, member.channel()));
        }
        let priority = member.priority();
        let at = self
            .members
            .iter()
            .position(|m| m.priority() < priority)
            .unwrap_or(self.members.len());
        self.members.insert(at, member);
        Ok(())
    }

    fn readable(&self) -> impl Iterator<Item = &Arc<dyn InventoryHandler>> {
        self.members.iter().filter(|m| m.access().can_read())
    }

    fn writable(&self) -> impl Iterator<Item = &Arc<dyn InventoryHandler>> {
        self.members.iter().filter(|m| m.access().can_write())
    }

    fn offer(
        &self,
        mut remaining: ResourceStack,
        prioritized: bool,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        for member in self.writable() {
            if member.is_prioritized(&remaining) != prioritized || !member.can_accept(&remaining) {
                continue;
            }
            match member.inject_items(remaining, mode, src) {
                Some(leftover) => remaining = leftover,
                None => return None,
            }
        }
        Some(remaining)
    }
}

impl Inventory for NetworkInventoryHandler {
    fn inject_items(
        &self,
        input: ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        let remaining = self.offer(input, true, mode, src)?;
        self.offer(remaining, false, mode, src)
    }

    fn extract_items(
        &self,
        request: &ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        let mut wanted = request.amount();
        let mut extracted = 0u64;
        for member in self.readable() {
            if wanted == 0 {
                break;
            }
            if let Some(got) = member.extract_items(&request.with_amount(wanted), mode, src) {
                let got = got.amount().min(wanted);
                wanted -= got;
                extracted += got;
            }
        }
        (extracted > 0).then(|| request.with_amount(extracted))
    }

    fn available_items(&self, mut out: StackList, ctx: &mut QueryContext) -> StackList {
        debug!(
            network = %self.id,
            iteration = %ctx.token(),
            members = self.members.len(),
            "enumerating network"
        );
        for member in self.readable() {
            out = member.available_items(out, ctx);
        }
        out
    }

    fn available_item(
        &self,
        request: &ResourceStack,
        ctx: &mut QueryContext,
    ) -> Option<ResourceStack> {
        let total = self
            .readable()
            .filter_map(|m| m.available_item(request, ctx))
            .fold(0u64, |acc, s| acc.saturating_add(s.amount()));
        (total > 0).then(|| request.with_amount(total))
    }

    fn channel(&self) -> StorageChannel {
        self.channel
    }

    fn aggregation_point(&self) -> Option<NetworkId> {
        Some(self.id)
    }
}

impl InventoryHandler for NetworkInventoryHandler {
    fn access(&self) -> AccessRestriction {
        AccessRestriction::ReadWrite
    }

    fn is_prioritized(&self, _input: &ResourceStack) -> bool {
        false
    }

    fn can_accept(&self, input: &ResourceStack) -> bool {
        self.writable().any(|m| m.can_accept(input))
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
    use crate::query::IterationToken;

    fn sand(amount: u64) -> ResourceStack {
        ResourceStack::new("minecraft:sand", amount)
    }

    fn cell(capacity: u64, contents: Vec<ResourceStack>) -> Arc<MemoryInventory> {
        Arc::new(
            MemoryInventory::new(StorageChannel::Items)
                .with_capacity(capacity)
                .with_contents(contents),
        )
    }

    #[test]
    fn inject_prefers_members_that_already_hold_the_resource() {
        let empty = cell(100, vec![]);
        let holding = cell(100, vec![sand(1)]);
        let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
        network.add_member(empty.clone()).unwrap();
        network.add_member(holding.clone()).unwrap();

        let leftover = network.inject_items(sand(10), Actionable::Modulate, &ActionSource::Base);

        assert_eq!(leftover, None);
        assert_eq!(holding.stored(sand(0).key()), 11);
        assert_eq!(empty.stored(sand(0).key()), 0);
    }

    #[test]
    fn inject_spills_over_and_reports_what_no_member_took() {
        let a = cell(5, vec![]);
        let b = cell(5, vec![]);
        let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
        network.add_member(a.clone()).unwrap();
        network.add_member(b.clone()).unwrap();

        let leftover = network.inject_items(sand(12), Actionable::Modulate, &ActionSource::Base);

        assert_eq!(leftover, Some(sand(2)));
        assert_eq!(a.stored(sand(0).key()) + b.stored(sand(0).key()), 10);
    }

    #[test]
    fn extract_gathers_across_members() {
        let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
        network.add_member(cell(100, vec![sand(3)])).unwrap();
        network.add_member(cell(100, vec![sand(4)])).unwrap();

        let got = network.extract_items(&sand(6), Actionable::Modulate, &ActionSource::Base);

        assert_eq!(got, Some(sand(6)));
        let mut ctx = QueryContext::new(IterationToken::new(1));
        assert_eq!(network.available_item(&sand(1), &mut ctx), Some(sand(1)));
    }

    #[test]
    fn enumeration_merges_every_member() {
        let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
        network.add_member(cell(100, vec![sand(3)])).unwrap();
        network.add_member(cell(100, vec![sand(4)])).unwrap();
        let mut ctx = QueryContext::new(IterationToken::new(1));

        let out = network.available_items(StorageChannel::Items.create_list(), &mut ctx);

        assert_eq!(out.amount_of(sand(0).key()), 7);
        assert_eq!(network.aggregation_point(), Some(network.id()));
    }

    #[test]
    fn write_only_members_are_neither_listed_nor_drained() {
        let sealed = Arc::new(
            MemoryInventory::new(StorageChannel::Items)
                .with_access(AccessRestriction::Write)
                .with_contents([sand(5)]),
        );
        let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
        network.add_member(sealed.clone()).unwrap();
        let mut ctx = QueryContext::new(IterationToken::new(1));

        let listed = network.available_items(StorageChannel::Items.create_list(), &mut ctx);
        let got = network.extract_items(&sand(5), Actionable::Modulate, &ActionSource::Base);

        assert_eq!(listed.total_amount(), 0);
        assert_eq!(network.available_item(&sand(1), &mut ctx), None);
        assert_eq!(got, None);
        assert_eq!(sealed.stored(sand(0).key()), 5);
    }

    #[test]
    fn read_only_members_refuse_injection() {
        let archive = Arc::new(
            MemoryInventory::new(StorageChannel::Items).with_access(AccessRestriction::Read),
        );
        let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
        network.add_member(archive.clone()).unwrap();

        let leftover = network.inject_items(sand(5), Actionable::Modulate, &ActionSource::Base);

        assert_eq!(leftover, Some(sand(5)));
        assert!(!network.can_accept(&sand(5)));
        assert_eq!(archive.stored(sand(0).key()), 0);
    }

    #[test]
    fn members_must_share_the_network_channel() {
        let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
        let fluids = Arc::new(MemoryInventory::new(StorageChannel::Fluids));
        assert!(network.add_member(fluids).is_err());
    }
}
