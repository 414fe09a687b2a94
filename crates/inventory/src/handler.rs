//! Policy decorator over a single inventory.
//!
//! A [`StorageHandler`] is what a storage device (drive, bus, interface)
//! puts between its inventory and the network. It adds priority, an access
//! restriction, whitelist/blacklist partitioning, an optional extract-side
//! filter and stickiness, and then delegates the actual data movement to the
//! wrapped inventory.
//!
//! Every policy rejection is an ordinary return value:
//! - refused injection hands back the whole input stack
//! - refused extraction or probing yields `None`
//! - hidden enumeration returns the caller's list unchanged

use std::sync::Arc;

use tracing::{debug, trace};

use gridstore_core::{NetworkId, StorageError, StorageResult};

use crate::access::{AccessRestriction, ActionSource, Actionable, IncludeExclude};
use crate::inventory::{Inventory, InventoryHandler};
use crate::partition::{DefaultPartitionList, PartitionList, partition_from_keys};
use crate::passthrough::PassThrough;
use crate::query::QueryContext;
use crate::settings::HandlerSettings;
use crate::stack::{ResourceStack, StackList, StorageChannel};

/// What a handler is attached to.
#[derive(Debug, Clone)]
pub enum Attachment {
    /// An inventory that already speaks the handler contract.
    Handler(Arc<dyn InventoryHandler>),
    /// A plain inventory, lifted through a [`PassThrough`].
    Plain(Arc<dyn Inventory>),
}

/// Extract-side predicate derived from the partition mode and the extract
/// partition list.
///
/// Built fresh on every call; the list may change between calls.
#[derive(Debug, Clone, Copy)]
pub struct ExtractFilter<'a> {
    mode: IncludeExclude,
    list: &'a dyn PartitionList,
}

impl ExtractFilter<'_> {
    pub fn test(&self, input: &ResourceStack) -> bool {
        match self.mode {
            IncludeExclude::Whitelist => self.list.is_listed(input),
            IncludeExclude::Blacklist => !self.list.is_listed(input),
        }
    }
}

/// Decorating handler around exactly one inventory.
#[derive(Debug)]
pub struct StorageHandler {
    internal: Arc<dyn InventoryHandler>,
    priority: i32,
    whitelist: IncludeExclude,
    base_access: AccessRestriction,
    partition_list: Box<dyn PartitionList>,
    extract_partition_list: Box<dyn PartitionList>,
    sticky: bool,
    extract_filter_active: bool,

    // Derived from `base_access` and the wrapped inventory's access.
    cached_access: AccessRestriction,
    has_read_access: bool,
    has_write_access: bool,
}

impl StorageHandler {
    /// Attach a handler to an inventory of the given channel.
    ///
    /// Fails when the inventory belongs to a different channel.
    pub fn new(attachment: Attachment, channel: StorageChannel) -> StorageResult<Self> {
        let internal: Arc<dyn InventoryHandler> = match attachment {
            Attachment::Handler(handler) => {
                if handler.channel() != channel {
                    return Err(StorageError::channel_mismatch(channel, handler.channel()));
                }
                handler
            }
            Attachment::Plain(inventory) => Arc::new(PassThrough::new(inventory, channel)?),
        };

        let mut handler = Self {
            internal,
            priority: 0,
            whitelist: IncludeExclude::Whitelist,
            base_access: AccessRestriction::ReadWrite,
            partition_list: Box::new(DefaultPartitionList),
            extract_partition_list: Box::new(DefaultPartitionList),
            sticky: false,
            extract_filter_active: false,
            cached_access: AccessRestriction::None,
            has_read_access: false,
            has_write_access: false,
        };
        handler.refresh_access();
        Ok(handler)
    }

    pub fn internal(&self) -> &Arc<dyn InventoryHandler> {
        &self.internal
    }

    pub fn whitelist(&self) -> IncludeExclude {
        self.whitelist
    }

    pub fn set_whitelist(&mut self, whitelist: IncludeExclude) {
        self.whitelist = whitelist;
    }

    pub fn base_access(&self) -> AccessRestriction {
        self.base_access
    }

    pub fn set_base_access(&mut self, access: AccessRestriction) {
        self.base_access = access;
        self.refresh_access();
    }

    /// Recompute the effective access from the configured access and the
    /// wrapped inventory's current access.
    pub fn refresh_access(&mut self) {
        self.cached_access = self.base_access.restrict_permissions(self.internal.access());
        self.has_read_access = self.cached_access.can_read();
        self.has_write_access = self.cached_access.can_write();
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    pub fn partition_list(&self) -> &dyn PartitionList {
        self.partition_list.as_ref()
    }

    pub fn set_partition_list(&mut self, list: Box<dyn PartitionList>) {
        self.partition_list = list;
    }

    pub fn extract_partition_list(&self) -> &dyn PartitionList {
        self.extract_partition_list.as_ref()
    }

    pub fn set_extract_partition_list(&mut self, list: Box<dyn PartitionList>) {
        self.extract_partition_list = list;
    }

    pub fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
    }

    pub fn is_extract_filter_active(&self) -> bool {
        self.extract_filter_active
    }

    pub fn set_extract_filter_active(&mut self, active: bool) {
        self.extract_filter_active = active;
    }

    /// Apply a complete device configuration.
    pub fn apply_settings(&mut self, settings: &HandlerSettings) {
        self.priority = settings.priority;
        self.whitelist = settings.whitelist;
        self.sticky = settings.sticky;
        self.extract_filter_active = settings.extract_filter_active;
        self.partition_list = partition_from_keys(settings.partition.iter().cloned());
        self.extract_partition_list =
            partition_from_keys(settings.extract_partition.iter().cloned());
        self.set_base_access(settings.access);
    }

    /// Current configuration, as a device would persist it.
    pub fn settings(&self) -> HandlerSettings {
        HandlerSettings {
            priority: self.priority,
            whitelist: self.whitelist,
            access: self.base_access,
            sticky: self.sticky,
            extract_filter_active: self.extract_filter_active,
            partition: self.partition_list.keys(),
            extract_partition: self.extract_partition_list.keys(),
        }
    }

    pub fn extract_filter(&self) -> ExtractFilter<'_> {
        ExtractFilter {
            mode: self.whitelist,
            list: self.extract_partition_list.as_ref(),
        }
    }

    /// Whether the contents may be listed without read access.
    pub fn is_visible(&self) -> bool {
        self.internal.always_visible()
    }

    /// Cache key for enumeration: the aggregation point behind the wrapped
    /// inventory, if any.
    pub fn network_id(&self) -> Option<NetworkId> {
        self.internal.aggregation_point()
    }

    fn extract_filter_engaged(&self) -> bool {
        self.extract_filter_active && !self.extract_partition_list.is_empty()
    }

    fn collect_available<F>(&self, mut out: StackList, ctx: &mut QueryContext, filter: F) -> StackList
    where
        F: FnMut(&ResourceStack) -> bool,
    {
        let Some(network) = self.network_id() else {
            let mut pool = self
                .internal
                .available_items(self.channel().create_list(), ctx);
            pool.drain_matching_into(&mut out, filter);
            return out;
        };

        if !ctx.is_cached(network) {
            debug!(%network, iteration = %ctx.token(), "caching network enumeration");
            let snapshot = self
                .internal
                .available_items(self.channel().create_list(), ctx);
            ctx.store_pool(network, snapshot);
        }
        if let Some(pool) = ctx.pool_mut(network) {
            // Claimed entries leave the shared pool so that another handler
            // over the same network cannot report them again.
            let claimed = pool.drain_matching_into(&mut out, filter);
            trace!(%network, claimed, remaining = pool.len(), "drew from cached pool");
        }
        out
    }
}

impl Inventory for StorageHandler {
    fn inject_items(
        &self,
        input: ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        if !self.can_accept(&input) {
            trace!(resource = %input.key(), "injection refused");
            return Some(input);
        }
        self.internal.inject_items(input, mode, src)
    }

    fn extract_items(
        &self,
        request: &ResourceStack,
        mode: Actionable,
        src: &ActionSource,
    ) -> Option<ResourceStack> {
        if !self.has_read_access {
            trace!(resource = %request.key(), "extraction refused: no read access");
            return None;
        }
        if self.extract_filter_engaged() && !self.extract_filter().test(request) {
            trace!(resource = %request.key(), "extraction refused: filtered");
            return None;
        }
        self.internal.extract_items(request, mode, src)
    }

    fn available_items(&self, out: StackList, ctx: &mut QueryContext) -> StackList {
        if !self.has_read_access && !self.is_visible() {
            return out;
        }

        if self.extract_filter_engaged() {
            let filter = self.extract_filter();
            self.collect_available(out, ctx, |stack| filter.test(stack))
        } else {
            self.collect_available(out, ctx, |_| true)
        }
    }

    fn available_item(
        &self,
        request: &ResourceStack,
        ctx: &mut QueryContext,
    ) -> Option<ResourceStack> {
        if !self.has_read_access && !self.is_visible() {
            return None;
        }
        if self.extract_filter_engaged() && !self.extract_filter().test(request) {
            return None;
        }
        self.internal.available_item(request, ctx)
    }

    fn channel(&self) -> StorageChannel {
        self.internal.channel()
    }
}

impl InventoryHandler for StorageHandler {
    fn access(&self) -> AccessRestriction {
        self.cached_access
    }

    fn is_prioritized(&self, input: &ResourceStack) -> bool {
        match self.whitelist {
            IncludeExclude::Whitelist => {
                self.partition_list.is_listed(input) || self.internal.is_prioritized(input)
            }
            IncludeExclude::Blacklist => false,
        }
    }

    fn can_accept(&self, input: &ResourceStack) -> bool {
        if !self.has_write_access {
            return false;
        }
        match self.whitelist {
            IncludeExclude::Blacklist if self.partition_list.is_listed(input) => false,
            IncludeExclude::Blacklist => self.internal.can_accept(input),
            IncludeExclude::Whitelist if self.partition_list.is_empty() => {
                self.internal.can_accept(input)
            }
            IncludeExclude::Whitelist => {
                self.partition_list.is_listed(input) && self.internal.can_accept(input)
            }
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn slot(&self) -> i32 {
        self.internal.slot()
    }

    fn valid_for_pass(&self, _pass: i32) -> bool {
        true
    }

    fn is_sticky(&self) -> bool {
        self.sticky || self.internal.is_sticky()
    }
}
