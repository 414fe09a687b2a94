//! Resource stacks and per-channel stack lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gridstore_core::{StorageError, StorageResult, ValueObject};

/// Kind of resource a list, inventory or handler deals in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageChannel {
    Items,
    Fluids,
}

impl StorageChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageChannel::Items => "items",
            StorageChannel::Fluids => "fluids",
        }
    }

    /// Create an empty list for this channel.
    pub fn create_list(self) -> StackList {
        StackList::new(self)
    }
}

impl core::fmt::Display for StorageChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource-type identity (e.g. `minecraft:iron_ingot`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(String);

impl ResourceKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a user-supplied key, rejecting blank input.
    pub fn parse(raw: &str) -> StorageResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StorageError::validation("resource key cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A quantity of one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceStack {
    key: ResourceKey,
    amount: u64,
}

impl ValueObject for ResourceStack {}

impl ResourceStack {
    pub fn new(key: impl Into<ResourceKey>, amount: u64) -> Self {
        Self {
            key: key.into(),
            amount,
        }
    }

    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// Same resource type, regardless of quantity.
    pub fn same_resource(&self, other: &ResourceStack) -> bool {
        self.key == other.key
    }

    /// Copy of this stack with a different quantity.
    pub fn with_amount(&self, amount: u64) -> Self {
        Self {
            key: self.key.clone(),
            amount,
        }
    }

    /// Merge two stacks of the same resource (quantities add, saturating).
    pub fn merge(&self, other: &ResourceStack) -> Self {
        debug_assert!(self.same_resource(other), "merging different resources");
        self.with_amount(self.amount.saturating_add(other.amount))
    }
}

/// A per-channel collection of stacks, keyed by resource type.
///
/// Adding a stack merges it into any existing entry of the same type. Empty
/// stacks are never stored. Iteration order is deterministic (by key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackList {
    channel: StorageChannel,
    entries: BTreeMap<ResourceKey, u64>,
}

impl StackList {
    pub fn new(channel: StorageChannel) -> Self {
        Self {
            channel,
            entries: BTreeMap::new(),
        }
    }

    pub fn channel(&self) -> StorageChannel {
        self.channel
    }

    pub fn add(&mut self, stack: ResourceStack) {
        if stack.is_empty() {
            return;
        }
        let slot = self.entries.entry(stack.key).or_insert(0);
        *slot = slot.saturating_add(stack.amount);
    }

    /// Merge every entry of `other` into `self`.
    pub fn merge_list(&mut self, other: StackList) -> StorageResult<()> {
        if other.channel != self.channel {
            return Err(StorageError::channel_mismatch(self.channel, other.channel));
        }
        for (key, amount) in other.entries {
            self.add(ResourceStack { key, amount });
        }
        Ok(())
    }

    pub fn find(&self, key: &ResourceKey) -> Option<ResourceStack> {
        self.entries
            .get(key)
            .map(|amount| ResourceStack::new(key.clone(), *amount))
    }

    pub fn amount_of(&self, key: &ResourceKey) -> u64 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    /// Remove up to `amount` of `key`, returning what was actually taken.
    pub fn take(&mut self, key: &ResourceKey, amount: u64) -> Option<ResourceStack> {
        let stored = self.entries.get_mut(key)?;
        let taken = amount.min(*stored);
        if taken == 0 {
            return None;
        }
        *stored -= taken;
        if *stored == 0 {
            self.entries.remove(key);
        }
        Some(ResourceStack::new(key.clone(), taken))
    }

    pub fn iter(&self) -> impl Iterator<Item = ResourceStack> + '_ {
        self.entries
            .iter()
            .map(|(key, amount)| ResourceStack::new(key.clone(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_amount(&self) -> u64 {
        self.entries
            .values()
            .fold(0u64, |acc, amount| acc.saturating_add(*amount))
    }

    /// Move every entry matching `predicate` out of `self` and into `out`.
    ///
    /// Returns the number of entries moved.
    pub fn drain_matching_into<F>(&mut self, out: &mut StackList, mut predicate: F) -> usize
    where
        F: FnMut(&ResourceStack) -> bool,
    {
        let mut moved = 0;
        self.entries.retain(|key, amount| {
            let stack = ResourceStack::new(key.clone(), *amount);
            if predicate(&stack) {
                out.add(stack);
                moved += 1;
                false
            } else {
                true
            }
        });
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iron(amount: u64) -> ResourceStack {
        ResourceStack::new("minecraft:iron_ingot", amount)
    }

    fn gold(amount: u64) -> ResourceStack {
        ResourceStack::new("minecraft:gold_ingot", amount)
    }

    #[test]
    fn add_merges_same_resource() {
        let mut list = StorageChannel::Items.create_list();
        list.add(iron(10));
        list.add(iron(5));
        list.add(gold(1));

        assert_eq!(list.len(), 2);
        assert_eq!(list.amount_of(iron(0).key()), 15);
        assert_eq!(list.total_amount(), 16);
    }

    #[test]
    fn empty_stacks_are_not_stored() {
        let mut list = StorageChannel::Items.create_list();
        list.add(iron(0));
        assert!(list.is_empty());
    }

    #[test]
    fn take_caps_at_stored_amount_and_removes_exhausted_entries() {
        let mut list = StorageChannel::Items.create_list();
        list.add(iron(4));

        assert_eq!(list.take(iron(0).key(), 10), Some(iron(4)));
        assert!(list.is_empty());
        assert_eq!(list.take(iron(0).key(), 1), None);
    }

    #[test]
    fn drain_matching_moves_only_matches() {
        let mut pool = StorageChannel::Items.create_list();
        pool.add(iron(7));
        pool.add(gold(3));

        let mut out = StorageChannel::Items.create_list();
        let moved = pool.drain_matching_into(&mut out, |s| s.key().as_str().contains("iron"));

        assert_eq!(moved, 1);
        assert_eq!(out.find(iron(0).key()), Some(iron(7)));
        assert_eq!(pool.find(gold(0).key()), Some(gold(3)));
        assert_eq!(pool.find(iron(0).key()), None);
    }

    #[test]
    fn merge_list_rejects_other_channel() {
        let mut items = StorageChannel::Items.create_list();
        let mut fluids = StorageChannel::Fluids.create_list();
        fluids.add(ResourceStack::new("minecraft:water", 1000));

        let err = items.merge_list(fluids).unwrap_err();
        assert_eq!(err, StorageError::channel_mismatch("items", "fluids"));
    }

    #[test]
    fn owned_strings_convert_into_keys() {
        let key = format!("minecraft:{}", "sand");
        let stack = ResourceStack::new(key, 2);
        assert_eq!(stack.key().as_str(), "minecraft:sand");
    }

    #[test]
    fn parse_rejects_blank_keys() {
        assert!(ResourceKey::parse("   ").is_err());
        assert_eq!(ResourceKey::parse(" a:b ").unwrap().as_str(), "a:b");
    }
}
