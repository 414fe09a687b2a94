//! Partition lists: membership tests over resource types.

use std::collections::BTreeSet;

use crate::stack::{ResourceKey, ResourceStack};

/// Set-like membership test used for whitelist/blacklist filtering.
pub trait PartitionList: Send + Sync + core::fmt::Debug {
    fn is_listed(&self, input: &ResourceStack) -> bool;

    fn is_empty(&self) -> bool;

    /// Listed resource types, for display and persistence.
    fn keys(&self) -> Vec<ResourceKey>;
}

/// The unconfigured list: empty, lists nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultPartitionList;

impl PartitionList for DefaultPartitionList {
    fn is_listed(&self, _input: &ResourceStack) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        true
    }

    fn keys(&self) -> Vec<ResourceKey> {
        Vec::new()
    }
}

/// Exact resource-type membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecisePartitionList {
    keys: BTreeSet<ResourceKey>,
}

impl PrecisePartitionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<ResourceKey>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn remove(&mut self, key: &ResourceKey) -> bool {
        self.keys.remove(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<K: Into<ResourceKey>> FromIterator<K> for PrecisePartitionList {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PartitionList for PrecisePartitionList {
    fn is_listed(&self, input: &ResourceStack) -> bool {
        self.keys.contains(input.key())
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn keys(&self) -> Vec<ResourceKey> {
        self.keys.iter().cloned().collect()
    }
}

/// Build the list a set of configured keys calls for.
///
/// No keys means the unconfigured list.
pub fn partition_from_keys<I>(keys: I) -> Box<dyn PartitionList>
where
    I: IntoIterator<Item = ResourceKey>,
{
    let precise: PrecisePartitionList = keys.into_iter().collect();
    if precise.is_empty() {
        Box::new(DefaultPartitionList)
    } else {
        Box::new(precise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_lists_nothing() {
        let list = DefaultPartitionList;
        assert!(list.is_empty());
        assert!(!list.is_listed(&ResourceStack::new("minecraft:dirt", 1)));
    }

    #[test]
    fn precise_list_ignores_amount() {
        let list: PrecisePartitionList = ["minecraft:dirt"].into_iter().collect();
        assert!(list.is_listed(&ResourceStack::new("minecraft:dirt", 1)));
        assert!(list.is_listed(&ResourceStack::new("minecraft:dirt", 64)));
        assert!(!list.is_listed(&ResourceStack::new("minecraft:stone", 1)));
    }

    #[test]
    fn from_keys_picks_default_when_empty() {
        assert!(partition_from_keys(Vec::new()).is_empty());
        let list = partition_from_keys(vec![ResourceKey::new("minecraft:dirt")]);
        assert_eq!(list.keys(), vec![ResourceKey::new("minecraft:dirt")]);
    }
}
