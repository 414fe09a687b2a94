//! Per-query context and the per-iteration enumeration cache.
//!
//! A top-level storage query may reach the same network aggregation point
//! through several handlers. The first visit enumerates the network and parks
//! the result in the cache under `(token, network)`; later visits within the
//! same token draw from that pool. Handlers remove what they claim, so the
//! pool is the "still unclaimed" remainder and no quantity is reported twice.
//!
//! The cache travels down the call chain inside a [`QueryContext`], so its
//! scope is exactly one query and independent queries never share it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use gridstore_core::NetworkId;

use crate::stack::StackList;

/// Opaque scope identifier for one logical enumeration pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IterationToken(u64);

impl IterationToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The token that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl core::fmt::Display for IterationToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Enumeration pools for the most recent iteration token.
///
/// Only one token's mapping is held at a time. Touching the cache with a
/// different token discards the previous mapping.
#[derive(Debug, Default)]
pub struct IterationCache {
    slot: Option<(IterationToken, HashMap<NetworkId, StackList>)>,
}

impl IterationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token whose pools are currently held, if any.
    pub fn token(&self) -> Option<IterationToken> {
        self.slot.as_ref().map(|(token, _)| *token)
    }

    fn pools(&mut self, token: IterationToken) -> &mut HashMap<NetworkId, StackList> {
        let superseded = self.token().filter(|held| *held != token);
        if let Some(previous) = superseded {
            trace!(%previous, next = %token, "iteration cache superseded");
            self.slot = None;
        }
        let (_, pools) = self.slot.get_or_insert_with(|| (token, HashMap::new()));
        pools
    }

    pub fn contains(&mut self, token: IterationToken, network: NetworkId) -> bool {
        self.pools(token).contains_key(&network)
    }

    /// Park the full enumeration of `network` for `token`.
    pub fn store(&mut self, token: IterationToken, network: NetworkId, pool: StackList) {
        self.pools(token).insert(network, pool);
    }

    /// The unclaimed remainder of `network`'s enumeration for `token`.
    pub fn pool_mut(&mut self, token: IterationToken, network: NetworkId) -> Option<&mut StackList> {
        self.pools(token).get_mut(&network)
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// Everything a single top-level query carries down the handler chain.
///
/// The token is fixed for the lifetime of a query. Start the next query with
/// [`QueryContext::advance`], never from inside a running one.
#[derive(Debug)]
pub struct QueryContext {
    token: IterationToken,
    cache: IterationCache,
}

impl QueryContext {
    pub fn new(token: IterationToken) -> Self {
        Self::with_cache(token, IterationCache::new())
    }

    /// Resume with a cache that outlived a previous context.
    pub fn with_cache(token: IterationToken, cache: IterationCache) -> Self {
        Self { token, cache }
    }

    pub fn token(&self) -> IterationToken {
        self.token
    }

    /// Begin the next top-level query; earlier pools become unreachable.
    pub fn advance(&mut self, token: IterationToken) {
        self.token = token;
    }

    pub fn cache(&self) -> &IterationCache {
        &self.cache
    }

    pub fn into_cache(self) -> IterationCache {
        self.cache
    }

    pub(crate) fn is_cached(&mut self, network: NetworkId) -> bool {
        self.cache.contains(self.token, network)
    }

    pub(crate) fn store_pool(&mut self, network: NetworkId, pool: StackList) {
        self.cache.store(self.token, network, pool);
    }

    pub(crate) fn pool_mut(&mut self, network: NetworkId) -> Option<&mut StackList> {
        self.cache.pool_mut(self.token, network)
    }
}
