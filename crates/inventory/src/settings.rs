//! Persistable handler configuration.

use serde::{Deserialize, Serialize};

use gridstore_core::{StorageError, StorageResult};

use crate::access::{AccessRestriction, IncludeExclude};
use crate::stack::ResourceKey;

/// Configuration a storage device applies to its handler.
///
/// Defaults match a freshly attached handler: priority 0, whitelist mode,
/// read/write access, no partitions, not sticky, extract filter off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerSettings {
    pub priority: i32,
    pub whitelist: IncludeExclude,
    pub access: AccessRestriction,
    pub sticky: bool,
    pub extract_filter_active: bool,
    pub partition: Vec<ResourceKey>,
    pub extract_partition: Vec<ResourceKey>,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            priority: 0,
            whitelist: IncludeExclude::Whitelist,
            access: AccessRestriction::ReadWrite,
            sticky: false,
            extract_filter_active: false,
            partition: Vec::new(),
            extract_partition: Vec::new(),
        }
    }
}

impl HandlerSettings {
    /// Parse settings from JSON, filling absent fields with defaults.
    pub fn from_json(raw: &str) -> StorageResult<Self> {
        let settings: Self = serde_json::from_str(raw)
            .map_err(|e| StorageError::invalid_settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> StorageResult<String> {
        serde_json::to_string(self).map_err(|e| StorageError::invalid_settings(e.to_string()))
    }

    fn validate(&self) -> StorageResult<()> {
        let blank = self
            .partition
            .iter()
            .chain(&self.extract_partition)
            .any(|k| k.as_str().trim().is_empty());
        if blank {
            return Err(StorageError::invalid_settings("partition keys cannot be blank"));
        }
        Ok(())
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_whitelist(mut self, whitelist: IncludeExclude) -> Self {
        self.whitelist = whitelist;
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

    pub fn with_partition<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ResourceKey>,
    {
        self.partition = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the extract partition and switch the extract filter on.
    pub fn with_extract_filter<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ResourceKey>,
    {
        self.extract_partition = keys.into_iter().map(Into::into).collect();
        self.extract_filter_active = true;
        self
    }
}
