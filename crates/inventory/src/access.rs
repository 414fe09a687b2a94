//! Access restriction, partition mode and action vocabulary.

use serde::{Deserialize, Serialize};

use gridstore_core::{MachineId, PlayerId};

/// Read/write permissions of an inventory or handler.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRestriction {
    None,
    Read,
    Write,
    ReadWrite,
}

impl AccessRestriction {
    const READ_BIT: u8 = 0b01;
    const WRITE_BIT: u8 = 0b10;

    fn bits(self) -> u8 {
        match self {
            AccessRestriction::None => 0,
            AccessRestriction::Read => Self::READ_BIT,
            AccessRestriction::Write => Self::WRITE_BIT,
            AccessRestriction::ReadWrite => Self::READ_BIT | Self::WRITE_BIT,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits & (Self::READ_BIT | Self::WRITE_BIT) {
            0 => AccessRestriction::None,
            Self::READ_BIT => AccessRestriction::Read,
            Self::WRITE_BIT => AccessRestriction::Write,
            _ => AccessRestriction::ReadWrite,
        }
    }

    /// Intersection of two restrictions.
    pub fn restrict_permissions(self, other: AccessRestriction) -> AccessRestriction {
        Self::from_bits(self.bits() & other.bits())
    }

    /// True when every permission in `required` is granted by `self`.
    pub fn has_permission(self, required: AccessRestriction) -> bool {
        self.bits() & required.bits() == required.bits()
    }

    pub fn can_read(self) -> bool {
        self.has_permission(AccessRestriction::Read)
    }

    pub fn can_write(self) -> bool {
        self.has_permission(AccessRestriction::Write)
    }
}

/// How a partition list is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeExclude {
    #[default]
    Whitelist,
    Blacklist,
}

/// Real mutation vs dry-run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actionable {
    Modulate,
    Simulate,
}

impl Actionable {
    pub fn is_simulation(self) -> bool {
        matches!(self, Actionable::Simulate)
    }
}

/// Display mode of a monitor over an external inventory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageFilter {
    /// Only list what could actually be extracted.
    #[default]
    ExtractableOnly,
    /// List everything, regardless of extractability or access.
    None,
}

/// Who is acting on an inventory.
///
/// Opaque to the handler layer; threaded through for authorization and audit
/// further down the chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ActionSource {
    /// The network itself (internal bookkeeping, no external actor).
    #[default]
    Base,
    Player(PlayerId),
    Machine(MachineId),
}
