//! Channel error model.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Channel names must be non-blank.
    #[error("channel name cannot be empty")]
    InvalidName,

    /// The host transport refused an operation.
    #[error("transport failure on channel '{channel}': {reason}")]
    Transport { channel: String, reason: String },
}

impl ChannelError {
    pub fn transport(channel: impl Into<String>, reason: impl core::fmt::Debug) -> Self {
        Self::Transport {
            channel: channel.into(),
            reason: format!("{reason:?}"),
        }
    }
}
