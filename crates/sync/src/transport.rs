//! Host transport abstraction.
//!
//! The host owns channel registration, serialization and the actual sockets.
//! This crate only asks it to open a named channel and to deliver a message
//! to an [`Audience`].

use std::sync::Arc;

use crate::audience::Audience;

pub trait ChannelTransport<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    /// Register a named, event-driven channel with the host.
    fn open_channel(&self, name: &str) -> Result<(), Self::Error>;

    fn deliver(&self, channel: &str, audience: Audience, message: M) -> Result<(), Self::Error>;
}

impl<M, T> ChannelTransport<M> for Arc<T>
where
    T: ChannelTransport<M> + ?Sized,
{
    type Error = T::Error;

    fn open_channel(&self, name: &str) -> Result<(), Self::Error> {
        (**self).open_channel(name)
    }

    fn deliver(&self, channel: &str, audience: Audience, message: M) -> Result<(), Self::Error> {
        (**self).deliver(channel, audience, message)
    }
}
