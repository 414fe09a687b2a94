//! Channel dispatcher: routes host events to handlers and sends messages.

use tracing::debug;

use gridstore_core::PlayerId;

use crate::audience::{Audience, DimensionId, TargetPoint};
use crate::error::ChannelError;
use crate::handler::{LoginHook, PacketHandler};
use crate::transport::ChannelTransport;

/// Host events the dispatcher subscribes to.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent<M> {
    /// A packet arrived at the server from `player`.
    ServerPacket { packet: M, player: PlayerId },
    /// A packet arrived at the client.
    ClientPacket { packet: M },
    /// A player finished logging in.
    PlayerLoggedIn { player: PlayerId },
}

/// One named channel bound to a host transport.
///
/// The channel is registered when the dispatcher is built. Incoming events go
/// through [`NetworkDispatcher::handle`]; outgoing messages through the
/// `send_*` helpers.
pub struct NetworkDispatcher<M, T>
where
    T: ChannelTransport<M>,
{
    channel: String,
    transport: T,
    server_handler: Box<dyn PacketHandler<M>>,
    client_handler: Box<dyn PacketHandler<M>>,
    login_hook: Option<Box<dyn LoginHook<M>>>,
}

impl<M, T> core::fmt::Debug for NetworkDispatcher<M, T>
where
    T: ChannelTransport<M>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NetworkDispatcher")
            .field("channel", &self.channel)
            .field("login_hook", &self.login_hook.is_some())
            .finish_non_exhaustive()
    }
}

impl<M, T> NetworkDispatcher<M, T>
where
    T: ChannelTransport<M>,
{
    pub fn new(
        channel: impl Into<String>,
        transport: T,
        server_handler: impl PacketHandler<M> + 'static,
        client_handler: impl PacketHandler<M> + 'static,
    ) -> Result<Self, ChannelError> {
        let channel = channel.into();
        if channel.trim().is_empty() {
            return Err(ChannelError::InvalidName);
        }
        transport
            .open_channel(&channel)
            .map_err(|e| ChannelError::transport(&channel, e))?;
        debug!(%channel, "channel registered");

        Ok(Self {
            channel,
            transport,
            server_handler: Box::new(server_handler),
            client_handler: Box::new(client_handler),
            login_hook: None,
        })
    }

    pub fn with_login_hook(mut self, hook: impl LoginHook<M> + 'static) -> Self {
        self.login_hook = Some(Box::new(hook));
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Route one host event.
    pub fn handle(&self, event: ChannelEvent<M>) -> Result<(), ChannelError> {
        match event {
            ChannelEvent::ServerPacket { packet, player } => {
                self.server_handler.on_packet(&packet, Some(player));
            }
            ChannelEvent::ClientPacket { packet } => {
                self.client_handler.on_packet(&packet, None);
            }
            ChannelEvent::PlayerLoggedIn { player } => {
                let greeting = self.login_hook.as_ref().and_then(|hook| hook.on_login(player));
                if let Some(message) = greeting {
                    debug!(channel = %self.channel, %player, "sending login sync");
                    self.send_to(message, player)?;
                }
            }
        }
        Ok(())
    }

    fn send(&self, audience: Audience, message: M) -> Result<(), ChannelError> {
        self.transport
            .deliver(&self.channel, audience, message)
            .map_err(|e| ChannelError::transport(&self.channel, e))
    }

    pub fn send_to_all(&self, message: M) -> Result<(), ChannelError> {
        self.send(Audience::All, message)
    }

    pub fn send_to(&self, message: M, player: PlayerId) -> Result<(), ChannelError> {
        self.send(Audience::Player(player), message)
    }

    pub fn send_to_all_around(&self, message: M, point: TargetPoint) -> Result<(), ChannelError> {
        self.send(Audience::Around(point), message)
    }

    pub fn send_to_dimension(&self, message: M, dimension: DimensionId) -> Result<(), ChannelError> {
        self.send(Audience::Dimension(dimension), message)
    }

    pub fn send_to_server(&self, message: M) -> Result<(), ChannelError> {
        self.send(Audience::Server, message)
    }
}
