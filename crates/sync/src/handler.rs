use gridstore_core::PlayerId;

/// Reacts to a packet received on the channel.
///
/// On the server side `sender` is the player whose connection delivered the
/// packet; on the client side there is no sender.
pub trait PacketHandler<M>: Send + Sync {
    fn on_packet(&self, packet: &M, sender: Option<PlayerId>);
}

impl<M, F> PacketHandler<M> for F
where
    F: Fn(&M, Option<PlayerId>) + Send + Sync,
{
    fn on_packet(&self, packet: &M, sender: Option<PlayerId>) {
        self(packet, sender)
    }
}

/// Produces the message a player receives right after logging in (typically
/// a world settings sync). `None` sends nothing.
pub trait LoginHook<M>: Send + Sync {
    fn on_login(&self, player: PlayerId) -> Option<M>;
}

impl<M, F> LoginHook<M> for F
where
    F: Fn(PlayerId) -> Option<M> + Send + Sync,
{
    fn on_login(&self, player: PlayerId) -> Option<M> {
        self(player)
    }
}
