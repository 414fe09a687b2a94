//! Network event-channel dispatcher.
//!
//! A thin layer over the host's packet channel: one named channel, a server
//! and a client packet handler, an optional login hook, and "deliver message
//! to audience" helpers. Serialization and the wire belong to the host
//! transport.

pub mod audience;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod in_memory;
pub mod transport;

pub use audience::{Audience, DimensionId, TargetPoint};
pub use dispatcher::{ChannelEvent, NetworkDispatcher};
pub use error::ChannelError;
pub use handler::{LoginHook, PacketHandler};
pub use in_memory::{Delivery, InMemoryTransport, InMemoryTransportError, Subscription};
pub use transport::ChannelTransport;
