//! In-memory transport for tests/dev.

use std::collections::HashSet;
use std::sync::{Mutex, mpsc};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::audience::Audience;
use crate::transport::ChannelTransport;

/// One message handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery<M> {
    pub channel: String,
    pub audience: Audience,
    pub message: M,
    pub delivered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InMemoryTransportError {
    /// Internal lock poisoning.
    Poisoned,
    /// Delivery on a channel that was never opened.
    UnknownChannel(String),
}

/// Receiving end of an [`InMemoryTransport`] subscription.
///
/// Each subscription gets a copy of every delivery made after it was created.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: mpsc::Receiver<Delivery<M>>,
}

impl<M> Subscription<M> {
    /// Try to receive a delivery without blocking.
    pub fn try_recv(&self) -> Result<Delivery<M>, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a delivery.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Delivery<M>, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything currently queued, without blocking.
    pub fn drain(&self) -> Vec<Delivery<M>> {
        self.receiver.try_iter().collect()
    }
}

/// In-memory stand-in for the host packet channel.
///
/// - No IO / no async
/// - Audiences are recorded, not resolved to players
/// - Best-effort fan-out to subscriptions
#[derive(Debug)]
pub struct InMemoryTransport<M> {
    channels: Mutex<HashSet<String>>,
    subscribers: Mutex<Vec<mpsc::Sender<Delivery<M>>>>,
}

impl<M> InMemoryTransport<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.channels
            .lock()
            .map(|channels| channels.contains(name))
            .unwrap_or(false)
    }

    pub fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive anything.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription { receiver: rx }
    }
}

impl<M> Default for InMemoryTransport<M> {
    fn default() -> Self {
        Self {
            channels: Mutex::new(HashSet::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> ChannelTransport<M> for InMemoryTransport<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryTransportError;

    fn open_channel(&self, name: &str) -> Result<(), Self::Error> {
        let mut channels = self
            .channels
            .lock()
            .map_err(|_| InMemoryTransportError::Poisoned)?;
        channels.insert(name.to_string());
        Ok(())
    }

    fn deliver(&self, channel: &str, audience: Audience, message: M) -> Result<(), Self::Error> {
        if !self.is_open(channel) {
            return Err(InMemoryTransportError::UnknownChannel(channel.to_string()));
        }
        let delivery = Delivery {
            channel: channel.to_string(),
            audience,
            message,
            delivered_at: Utc::now(),
        };

        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| InMemoryTransportError::Poisoned)?;

        // Drop any dead subscribers while delivering.
        subs.retain(|tx| tx.send(delivery.clone()).is_ok());

        Ok(())
    }
}
