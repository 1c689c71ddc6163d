use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::discovery::WindowRef;
use crate::error::BridgeError;
use crate::message::DataMessage;

/// One-way, fire-and-forget delivery of a data message to an external window.
pub trait MessageTransport {
    /// Forward `message` to `target`.
    ///
    /// `Ok(true)` means the underlying platform call reported delivery,
    /// `Ok(false)` that the receiving window procedure returned zero. Errors
    /// are reserved for transports that cannot attempt delivery at all.
    fn deliver(&self, target: WindowRef, message: &DataMessage) -> Result<bool, BridgeError>;
}

/// Record of one delivery observed by a loopback receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub target: WindowRef,
    pub message: DataMessage,
}

/// In-process loopback transport.
///
/// Messages land on a channel instead of crossing a process boundary. The
/// CLI's offline mode and the integration tests drain the receiving side to
/// observe exactly what would have been sent.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: Sender<Delivery>,
}

impl ChannelTransport {
    pub fn new() -> (Self, Receiver<Delivery>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl MessageTransport for ChannelTransport {
    fn deliver(&self, target: WindowRef, message: &DataMessage) -> Result<bool, BridgeError> {
        self.tx
            .send(Delivery {
                target,
                message: message.clone(),
            })
            .map_err(|_| BridgeError::TransportClosed)?;
        Ok(true)
    }
}

/// Fallback for platforms without a window-message backend.
#[derive(Debug, Default)]
pub struct UnsupportedTransport;

impl MessageTransport for UnsupportedTransport {
    fn deliver(&self, _target: WindowRef, message: &DataMessage) -> Result<bool, BridgeError> {
        debug!(
            tag = message.tag(),
            len = message.len(),
            "dropping message: no platform transport"
        );
        Err(BridgeError::PlatformUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_delivers_exactly_once() {
        let (transport, rx) = ChannelTransport::new();
        let target = WindowRef::from_raw(9);
        let message = DataMessage::new(1, vec![0xab, 0xcd]);

        assert!(transport.deliver(target, &message).unwrap());

        let delivery = rx.try_recv().unwrap();
        assert_eq!(delivery.target, target);
        assert_eq!(delivery.message, message);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn loopback_reports_a_closed_receiver() {
        let (transport, rx) = ChannelTransport::new();
        drop(rx);
        let result = transport.deliver(WindowRef::from_raw(9), &DataMessage::new(0, vec![1]));
        assert!(matches!(result, Err(BridgeError::TransportClosed)));
    }

    #[test]
    fn unsupported_transport_never_delivers() {
        let result =
            UnsupportedTransport.deliver(WindowRef::from_raw(1), &DataMessage::new(0, vec![]));
        assert!(matches!(result, Err(BridgeError::PlatformUnsupported)));
    }
}
