use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};

use crate::types::{Payload, StatusFlags};

/// The result of a transmission, as observed by the interrupt handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The payload was sent (and acknowledged if auto-ack was requested).
    Sent,
    /// The interrupt carried neither a received payload nor a send confirmation.
    Failed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TxOutcome::Sent => defmt::write!(fmt, "Sent"),
            TxOutcome::Failed => defmt::write!(fmt, "Failed"),
        }
    }
}

/// An observer of the events dispatched by
/// [`EsbRadio::handle_interrupt()`](fn@crate::radio::prelude::EsbRadio::handle_interrupt).
///
/// Every method defaults to doing nothing, so implement only what is needed.
/// The unit type `()` implements this trait for applications that do not observe
/// any events.
pub trait RadioEvents {
    /// Called once per serviced interrupt, regardless of its cause.
    fn on_interrupt(&mut self, _status: StatusFlags) {}

    /// Called for every payload drained from the RX FIFO.
    fn on_data_received(&mut self, _payload: &[u8]) {}

    /// Called when an interrupt confirms that a payload was sent.
    fn on_transmit_success(&mut self) {}

    /// Called when an interrupt carried neither a payload nor a send confirmation.
    fn on_transmit_failed(&mut self) {}
}

impl RadioEvents for () {}

/// An owned copy of a single event, used to queue events for later processing.
#[derive(Clone, Debug, PartialEq)]
pub enum RadioEvent {
    Interrupt(StatusFlags),
    DataReceived(Payload),
    TransmitSuccess,
    TransmitFailed,
}

/// Forwards events into a bounded [`Channel`] that the application drains.
///
/// Events that do not fit in the channel are dropped (and logged).
/// ```
/// use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Channel};
/// use nrfc::radio::{ChannelEvents, RadioEvent};
///
/// let queue: Channel<NoopRawMutex, RadioEvent, 8> = Channel::new();
/// let mut events = ChannelEvents(&queue);
/// // radio.handle_interrupt(&mut events);
/// while let Ok(event) = queue.try_receive() {
///     // handle event
/// }
/// ```
pub struct ChannelEvents<'a, M: RawMutex, const N: usize>(pub &'a Channel<M, RadioEvent, N>);

impl<M: RawMutex, const N: usize> ChannelEvents<'_, M, N> {
    fn push(&mut self, event: RadioEvent) {
        if self.0.try_send(event).is_err() {
            warn!("event queue is full; dropping event");
        }
    }
}

impl<M: RawMutex, const N: usize> RadioEvents for ChannelEvents<'_, M, N> {
    fn on_interrupt(&mut self, status: StatusFlags) {
        self.push(RadioEvent::Interrupt(status));
    }

    fn on_data_received(&mut self, payload: &[u8]) {
        // payloads handed to observers never exceed 32 bytes
        if let Ok(payload) = Payload::from_slice(payload) {
            self.push(RadioEvent::DataReceived(payload));
        }
    }

    fn on_transmit_success(&mut self) {
        self.push(RadioEvent::TransmitSuccess);
    }

    fn on_transmit_failed(&mut self) {
        self.push(RadioEvent::TransmitFailed);
    }
}

#[cfg(test)]
mod test {
    use super::{ChannelEvents, RadioEvent, RadioEvents};
    use crate::StatusFlags;
    use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Channel};

    #[test]
    fn unit_observer_ignores_everything() {
        let mut events = ();
        events.on_interrupt(StatusFlags::new());
        events.on_data_received(&[1, 2, 3]);
        events.on_transmit_success();
        events.on_transmit_failed();
    }

    #[test]
    fn channel_observer_queues_events() {
        let queue: Channel<NoopRawMutex, RadioEvent, 3> = Channel::new();
        let mut events = ChannelEvents(&queue);
        events.on_interrupt(StatusFlags::from_bits(0x40));
        events.on_data_received(&[1, 2, 3]);
        events.on_transmit_success();
        // queue is full; this one is dropped
        events.on_transmit_failed();

        assert_eq!(
            queue.try_receive(),
            Ok(RadioEvent::Interrupt(StatusFlags::from_bits(0x40)))
        );
        match queue.try_receive() {
            Ok(RadioEvent::DataReceived(payload)) => assert_eq!(payload.as_slice(), &[1, 2, 3]),
            _ => panic!("expected a received payload"),
        }
        assert_eq!(queue.try_receive(), Ok(RadioEvent::TransmitSuccess));
        assert!(queue.try_receive().is_err());
    }
}
