//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use nrfc::radio::prelude::*;
//! ```

use crate::types::{Address, AddressSlot, DataRate, FifoState, StatusFlags};

use super::{RadioConfig, RadioEvents, TxOutcome};

/// A trait to represent the reset and configuration sequences
/// of an ESB capable transceiver.
pub trait EsbInit {
    type ConfigErrorType;

    /// Reset the radio into a known (powered down and disabled) state.
    ///
    /// Every other operation fails with a "not initialized" error until this
    /// function succeeds.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Configure the radio for a link on the given `channel` at the given `data_rate`,
    /// using `address` (3 to 5 bytes long) as the address of pipe 0.
    ///
    /// This enables dynamic payloads and auto-ack on pipes 0 and 1, flushes both FIFOs,
    /// clears all status flags, uses the longest auto-retry delay with the most retries,
    /// and leaves the radio listening (RX mode with the CE pin active).
    ///
    /// The `address` is validated before any bus traffic occurs.
    fn configure(
        &mut self,
        address: &[u8],
        channel: u8,
        data_rate: DataRate,
    ) -> Result<(), Self::ConfigErrorType>;

    /// Same as [`EsbInit::configure()`], but every parameter comes from the given
    /// [`RadioConfig`].
    fn configure_with(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent manipulation of pipe addresses
/// for an ESB capable transceiver.
pub trait EsbAddress {
    type AddressErrorType;

    /// Write an `address` (3 to 5 bytes long) into the specified address `slot`.
    ///
    /// The address given to [`AddressSlot::Zero`] is remembered and
    /// restored every time the radio returns to RX mode.
    /// This is needed because every transmission uses pipe 0 to receive
    /// the auto-ack packet.
    fn set_address(&mut self, slot: AddressSlot, address: &[u8])
        -> Result<(), Self::AddressErrorType>;

    /// Read `width` (3 to 5) bytes from the specified address `slot`.
    fn get_address(
        &mut self,
        slot: AddressSlot,
        width: usize,
    ) -> Result<Address, Self::AddressErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// These channels translate to the RF frequency as an offset of MHz from 2400 MHz.
    /// The given `channel` is masked to 7 bits (range [0, 127]).
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;

    /// Get the radio's currently selected frequency in MHz.
    fn get_frequency_mhz(&mut self) -> Result<u32, Self::ChannelErrorType> {
        Ok(2400 + self.get_channel()? as u32)
    }
}

/// A trait to represent manipulation of the data rate
/// for an ESB capable transceiver.
pub trait EsbDataRate {
    type DataRateErrorType;

    /// Set the radio's data rate.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;

    /// Get the radio's configured data rate.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;
}

/// A trait to represent manipulation of the automatic retransmission feature
/// for an ESB capable transceiver.
pub trait EsbAutoRetries {
    type AutoRetriesErrorType;

    /// Set the auto-retry feature's `delay` (in range [0, 15]) and `count` (in range [0, 15]).
    ///
    /// The `delay` is in steps of 250 microseconds, plus 250 microseconds.
    /// Both values are clamped to 15.
    fn set_auto_retries(&mut self, delay: u8, count: u8)
        -> Result<(), Self::AutoRetriesErrorType>;
}

/// A trait to represent manipulation of the radio's active state (CE pin)
/// and power.
pub trait EsbPower {
    type PowerErrorType;

    /// Activate the radio (CE pin HIGH).
    ///
    /// In RX mode, the radio listens. In TX mode, the radio transmits
    /// whatever is in its TX FIFO.
    fn enable(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Deactivate the radio (CE pin LOW).
    ///
    /// Interrupts that still occur while disabled only flush the FIFOs.
    fn disable(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Is the radio enabled?
    fn is_enabled(&self) -> bool;

    /// Disable the radio and put it into a sleep state.
    ///
    /// [`EsbInit::configure()`] (or the next transmission) powers the radio up again.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&self) -> bool;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] state that was cached from the latest SPI transaction.
    fn get_status_flags(&self) -> StatusFlags;

    /// Clear the radio's IRQ status flags
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding
    /// interrupt event. Setting any member of [`StatusFlags`] to `false` will leave
    /// the corresponding status flag untouched.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the internal cache of status byte
    /// (which is also saved from every SPI transaction) and return it.
    fn update(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;
}

/// A trait to represent the link layer (sending and servicing interrupts)
/// of an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Transmit a `payload` (at most 32 bytes) to the given `address` (3 to 5 bytes).
    ///
    /// This function does not block: the result of the transmission is reported by
    /// the next call to [`EsbRadio::handle_interrupt()`].
    ///
    /// Set `ask_ack` to `false` to ask the receiver not to acknowledge the payload.
    fn send_to(
        &mut self,
        address: &[u8],
        payload: &[u8],
        ask_ack: bool,
    ) -> Result<(), Self::RadioErrorType>;

    /// Service a falling edge on the radio's IRQ pin.
    ///
    /// The received payloads and the transmission result are reported to the given
    /// `events` observer. Pass `&mut ()` to ignore all events.
    ///
    /// This function never fails; errors are logged and reported as a failed transmission.
    /// The returned [`TxOutcome`] is [`None`] when payloads were received or when
    /// the interrupt was ignored (radio not initialized or disabled).
    fn handle_interrupt<E: RadioEvents>(&mut self, events: &mut E) -> Option<TxOutcome>;
}
