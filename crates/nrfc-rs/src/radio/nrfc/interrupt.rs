use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
use heapless::Vec;

use super::{commands, limits, Nrf24Error, Nrfc};
use crate::radio::{
    prelude::{EsbFifo, EsbPower, EsbStatus},
    RadioEvents, TxOutcome,
};
use crate::{Payload, StatusFlags};

/// What a serviced interrupt left behind.
pub(crate) struct Serviced {
    status: StatusFlags,
    received: Vec<Payload, { limits::PAYLOAD_SLOTS }>,
    corrupted: bool,
    data_sent: bool,
}

/// The result of `Nrfc::service_interrupt()`, dispatched to the observer
/// after the radio is released.
pub(crate) enum InterruptReport {
    /// The radio was not initialized or was disabled.
    Ignored,
    Serviced(Serviced),
    /// A bus error interrupted the handler (after STATUS was read, if known).
    Failed(Option<StatusFlags>),
}

impl InterruptReport {
    /// Notify `events` of everything the interrupt revealed.
    pub(crate) fn dispatch<E: RadioEvents>(self, events: &mut E) -> Option<TxOutcome> {
        match self {
            InterruptReport::Ignored => None,
            InterruptReport::Serviced(serviced) => {
                events.on_interrupt(serviced.status);
                if serviced.corrupted {
                    warn!("discarded a received payload of invalid length");
                }
                for payload in &serviced.received {
                    events.on_data_received(payload);
                }
                if !serviced.received.is_empty() {
                    None
                } else if serviced.data_sent {
                    events.on_transmit_success();
                    Some(TxOutcome::Sent)
                } else {
                    events.on_transmit_failed();
                    Some(TxOutcome::Failed)
                }
            }
            InterruptReport::Failed(status) => {
                if let Some(status) = status {
                    events.on_interrupt(status);
                }
                events.on_transmit_failed();
                Some(TxOutcome::Failed)
            }
        }
    }
}

impl<SPI, DO, DELAY> Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Do all the bus work of [`EsbRadio::handle_interrupt()`](fn@crate::radio::prelude::EsbRadio::handle_interrupt)
    /// without notifying any observer.
    pub(crate) fn service_interrupt(&mut self) -> InterruptReport {
        if !self._initialized {
            return InterruptReport::Ignored;
        }
        if !self._enabled {
            // stale interrupts can still fire after disable()
            if let Err(e) = self.flush_fifos() {
                warn!("failed to flush FIFOs of a disabled radio: {:?}", e);
            }
            return InterruptReport::Ignored;
        }

        let mut status = None;
        let result = self.drain(&mut status);
        if let Err(e) = self.enable() {
            warn!("failed to re-enable radio after interrupt: {:?}", e);
        }
        match result {
            Ok(serviced) => InterruptReport::Serviced(serviced),
            Err(e) => {
                warn!("failed to service interrupt: {:?}", e);
                InterruptReport::Failed(status)
            }
        }
    }

    fn flush_fifos(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.flush_rx()?;
        self.flush_tx()
    }

    /// Decode the STATUS register, collect received payloads, and clear
    /// the TX related flags.
    ///
    /// The STATUS read at the start is stored in `first_status`.
    /// The radio is left disabled (in RX mode).
    fn drain(
        &mut self,
        first_status: &mut Option<StatusFlags>,
    ) -> Result<Serviced, Nrf24Error<SPI::Error, DO::Error>> {
        self.disable()?;
        // read payloads against a known RX configuration
        self.rx_mode()?;
        let status = self.update()?;
        *first_status = Some(status);

        let mut serviced = Serviced {
            status,
            received: Vec::new(),
            corrupted: false,
            data_sent: false,
        };
        let clear_rx_dr = StatusFlags::default().with_rx_dr(true);
        if status.rx_dr() {
            if self._status.rx_fifo_empty() {
                // nothing left to read (eg. after flush_rx()), but RX_DR still holds the IRQ
                self.clear_status_flags(clear_rx_dr)?;
            }
            // every clearing write refreshes the cached STATUS
            while !self._status.rx_fifo_empty() {
                let len = self.spi_read_command(1, commands::R_RX_PL_WID)?[1] as usize;
                if len > limits::MAX_PAYLOAD_LEN {
                    serviced.corrupted = true;
                    self.flush_rx()?;
                    self.clear_status_flags(clear_rx_dr)?;
                    break;
                }
                let response = self.spi_read_command(len, commands::R_RX_PAYLOAD)?;
                let mut payload = Payload::new();
                // `len` was checked against the capacity
                let _ = payload.extend_from_slice(&response[1..]);
                if serviced.received.push(payload).is_err() {
                    warn!("RX payload storage is full; flushing RX FIFO");
                    self.flush_rx()?;
                    self.clear_status_flags(clear_rx_dr)?;
                    break;
                }
                self.clear_status_flags(clear_rx_dr)?;
            }
        }

        let status = self._status;
        if status.tx_df() {
            self.flush_tx()?;
            self.clear_status_flags(StatusFlags::default().with_tx_df(true))?;
        }
        if status.tx_full() {
            self.flush_tx()?;
        }
        if status.tx_ds() {
            self.clear_status_flags(StatusFlags::default().with_tx_ds(true))?;
        }
        serviced.data_sent = status.tx_ds();
        Ok(serviced)
    }
}
