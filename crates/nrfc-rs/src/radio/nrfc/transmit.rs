use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{check_address_width, check_payload_length, commands, registers, Nrf24Error, Nrfc};
use crate::radio::{
    prelude::{EsbPower, EsbRadio},
    RadioEvents, TxOutcome,
};

impl<SPI, DO, DELAY> EsbRadio for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The `address` is also written to pipe 0 so the auto-ack packet is recognized.
    /// The pipe 0 address given to [`EsbAddress::set_address()`](fn@crate::radio::prelude::EsbAddress::set_address)
    /// is restored by the next [`EsbRadio::handle_interrupt()`].
    fn send_to(
        &mut self,
        address: &[u8],
        payload: &[u8],
        ask_ack: bool,
    ) -> Result<(), Self::RadioErrorType> {
        check_address_width(address)?;
        check_payload_length(payload)?;
        self.check_initialized()?;

        self.disable()?;
        self.tx_mode()?;
        self.spi_write_buf(registers::TX_ADDR, address)?;
        self.spi_write_buf(registers::RX_ADDR_P0, address)?;
        let command = if ask_ack {
            commands::W_TX_PAYLOAD
        } else {
            commands::W_TX_PAYLOAD_NO_ACK
        };
        self.execute(command, 0, payload)?;
        trace!("queued {} bytes for transmission", payload.len());
        // pulse CE to start transmitting
        self.enable()
    }

    fn handle_interrupt<E: RadioEvents>(&mut self, events: &mut E) -> Option<TxOutcome> {
        self.service_interrupt().dispatch(events)
    }
}
