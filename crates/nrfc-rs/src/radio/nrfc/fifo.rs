use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, Nrf24Error, Nrfc};
use crate::radio::prelude::EsbFifo;
use crate::FifoState;

impl<SPI, DO, DELAY> EsbFifo for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.execute(commands::FLUSH_RX, 0, &[])?;
        Ok(())
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.execute(commands::FLUSH_TX, 0, &[])?;
        Ok(())
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo_status = self.spi_read(1, registers::FIFO_STATUS)?[1];
        let offset = about_tx as u8 * 4;
        match (fifo_status >> offset) & 3 {
            1 => Ok(FifoState::Empty),
            2 => Ok(FifoState::Full),
            _ => Ok(FifoState::Occupied),
        }
    }
}
