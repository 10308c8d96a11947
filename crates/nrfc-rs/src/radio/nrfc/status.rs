use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, Nrf24Error, Nrfc};
use crate::{radio::prelude::EsbStatus, types::StatusFlags};

impl<SPI, DO, DELAY> EsbStatus for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_status_flags(&self) -> StatusFlags {
        self._status
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.spi_write_byte(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }

    fn update(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        self.execute(commands::NOP, 0, &[])?;
        Ok(self._status)
    }
}
