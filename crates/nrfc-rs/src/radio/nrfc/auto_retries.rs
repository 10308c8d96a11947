use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::SetupRetry, registers, Nrf24Error, Nrfc};
use crate::radio::prelude::EsbAutoRetries;

impl<SPI, DO, DELAY> EsbAutoRetries for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoRetriesErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoRetriesErrorType> {
        let setup_retry = SetupRetry::from_bits(0)
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        self.spi_write_byte(registers::SETUP_RETR, setup_retry.into_bits())
    }
}
