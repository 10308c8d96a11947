use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, Nrf24Error, Nrfc};
use crate::radio::prelude::EsbDataRate;
use crate::DataRate;

impl<SPI, DO, DELAY> EsbDataRate for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DataRateErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType> {
        let rf_setup = self.spi_read(1, registers::RF_SETUP)?[1];
        DataRate::from_bits(rf_setup).ok_or(Nrf24Error::BinaryCorruption)
    }

    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType> {
        let rf_setup = self.spi_read(1, registers::RF_SETUP)?[1];
        let out = rf_setup & !DataRate::MASK | data_rate.into_bits();
        self.spi_write_byte(registers::RF_SETUP, out)
    }
}
