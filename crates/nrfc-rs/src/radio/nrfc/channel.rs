use super::{registers, Nrf24Error, Nrfc};
use crate::radio::prelude::EsbChannel;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> EsbChannel for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The RF_CH register holds 7 bits. The specified `channel` is
    /// masked to the range [0, 127].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        self.spi_write_byte(registers::RF_CH, channel & 0x7F)
    }

    /// See also [`Nrfc::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        Ok(self.spi_read(1, registers::RF_CH)?[1] & 0x7F)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbChannel};
    use crate::radio::commands;
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn set_channel() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::RF_CH | commands::W_REGISTER, 76u8],
                vec![0xEu8, 0u8],
            ),
            // values above 127 are masked to 7 bits
            (
                vec![registers::RF_CH | commands::W_REGISTER, 0x7Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::RF_CH | commands::W_REGISTER, 0x02u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_channel(76).unwrap();
        radio.set_channel(0xFF).unwrap();
        radio.set_channel(0x82).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn get_channel() {
        let spi_expectations = spi_test_expects![
            // get the RF_CH register value
            (vec![registers::RF_CH, 0u8], vec![0xEu8, 76u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_channel().unwrap(), 76u8);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn get_frequency_mhz() {
        let mut spi_expectations = vec![];
        for channel in 0..=127u8 {
            spi_expectations.extend(spi_test_expects![(
                vec![registers::RF_CH, 0u8],
                vec![0xEu8, channel],
            ),]);
        }
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        for channel in 0..=127u32 {
            assert_eq!(radio.get_frequency_mhz().unwrap(), 2400 + channel);
        }
        spi.done();
        ce_pin.done();
    }
}
