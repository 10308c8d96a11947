use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::Config, registers, Nrf24Error, Nrfc};
use crate::radio::prelude::EsbPower;

/// Tpd2standby can be up to 5ms per the 1.0 datasheet.
const POWER_UP_DELAY_US: u32 = 5000;

impl<SPI, DO, DELAY> EsbPower for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn enable(&mut self) -> Result<(), Self::PowerErrorType> {
        self.check_initialized()?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::PowerErrorType> {
        self.check_initialized()?;
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._enabled = false;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self._enabled
    }

    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA).
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.disable()?; // Guarantee CE is low on power down
        self._config_reg = Config::powered_down();
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())
    }

    fn is_powered(&self) -> bool {
        self._config_reg.power()
    }
}

impl<SPI, DO, DELAY> Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Write the CONFIG register and wait for the oscillator if the radio was asleep.
    ///
    /// For nRF24L01+ to go from power down mode to TX or RX mode it must first pass
    /// through stand-by mode.
    fn write_config(&mut self, config: Config) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let was_powered = self._config_reg.power();
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self._config_reg = config;
        if !was_powered {
            self._delay_impl.delay_us(POWER_UP_DELAY_US);
        }
        Ok(())
    }

    /// Switch to RX mode and restore the pipe 0 address
    /// (which every transmission overwrites to receive the auto-ack).
    pub(crate) fn rx_mode(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.write_config(Config::rx_mode())?;
        if let Some(address) = self._pipe0_rx_addr.clone() {
            self.spi_write_buf(registers::RX_ADDR_P0, &address)?;
        }
        Ok(())
    }

    pub(crate) fn tx_mode(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.write_config(Config::tx_mode())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbPower};
    use crate::radio::{commands, Nrf24Error};
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;

    #[test]
    pub fn enable_disable() {
        let ce_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let mocks = mk_radio(&ce_expectations, &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(!radio.is_enabled());
        radio.enable().unwrap();
        assert!(radio.is_enabled());
        radio.disable().unwrap();
        assert!(!radio.is_enabled());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn enable_not_initialized() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio._initialized = false;
        assert_eq!(radio.enable(), Err(Nrf24Error::NotInitialized));
        assert_eq!(radio.disable(), Err(Nrf24Error::NotInitialized));
        assert!(!radio.is_enabled());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn power_down() {
        let ce_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let spi_expectations = spi_test_expects![
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Bu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x08u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.rx_mode().unwrap();
        assert!(radio.is_powered());
        radio.enable().unwrap();
        radio.power_down().unwrap();
        assert!(!radio.is_powered());
        assert!(!radio.is_enabled());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn rx_mode_restores_pipe0_address() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::RX_ADDR_P0 | commands::W_REGISTER, 0xA1, 0xA2, 0xA3],
                vec![0xEu8, 0, 0, 0],
            ),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Au8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Bu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::RX_ADDR_P0 | commands::W_REGISTER, 0xA1, 0xA2, 0xA3],
                vec![0xEu8, 0, 0, 0],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio
            .spi_write_buf(registers::RX_ADDR_P0, &[0xA1, 0xA2, 0xA3])
            .unwrap();
        radio.cache_pipe0_address(&[0xA1, 0xA2, 0xA3]);
        radio.tx_mode().unwrap();
        radio.rx_mode().unwrap();
        spi.done();
        ce_pin.done();
    }
}
