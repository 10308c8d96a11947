use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::Config, check_address_width, commands, mnemonics, registers};
use super::{Nrf24Error, Nrfc};
use crate::radio::{
    prelude::{
        EsbAddress, EsbChannel, EsbDataRate, EsbFifo, EsbInit, EsbPower, EsbStatus,
    },
    RadioConfig,
};
use crate::{AddressSlot, DataRate, StatusFlags};

impl<SPI, DO, DELAY> EsbInit for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`Nrfc::new()`].
    ///
    /// The CONFIG register is written and read back to verify the SPI lines are working.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self._initialized = false;
        // Must allow the radio time to settle else configuration bits will not necessarily stick.
        // Technically we require 4.5ms + 14us as a worst case. We'll just call it 5ms.
        self._delay_impl.delay_ns(5000000);

        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._enabled = false;
        self._pipe0_rx_addr = None;
        self._config_reg = Config::powered_down();
        let expected = self._config_reg.into_bits();
        self.spi_transfer(commands::W_REGISTER | registers::CONFIG, &[expected])?;
        self.spi_transfer(commands::R_REGISTER | registers::CONFIG, &[0])?;
        if self._buf[1] != expected {
            debug!("CONFIG read back {:?}, expected {:?}", self._buf[1], expected);
            return Err(Nrf24Error::BinaryCorruption);
        }
        self._initialized = true;
        Ok(())
    }

    /// ```ignore
    /// radio.init()?;
    /// radio.configure(b"RCVR", 1, DataRate::Kbps250)?;
    /// ```
    fn configure(
        &mut self,
        address: &[u8],
        channel: u8,
        data_rate: DataRate,
    ) -> Result<(), Self::ConfigErrorType> {
        let config = RadioConfig::default()
            .with_address(address)?
            .with_channel(channel)
            .with_data_rate(data_rate);
        self.configure_with(&config)
    }

    fn configure_with(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        let address_width = check_address_width(config.address())?;
        self.check_initialized()?;

        self.set_channel(config.channel())?;
        self.set_data_rate(config.data_rate())?;

        self.spi_write_byte(registers::FEATURE, mnemonics::EN_DPL)?;
        self.spi_write_byte(registers::EN_AA, config.auto_ack())?;
        self.spi_write_byte(registers::DYNPD, config.dynamic_payloads())?;

        // Flush buffers
        self.flush_rx()?;
        self.flush_tx()?;
        self.clear_status_flags(StatusFlags::new())?;

        self.spi_write_byte(registers::SETUP_AW, address_width)?;
        self.set_address(AddressSlot::Zero, config.address())?;
        self.spi_write_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;

        // start listening
        self.rx_mode()?;
        self.enable()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
pub(crate) mod test {
    extern crate std;
    use super::{registers, EsbInit};
    use crate::radio::{commands, prelude::EsbPower, Nrf24Error, Nrfc, RadioConfig};
    use crate::{spi_test_expects, test::mk_radio, ConfigError, DataRate};
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };
    use std::vec;
    use std::vec::Vec;

    fn init_parametrized(corrupted_binary: bool) {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let mut spi_expectations = spi_test_expects![
            // power down with an 8 bit CRC
            (
                vec![registers::CONFIG | commands::W_REGISTER, 8u8],
                vec![0xEu8, 0u8],
            ),
        ]
        .to_vec();
        // read back CONFIG register to verify SPI lines are working
        spi_expectations.extend(spi_test_expects![(
            vec![registers::CONFIG, 0u8],
            if corrupted_binary {
                vec![0xFFu8, 0xFFu8]
            } else {
                vec![0xEu8, 8u8]
            },
        ),]);
        let mut spi = SpiMock::new(&spi_expectations);
        let mut ce_pin = PinMock::new(&ce_expectations);
        let mut radio = Nrfc::new(ce_pin.clone(), spi.clone(), NoopDelay);
        let result = radio.init();
        if corrupted_binary {
            assert_eq!(result, Err(Nrf24Error::BinaryCorruption));
            assert!(!radio.is_initialized());
        } else {
            assert!(result.is_ok());
            assert!(radio.is_initialized());
            assert!(!radio.is_enabled());
            assert!(!radio.is_powered());
        }
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init() {
        init_parametrized(false);
    }

    #[test]
    fn init_corrupted_binary() {
        init_parametrized(true);
    }

    #[test]
    fn not_initialized() {
        let spi = SpiMock::new(&[]);
        let ce_pin = PinMock::new(&[]);
        let mut radio = Nrfc::new(ce_pin, spi, NoopDelay);
        assert_eq!(
            radio.configure(b"RCVR", 1, DataRate::Kbps250),
            Err(Nrf24Error::NotInitialized)
        );
        let (mut ce_pin, mut spi, _) = radio.release();
        spi.done();
        ce_pin.done();
    }

    /// The bus traffic produced by [`EsbInit::configure()`] on a freshly initialized radio.
    pub(crate) fn configure_expectations(
        address: &[u8],
        channel: u8,
        rf_setup: u8,
    ) -> Vec<SpiTransaction<u8>> {
        let mut rx_addr = vec![registers::RX_ADDR_P0 | commands::W_REGISTER];
        rx_addr.extend_from_slice(address);
        let addr_response = vec![0xEu8; address.len() + 1];
        spi_test_expects![
            // set_channel()
            (
                vec![registers::RF_CH | commands::W_REGISTER, channel],
                vec![0xEu8, 0u8],
            ),
            // set_data_rate()
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x0Fu8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, rf_setup],
                vec![0xEu8, 0u8],
            ),
            // enable dynamic payloads
            (
                vec![registers::FEATURE | commands::W_REGISTER, 4u8],
                vec![0xEu8, 0u8],
            ),
            // auto-ack and dynamic payloads on pipes 0 and 1
            (
                vec![registers::EN_AA | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::DYNPD | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            // flush_rx()
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            // flush_tx()
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            // clear_status_flags()
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            // address width
            (
                vec![
                    registers::SETUP_AW | commands::W_REGISTER,
                    address.len() as u8 - 2
                ],
                vec![0xEu8, 0u8],
            ),
            // set_address()
            (rx_addr.clone(), addr_response.clone()),
            // auto-retries
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0xFFu8],
                vec![0xEu8, 0u8],
            ),
            // rx_mode()
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Bu8],
                vec![0xEu8, 0u8],
            ),
            (rx_addr, addr_response),
        ]
        .to_vec()
    }

    #[test]
    fn configure() {
        let ce_expectations = [PinTransaction::set(PinState::High)];
        let spi_expectations = configure_expectations(b"RCVR", 1, 0x27);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.configure(b"RCVR", 1, DataRate::Kbps250).unwrap();
        assert!(radio.is_enabled());
        assert!(radio.is_powered());
        assert_eq!(radio._pipe0_rx_addr.as_deref(), Some(b"RCVR".as_slice()));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn configure_masks_channel() {
        let ce_expectations = [PinTransaction::set(PinState::High)];
        let spi_expectations = configure_expectations(&[0xE7; 5], 0x7F, 0x07);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.configure(&[0xE7; 5], 0xFF, DataRate::Mbps1).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn configure_invalid_address() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        for len in [0usize, 1, 2, 6] {
            let address = [0x52u8; 6];
            assert_eq!(
                radio.configure(&address[..len], 1, DataRate::Kbps250),
                Err(Nrf24Error::Config(ConfigError::InvalidAddressWidth(len)))
            );
        }
        assert!(!radio.is_enabled());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn configure_with() {
        let ce_expectations = [PinTransaction::set(PinState::High)];
        let mut spi_expectations = spi_test_expects![
            (
                vec![registers::RF_CH | commands::W_REGISTER, 42u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x07u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x0Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::FEATURE | commands::W_REGISTER, 4u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_AA | commands::W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::DYNPD | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::SETUP_AW | commands::W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::RX_ADDR_P0 | commands::W_REGISTER, 1u8, 2, 3],
                vec![0xEu8, 0, 0, 0],
            ),
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0x53u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Bu8],
                vec![0xEu8, 0u8],
            ),
        ]
        .to_vec();
        spi_expectations.extend(spi_test_expects![(
            vec![registers::RX_ADDR_P0 | commands::W_REGISTER, 1u8, 2, 3],
            vec![0xEu8, 0, 0, 0],
        ),]);
        let config = RadioConfig::default()
            .with_address(&[1, 2, 3])
            .unwrap()
            .with_channel(42)
            .with_data_rate(DataRate::Mbps2)
            .with_auto_retries(5, 3)
            .with_auto_ack(1)
            .with_dynamic_payloads(0xFF);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.configure_with(&config).unwrap();
        spi.done();
        ce_pin.done();
    }
}
