use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{limits, registers, Nrf24Error, Nrfc};
use crate::radio::prelude::EsbAddress;
use crate::types::{Address, AddressSlot, ConfigError};

const fn check_width(width: usize) -> Result<u8, ConfigError> {
    if width < limits::MIN_ADDRESS_LEN || width > limits::MAX_ADDRESS_LEN {
        return Err(ConfigError::InvalidAddressWidth(width));
    }
    Ok(width as u8 - 2)
}

/// Validate the length of an `address`.
///
/// Returns the value for the `SETUP_AW` register (`address.len() - 2`)
/// if the address is 3, 4, or 5 bytes long.
pub const fn check_address_width(address: &[u8]) -> Result<u8, ConfigError> {
    check_width(address.len())
}

/// Validate the length of a `payload` (at most 32 bytes).
pub const fn check_payload_length(payload: &[u8]) -> Result<(), ConfigError> {
    if payload.len() > limits::MAX_PAYLOAD_LEN {
        return Err(ConfigError::PayloadTooLong(payload.len()));
    }
    Ok(())
}

impl<SPI, DO, DELAY> EsbAddress for Nrfc<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AddressErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_address(
        &mut self,
        slot: AddressSlot,
        address: &[u8],
    ) -> Result<(), Self::AddressErrorType> {
        check_address_width(address)?;
        self.spi_write_buf(registers::RX_ADDR_P0 + slot.pipe(), address)?;
        if slot == AddressSlot::Zero {
            self.cache_pipe0_address(address);
        }
        Ok(())
    }

    fn get_address(
        &mut self,
        slot: AddressSlot,
        width: usize,
    ) -> Result<Address, Self::AddressErrorType> {
        check_width(width)?;
        let response = self.spi_read(width, registers::RX_ADDR_P0 + slot.pipe())?;
        let mut address = Address::new();
        // `width` was checked against the capacity
        let _ = address.extend_from_slice(&response[1..]);
        Ok(address)
    }
}
