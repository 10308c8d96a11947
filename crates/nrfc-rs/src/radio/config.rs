use crate::radio::nrfc::{bit_fields::SetupRetry, check_address_width, limits};
use crate::types::{Address, ConfigError, DataRate};

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use nrfc::{radio::RadioConfig, DataRate};
///
/// let config = RadioConfig::default()
///     .with_address(b"RCVR")
///     .unwrap()
///     .with_channel(1)
///     .with_data_rate(DataRate::Kbps250);
/// assert_eq!(config.address(), b"RCVR");
/// ```
#[derive(Debug, Clone)]
pub struct RadioConfig {
    pub(crate) auto_retries: SetupRetry,
    address: Address,
    channel: u8,
    data_rate: DataRate,
    auto_ack: u8,
    dynamic_payloads: u8,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::address()`] | `[0xE7; 5]` |
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::auto_retry_delay()`] | `15` |
    /// | [`RadioConfig::auto_retry_count()`] | `15` |
    /// | [`RadioConfig::auto_ack()`] | `0b11` (enabled for pipes 0 and 1) |
    /// | [`RadioConfig::dynamic_payloads()`] | `0b11` (enabled for pipes 0 and 1) |
    fn default() -> Self {
        let mut address = Address::new();
        // capacity is exactly 5
        let _ = address.extend_from_slice(&[0xE7; 5]);
        Self {
            /*
               - 15 * 250 + 250 = 4000 us delay between attempts
               - 15 max attempts
            */
            auto_retries: SetupRetry::default(),
            address,
            channel: 76,
            data_rate: DataRate::Mbps1,
            auto_ack: 0b11,
            dynamic_payloads: 0b11,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_address()`].
    pub fn address(&self) -> &[u8] {
        &self.address
    }

    /// The address of pipe 0 (3 to 5 bytes long).
    ///
    /// The address length also sets the address width used by all pipes.
    /// See [`EsbInit::configure()`](fn@crate::radio::prelude::EsbInit::configure).
    pub fn with_address(self, address: &[u8]) -> Result<Self, ConfigError> {
        check_address_width(address)?;
        let address =
            Address::from_slice(address).map_err(|_| ConfigError::InvalidAddressWidth(address.len()))?;
        Ok(Self { address, ..self })
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (masked to 7 bits).
    ///
    /// See [`EsbChannel::set_channel()`](fn@crate::radio::prelude::EsbChannel::set_channel).
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value & 0x7F,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// Set the data rate.
    ///
    /// See [`EsbDataRate::set_data_rate()`](fn@crate::radio::prelude::EsbDataRate::set_data_rate).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the auto-retry delay set by [`RadioConfig::with_auto_retries()`].
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// Returns the auto-retry count set by [`RadioConfig::with_auto_retries()`].
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the auto-retry feature's `delay` and `count` (both clamped to 15).
    ///
    /// See [`EsbAutoRetries::set_auto_retries()`](fn@crate::radio::prelude::EsbAutoRetries::set_auto_retries).
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        Self {
            auto_retries: SetupRetry::from_bits(0)
                .with_ard(delay.min(15))
                .with_arc(count.min(15)),
            ..self
        }
    }

    /// Returns the pipes' auto-ack mask set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Enable or disable the auto-ack feature per pipe.
    ///
    /// Bit `n` of `enable` controls pipe `n`; bits beyond pipe 5 are ignored.
    pub fn with_auto_ack(self, enable: u8) -> Self {
        Self {
            auto_ack: enable & Self::PIPES_MASK,
            ..self
        }
    }

    /// Returns the pipes' dynamic payloads mask set by [`RadioConfig::with_dynamic_payloads()`].
    pub const fn dynamic_payloads(&self) -> u8 {
        self.dynamic_payloads
    }

    /// Enable or disable dynamic payload lengths per pipe.
    ///
    /// Bit `n` of `enable` controls pipe `n`; bits beyond pipe 5 are ignored.
    /// Received payloads are always read using their dynamic length, so every
    /// pipe in use should have this enabled.
    pub fn with_dynamic_payloads(self, enable: u8) -> Self {
        Self {
            dynamic_payloads: enable & Self::PIPES_MASK,
            ..self
        }
    }

    const PIPES_MASK: u8 = (1 << limits::PIPES) - 1;
}
