use bitfield_struct::bitfield;

/// The CONFIG register.
///
/// The IRQ mask bits are left cleared so every event asserts the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(4)]
    _irq_masks: u8,

    /// EN_CRC
    pub crc_enabled: bool,

    /// CRCO (`true` for a 2 byte checksum)
    pub crc_2_bytes: bool,

    /// PWR_UP
    pub power: bool,

    /// PRIM_RX
    pub is_rx: bool,
}

impl Config {
    /// Powered up primary receiver with an 8 bit CRC.
    pub const fn rx_mode() -> Self {
        Self::new()
            .with_crc_enabled(true)
            .with_power(true)
            .with_is_rx(true)
    }

    /// Powered up primary transmitter with an 8 bit CRC.
    pub const fn tx_mode() -> Self {
        Self::new().with_crc_enabled(true).with_power(true)
    }

    /// Powered down with an 8 bit CRC.
    pub const fn powered_down() -> Self {
        Self::new().with_crc_enabled(true)
    }
}

/// The SETUP_RETR register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay` (in steps of 250 microseconds, plus 250).
    #[bits(4, default = 15)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 15)]
    pub arc: u8,
}
