//! This module defines types used by the driver's traits and by application code.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

use crate::radio::mnemonics;

/// A received payload (at most 32 bytes).
pub type Payload = heapless::Vec<u8, 32>;

/// A pipe address (3 to 5 bytes).
pub type Address = heapless::Vec<u8, 5>;

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    /// The `RF_SETUP` bits that encode the data rate (RF_DR_LOW | RF_DR_HIGH).
    pub(crate) const MASK: u8 = mnemonics::RF_DR_LOW | mnemonics::RF_DR_HIGH;

    /// Encode as a `(RF_DR_LOW, RF_DR_HIGH)` pattern in the `RF_SETUP` register.
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => mnemonics::RF_DR_HIGH,
            DataRate::Kbps250 => mnemonics::RF_DR_LOW,
        }
    }

    /// Decode the `RF_SETUP` data rate bits.
    ///
    /// Returns [`None`] for the reserved pattern (both bits set).
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value & Self::MASK {
            0 => Some(DataRate::Mbps1),
            mnemonics::RF_DR_HIGH => Some(DataRate::Mbps2),
            mnemonics::RF_DR_LOW => Some(DataRate::Kbps250),
            _ => None,
        }
    }

    /// The data rate in kilobits per second.
    pub const fn kbps(self) -> u32 {
        match self {
            DataRate::Mbps1 => 1000,
            DataRate::Mbps2 => 2000,
            DataRate::Kbps250 => 250,
        }
    }
}

impl TryFrom<u32> for DataRate {
    type Error = ConfigError;

    /// Convert a rate in kilobits per second.
    ///
    /// Only 250, 1000 and 2000 are supported by the radio.
    fn try_from(kbps: u32) -> core::result::Result<Self, Self::Error> {
        match kbps {
            1000 => Ok(DataRate::Mbps1),
            2000 => Ok(DataRate::Mbps2),
            250 => Ok(DataRate::Kbps250),
            _ => Err(ConfigError::UnsupportedDataRate(kbps)),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// One of the six pipe address registers.
///
/// [`AddressSlot::Zero`] doubles as the address used to receive
/// auto-ack packets while transmitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressSlot {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl AddressSlot {
    /// The pipe number this slot belongs to.
    pub const fn pipe(self) -> u8 {
        match self {
            AddressSlot::Zero => 0,
            AddressSlot::One => 1,
            AddressSlot::Two => 2,
            AddressSlot::Three => 3,
            AddressSlot::Four => 4,
            AddressSlot::Five => 5,
        }
    }
}

impl TryFrom<u8> for AddressSlot {
    type Error = u8;

    fn try_from(pipe: u8) -> core::result::Result<Self, Self::Error> {
        match pipe {
            0 => Ok(AddressSlot::Zero),
            1 => Ok(AddressSlot::One),
            2 => Ok(AddressSlot::Two),
            3 => Ok(AddressSlot::Three),
            4 => Ok(AddressSlot::Four),
            5 => Ok(AddressSlot::Five),
            _ => Err(pipe),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AddressSlot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "slot {}", self.pipe())
    }
}

impl Display for AddressSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "slot {}", self.pipe())
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// Errors caused by invalid parameters.
///
/// These are always detected before any bus traffic occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An address was not 3, 4, or 5 bytes long. Holds the offending length.
    InvalidAddressWidth(usize),
    /// A data rate (in kbps) that the radio does not support.
    UnsupportedDataRate(u32),
    /// A payload longer than 32 bytes. Holds the offending length.
    PayloadTooLong(usize),
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::InvalidAddressWidth(len) => {
                defmt::write!(fmt, "invalid address width {}", len)
            }
            ConfigError::UnsupportedDataRate(kbps) => {
                defmt::write!(fmt, "unsupported data rate {} kbps", kbps)
            }
            ConfigError::PayloadTooLong(len) => defmt::write!(fmt, "payload too long ({})", len),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ConfigError::InvalidAddressWidth(len) => {
                write!(f, "address width must be 3 to 5 bytes, got {len}")
            }
            ConfigError::UnsupportedDataRate(kbps) => {
                write!(f, "unsupported data rate {kbps} kbps")
            }
            ConfigError::PayloadTooLong(len) => {
                write!(f, "payload must be at most 32 bytes, got {len}")
            }
        }
    }
}

/// A snapshot of the radio's STATUS register.
///
/// Every SPI transaction shifts out the STATUS register first, so a fresh
/// snapshot is taken on every bus access. Never rely on an old snapshot
/// because the radio changes state asynchronously.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use nrfc::StatusFlags;
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all IRQ flags set to true.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if TX Data Failed (the resend limit was reached).
    #[bits(1, access = RO)]
    pub tx_df: bool,

    /// The pipe number of the payload at the top of the RX FIFO.
    ///
    /// 0 - 5 are valid pipes, 6 is unused, and 7 means the RX FIFO is empty.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, rx_pipe: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.rx_pipe(),
            self.tx_full()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 =
        mnemonics::MASK_RX_DR | mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all IRQ flags are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::RX_DR_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::RX_DR_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DS_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::TX_DS_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }

    /// A flag to describe if TX Data Failed.
    pub fn with_tx_df(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DF_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::TX_DF_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }

    /// Is the RX FIFO empty?
    ///
    /// This is the status register's way of saying "no pipe".
    pub const fn rx_fifo_empty(&self) -> bool {
        self.rx_pipe() == mnemonics::RX_FIFO_EMPTY
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, rx_pipe: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.rx_pipe(),
            self.tx_full()
        )
    }
}
