/// Register offsets for the nRF24L01+ used by this driver.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const TX_ADDR: u8 = 0x10;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// SPI commands for the nRF24L01+.
pub mod commands {
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// Bit mnemonics
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;

    /// `FEATURE` register: global dynamic payload length enable.
    pub const EN_DPL: u8 = 1 << 2;

    /// `RF_SETUP` register: the RF_DR_LOW bit.
    pub const RF_DR_LOW: u8 = 1 << 5;
    /// `RF_SETUP` register: the RF_DR_HIGH bit.
    pub const RF_DR_HIGH: u8 = 1 << 3;

    /// Value of the status register's pipe field when the RX FIFO is empty.
    pub const RX_FIFO_EMPTY: u8 = 7;
}

/// Hardware limits of the nRF24L01+.
pub mod limits {
    /// Maximum payload length (in bytes) a single packet can carry.
    pub const MAX_PAYLOAD_LEN: usize = 32;
    /// Shortest address (in bytes) the `SETUP_AW` register can encode.
    pub const MIN_ADDRESS_LEN: usize = 3;
    /// Longest address (in bytes) the `SETUP_AW` register can encode.
    pub const MAX_ADDRESS_LEN: usize = 5;
    /// Number of payloads collected by a single pass of the interrupt handler.
    pub const PAYLOAD_SLOTS: usize = 6;
    /// Number of RX pipes (and RX address slots).
    pub const PIPES: u8 = 6;
}
