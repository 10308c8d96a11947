//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod nrfc;
pub use nrfc::{
    check_address_width, check_payload_length, commands, limits, mnemonics, registers, Nrf24Error,
    Nrfc,
};

mod config;
pub use config::RadioConfig;

mod events;
pub use events::{ChannelEvents, RadioEvent, RadioEvents, TxOutcome};

mod shared;
pub use shared::SharedNrfc;
