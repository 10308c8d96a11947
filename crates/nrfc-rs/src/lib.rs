#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Nrfc::new()`](fn@crate::radio::Nrfc::new)
//! - [`Nrfc::init()`](radio/struct.Nrfc.html#method.init)
//! - [`Nrfc::configure()`](radio/struct.Nrfc.html#method.configure)
//! - [`Nrfc::send_to()`](radio/struct.Nrfc.html#method.send_to)
//! - [`Nrfc::handle_interrupt()`](radio/struct.Nrfc.html#method.handle_interrupt)
//! - [`SharedNrfc::send_to_timeout()`](fn@crate::radio::SharedNrfc::send_to_timeout)
//! - [`SharedNrfc::on_interrupt()`](fn@crate::radio::SharedNrfc::on_interrupt)
//! - [`RadioEvents`](trait@crate::radio::RadioEvents)
//!
//! ## Configuration API
//!
//! - [`Nrfc::configure_with()`](radio/struct.Nrfc.html#method.configure_with)
//! - [`Nrfc::set_address()`](radio/struct.Nrfc.html#method.set_address)
//! - [`Nrfc::get_address()`](radio/struct.Nrfc.html#method.get_address)
//! - [`Nrfc::set_channel()`](radio/struct.Nrfc.html#method.set_channel)
//! - [`Nrfc::get_channel()`](radio/struct.Nrfc.html#method.get_channel)
//! - [`Nrfc::get_frequency_mhz()`](radio/struct.Nrfc.html#method.get_frequency_mhz)
//! - [`Nrfc::set_data_rate()`](radio/struct.Nrfc.html#method.set_data_rate)
//! - [`Nrfc::get_data_rate()`](radio/struct.Nrfc.html#method.get_data_rate)
//! - [`Nrfc::set_auto_retries()`](radio/struct.Nrfc.html#method.set_auto_retries)
//! - [`Nrfc::enable()`](radio/struct.Nrfc.html#method.enable)
//! - [`Nrfc::disable()`](radio/struct.Nrfc.html#method.disable)
//! - [`Nrfc::is_enabled()`](radio/struct.Nrfc.html#method.is_enabled)
//! - [`Nrfc::power_down()`](radio/struct.Nrfc.html#method.power_down)
//! - [`Nrfc::is_powered()`](radio/struct.Nrfc.html#method.is_powered)
//!
//! ## Advanced API
//!
//! - [`Nrfc::get_fifo_state()`](radio/struct.Nrfc.html#method.get_fifo_state)
//! - [`Nrfc::flush_rx()`](radio/struct.Nrfc.html#method.flush_rx)
//! - [`Nrfc::flush_tx()`](radio/struct.Nrfc.html#method.flush_tx)
//! - [`Nrfc::update()`](radio/struct.Nrfc.html#method.update)
//! - [`Nrfc::get_status_flags()`](radio/struct.Nrfc.html#method.get_status_flags)
//! - [`Nrfc::clear_status_flags()`](radio/struct.Nrfc.html#method.clear_status_flags)
//!
#![no_std]

mod fmt;

mod types;
pub use types::{Address, AddressSlot, ConfigError, DataRate, FifoState, Payload, StatusFlags};
pub mod radio;
