#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod bus;
mod driver;
mod error;
mod fault;
mod frame;

pub use bus::{BitBangTransport, SpiTransport, Transport, DEFAULT_SETTLE_DELAY_US};
pub use driver::{
    Config, Max31855, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, TEMPERATURE_INVALID,
};
pub use error::Error;
pub use fault::FaultCode;
pub use frame::RawFrame;
