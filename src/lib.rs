//! Async driver for the MAX30101 pulse oximetry and heart-rate sensor.
//!
//! The driver programs the device over I2C and drains its 32-sample FIFO into a ring of decoded
//! per-channel readings. Readings can be taken in arrival order ([`Max30101::next_sample`]) or as
//! the newest value ([`Max30101::red`] and friends).
//!
//! ```rust,no_run
//! # use embedded_hal_async::delay::DelayNs;
//! # use embedded_hal_async::i2c::I2c;
//! # use max30101::Max30101Result;
//! use max30101::Max30101;
//! use max30101::config::{Configuration, Preset};
//! # async fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> Max30101Result<(), I::Error> {
//!
//! let mut device = Max30101::new_i2c(i2c).await?;
//! device.setup(&Configuration::from_preset(Preset::Streaming), &mut delay).await?;
//!
//! loop {
//!     device.poll().await?;
//!     while let Some(sample) = device.next_sample() {
//!         // feed sample.red, sample.ir, sample.green to the signal chain
//!     }
//!     delay.delay_ms(10).await;
//! }
//! # }
//! ```
#![no_std]

pub mod bus;
pub mod calibration;
pub mod config;
pub mod error;
pub mod fifo;
pub mod handoff;
pub mod register;
pub mod ring;
mod max30101;

#[cfg(test)]
mod testing;

pub use crate::max30101::{
    InterruptStatus, Interrupts, Max30101, Max30101Result, TemperatureReading, WaitOutcome,
    DEFAULT_LATEST_TIMEOUT_MS, RESET_TIMEOUT_MS, TEMPERATURE_TIMEOUT_MS,
};
