//! Errors that can occur when using the MAX30101 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with the MAX30101.
//! It is generic over the underlying I2C error type.

use crate::register::InvalidRegisterField;

/// This represents all possible errors that can occur when using the MAX30101 device.
#[derive(Debug)]
pub enum Max30101Error<BusError> {
    /// An error has occurred in the I2C driver
    Bus(BusError),

    /// The device answered, but the PART_ID (0xFF) register did not hold 0x15.
    ///
    /// Could possibly indicate a different chip on the same address, or a wiring problem.
    InvalidPartId(u8),

    /// Reading from a register returned unexpected data. This should not happen in normal circumstances.
    ///
    /// Could possibly indicate a bug in the driver, or less likely, a faulty chip or interference.
    UnexpectedRegisterData(InvalidRegisterField),

    /// The FIFO was polled before any configuration selected the active channels.
    NotConfigured,

    /// The transport cannot move a single sample in one burst.
    BurstTooSmall {
        /// Largest burst the transport accepts, in bytes.
        max_burst: usize,
        /// Bytes occupied by one FIFO sample with the active channels.
        stride: usize,
    },

    /// Multi-LED slots are numbered 1 to 4.
    InvalidSlot(u8),
}

impl<BusError> From<InvalidRegisterField> for Max30101Error<BusError> {
    fn from(field: InvalidRegisterField) -> Self {
        Max30101Error::UnexpectedRegisterData(field)
    }
}
