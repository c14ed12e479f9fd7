//! ### FIFO_CONFIG - FIFO configuration (`0x08`, 1 byte, R/W)
//!
//! Contains the on-chip sample averaging, the rollover behavior and the almost-full threshold.
//!
//! ### Default values
//! `sample_averaging = X1`, `rollover = false`, `almost_full = 0`
//!
//! ### Examples
//! ```rust,no_run
//! # use max30101::{Max30101, Max30101Result};
//! # use max30101::bus::Bus;
//! # async fn demo<B: Bus>(mut device: Max30101<B>)
//! #     -> Max30101Result<(), B::Error> {
//! use max30101::register::fifo_config::{FifoConfig, SampleAveraging};
//!
//! // Average 8 samples per FIFO entry and let the FIFO wrap when full
//! let mut cfg = device.read::<FifoConfig>().await?;
//! cfg.sample_averaging = SampleAveraging::X8;
//! cfg.rollover = true;
//! device.write::<FifoConfig>(&cfg).await?;
//! # Ok(()) }
//! ```
//!
//! See also: [`Max30101::set_sample_averaging()`](crate::Max30101::set_sample_averaging())
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for FIFO_CONFIG (0x08) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
///
/// Used with [`Max30101::read::<FifoConfig>()`](crate::Max30101::read) or [`Max30101::write::<FifoConfig>()`](crate::Max30101::write)
pub struct FifoConfig;
impl Reg for FifoConfig { const ADDR: u8 = 0x08; }

/// The payload for the FIFO_CONFIG (0x08) register.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FifoConfigFields {
    /// Number of consecutive samples averaged by the device into each FIFO entry.
    pub sample_averaging: SampleAveraging,

    /// If true, a full FIFO overwrites its oldest entries. If false, new samples are dropped
    /// until the FIFO is read.
    pub rollover: bool,

    /// Number of *empty* FIFO slots left when the almost-full flag is raised (0 to 15).
    pub almost_full: u8,
}

impl Default for FifoConfigFields {
    fn default() -> Self {
        Self {
            sample_averaging: SampleAveraging::X1,
            rollover: false,
            almost_full: 0,
        }
    }
}

impl Readable for FifoConfig {
    type Out = FifoConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(FifoConfigFields {
            sample_averaging: SampleAveraging::from((b[0] >> 5) & 0b111),
            rollover: (b[0] & 0b0001_0000) != 0,
            almost_full: b[0] & 0b0000_1111,
        })
    }
}

impl Writable for FifoConfig {
    type In = FifoConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let averaging: u8 = v.sample_averaging.into();
        let mut value = averaging << 5;
        if v.rollover { value |= 0b0001_0000; }
        value |= v.almost_full & 0b0000_1111;

        out[0] = value;
    }
}

/// On-chip sample averaging, as the number of samples combined into one FIFO entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleAveraging {
    X1,
    X2,
    X4,
    X8,
    X16,
    X32,
}

impl SampleAveraging {
    /// The number of samples averaged.
    pub fn factor(&self) -> u8 {
        match self {
            SampleAveraging::X1 => 1,
            SampleAveraging::X2 => 2,
            SampleAveraging::X4 => 4,
            SampleAveraging::X8 => 8,
            SampleAveraging::X16 => 16,
            SampleAveraging::X32 => 32,
        }
    }
}

impl From<u8> for SampleAveraging {
    fn from(field: u8) -> Self {
        match field {
            0b000 => SampleAveraging::X1,
            0b001 => SampleAveraging::X2,
            0b010 => SampleAveraging::X4,
            0b011 => SampleAveraging::X8,
            0b100 => SampleAveraging::X16,
            // 0b101, 0b110 and 0b111 all select 32
            _ => SampleAveraging::X32,
        }
    }
}

impl Into<u8> for SampleAveraging {
    fn into(self) -> u8 {
        match self {
            SampleAveraging::X1 => 0b000,
            SampleAveraging::X2 => 0b001,
            SampleAveraging::X4 => 0b010,
            SampleAveraging::X8 => 0b011,
            SampleAveraging::X16 => 0b100,
            SampleAveraging::X32 => 0b101,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_config_decode() {
        let reg = FifoConfig::decode(&[0b0101_0000]).unwrap();
        assert_eq!(SampleAveraging::X4, reg.sample_averaging);
        assert!(reg.rollover);
        assert_eq!(0, reg.almost_full);

        let reg = FifoConfig::decode(&[0b1110_1111]).unwrap();
        assert_eq!(SampleAveraging::X32, reg.sample_averaging);
        assert!(!reg.rollover);
        assert_eq!(15, reg.almost_full);
    }

    #[test]
    fn fifo_config_encode() {
        let mut buffer = [0u8; 1];
        FifoConfig::encode(&FifoConfigFields::default(), &mut buffer);
        assert_eq!([0], buffer);

        FifoConfig::encode(&FifoConfigFields {
            sample_averaging: SampleAveraging::X4,
            rollover: true,
            almost_full: 2,
        }, &mut buffer);
        assert_eq!([0b0101_0010], buffer);

        FifoConfig::encode(&FifoConfigFields {
            sample_averaging: SampleAveraging::X32,
            rollover: false,
            almost_full: 0xFF,
        }, &mut buffer);
        assert_eq!([0b1010_1111], buffer);
    }
}
