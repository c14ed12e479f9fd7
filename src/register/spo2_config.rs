//! ### SPO2_CONFIG - Particle sensing configuration (`0x0A`, 1 byte, R/W)
//!
//! Configures the ADC full-scale range, the sample rate and the LED pulse width.
//! Longer pulses give more bits of resolution but cap the reachable sample rate.
//!
//! ### Default values
//! 0x00 (2048 nA, 50 Hz, 69 µs)
//!
//! ### Examples
//! ```rust,no_run
//! # use max30101::{Max30101, Max30101Result};
//! # use max30101::bus::Bus;
//! # async fn demo<B: Bus>(mut device: Max30101<B>)
//! #     -> Max30101Result<(), B::Error> {
//! use max30101::register::spo2_config::{SpO2Config, SampleRate};
//!
//! let mut cfg = device.read::<SpO2Config>().await?;
//! cfg.sample_rate = SampleRate::R100Hz;
//! device.write::<SpO2Config>(&cfg).await?;
//! # Ok(()) }
//! ```
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for SPO2_CONFIG (0x0A) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct SpO2Config;
impl Reg for SpO2Config { const ADDR: u8 = 0x0A; }

/// The payload for the SPO2_CONFIG (0x0A) register.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpO2ConfigFields {
    pub adc_range: AdcRange,
    pub sample_rate: SampleRate,
    pub pulse_width: PulseWidth,
}

impl Default for SpO2ConfigFields {
    fn default() -> Self {
        Self {
            adc_range: AdcRange::Na2048,
            sample_rate: SampleRate::R50Hz,
            pulse_width: PulseWidth::Us69,
        }
    }
}

impl Readable for SpO2Config {
    type Out = SpO2ConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(SpO2ConfigFields {
            adc_range: AdcRange::from((b[0] >> 5) & 0b11),
            sample_rate: SampleRate::from((b[0] >> 2) & 0b111),
            pulse_width: PulseWidth::from(b[0] & 0b11),
        })
    }
}

impl Writable for SpO2Config {
    type In = SpO2ConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let adc_range: u8 = v.adc_range.into();
        let sample_rate: u8 = v.sample_rate.into();
        let pulse_width: u8 = v.pulse_width.into();
        out[0] = (adc_range << 5) | (sample_rate << 2) | pulse_width;
    }
}

/// ADC full-scale range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcRange {
    /// 2048 nA full scale, 7.81 pA per LSB.
    Na2048,
    /// 4096 nA full scale, 15.63 pA per LSB.
    Na4096,
    /// 8192 nA full scale, 31.25 pA per LSB.
    Na8192,
    /// 16384 nA full scale, 62.5 pA per LSB.
    Na16384,
}

impl AdcRange {
    /// Full-scale current in nA.
    pub fn full_scale_na(&self) -> u32 {
        match self {
            AdcRange::Na2048 => 2048,
            AdcRange::Na4096 => 4096,
            AdcRange::Na8192 => 8192,
            AdcRange::Na16384 => 16384,
        }
    }
}

impl From<u8> for AdcRange {
    fn from(field: u8) -> Self {
        match field & 0b11 {
            0b00 => AdcRange::Na2048,
            0b01 => AdcRange::Na4096,
            0b10 => AdcRange::Na8192,
            _ => AdcRange::Na16384,
        }
    }
}

impl Into<u8> for AdcRange {
    fn into(self) -> u8 {
        self as u8
    }
}

/// Effective sample rate, before on-chip averaging.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleRate {
    R50Hz,
    R100Hz,
    R200Hz,
    R400Hz,
    R800Hz,
    R1000Hz,
    R1600Hz,
    R3200Hz,
}

impl SampleRate {
    /// Samples per second.
    pub fn hz(&self) -> u32 {
        match self {
            SampleRate::R50Hz => 50,
            SampleRate::R100Hz => 100,
            SampleRate::R200Hz => 200,
            SampleRate::R400Hz => 400,
            SampleRate::R800Hz => 800,
            SampleRate::R1000Hz => 1000,
            SampleRate::R1600Hz => 1600,
            SampleRate::R3200Hz => 3200,
        }
    }
}

impl From<u8> for SampleRate {
    fn from(field: u8) -> Self {
        match field & 0b111 {
            0b000 => SampleRate::R50Hz,
            0b001 => SampleRate::R100Hz,
            0b010 => SampleRate::R200Hz,
            0b011 => SampleRate::R400Hz,
            0b100 => SampleRate::R800Hz,
            0b101 => SampleRate::R1000Hz,
            0b110 => SampleRate::R1600Hz,
            _ => SampleRate::R3200Hz,
        }
    }
}

impl Into<u8> for SampleRate {
    fn into(self) -> u8 {
        self as u8
    }
}

/// LED pulse width, which also fixes the ADC resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseWidth {
    /// 69 µs, 15-bit resolution.
    Us69,
    /// 118 µs, 16-bit resolution.
    Us118,
    /// 215 µs, 17-bit resolution.
    Us215,
    /// 411 µs, 18-bit resolution.
    Us411,
}

impl PulseWidth {
    /// Pulse width in µs.
    pub fn micros(&self) -> u32 {
        match self {
            PulseWidth::Us69 => 69,
            PulseWidth::Us118 => 118,
            PulseWidth::Us215 => 215,
            PulseWidth::Us411 => 411,
        }
    }

    /// ADC resolution in bits at this pulse width.
    pub fn resolution_bits(&self) -> u8 {
        match self {
            PulseWidth::Us69 => 15,
            PulseWidth::Us118 => 16,
            PulseWidth::Us215 => 17,
            PulseWidth::Us411 => 18,
        }
    }
}

impl From<u8> for PulseWidth {
    fn from(field: u8) -> Self {
        match field & 0b11 {
            0b00 => PulseWidth::Us69,
            0b01 => PulseWidth::Us118,
            0b10 => PulseWidth::Us215,
            _ => PulseWidth::Us411,
        }
    }
}

impl Into<u8> for PulseWidth {
    fn into(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spo2_config_decode() {
        let reg = SpO2Config::decode(&[0x00]).unwrap();
        assert_eq!(SpO2ConfigFields::default(), reg);

        let reg = SpO2Config::decode(&[0b0010_1111]).unwrap();
        assert_eq!(AdcRange::Na4096, reg.adc_range);
        assert_eq!(SampleRate::R400Hz, reg.sample_rate);
        assert_eq!(PulseWidth::Us411, reg.pulse_width);
    }

    #[test]
    fn spo2_config_encode() {
        let mut buffer = [0u8; 1];
        SpO2Config::encode(&SpO2ConfigFields {
            adc_range: AdcRange::Na16384,
            sample_rate: SampleRate::R3200Hz,
            pulse_width: PulseWidth::Us215,
        }, &mut buffer);
        assert_eq!([0b0111_1110], buffer);

        SpO2Config::encode(&SpO2ConfigFields {
            adc_range: AdcRange::Na4096,
            sample_rate: SampleRate::R400Hz,
            pulse_width: PulseWidth::Us411,
        }, &mut buffer);
        assert_eq!([0b0010_1111], buffer);
    }

    #[test]
    fn pulse_width_resolution() {
        assert_eq!(15, PulseWidth::Us69.resolution_bits());
        assert_eq!(18, PulseWidth::Us411.resolution_bits());
    }
}
