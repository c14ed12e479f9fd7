//! ### LED1_PA / LED2_PA / LED3_PA / PILOT_PA - LED pulse amplitude (`0x0C/0x0D/0x0E/0x10`, 1 byte, R/W)
//!
//! Drive current of each LED, linear from 0x00 (off) to 0xFF (50 mA typical).
//! LED1 is red, LED2 is infrared and LED3 is green. The pilot amplitude is used while
//! the device is in proximity mode.
//!
//! ### Default values
//! 0x00
//!
//! ### Examples
//! ```rust,no_run
//! # use max30101::{Max30101, Max30101Result};
//! # use max30101::bus::Bus;
//! # async fn demo<B: Bus>(mut device: Max30101<B>)
//! #     -> Max30101Result<(), B::Error> {
//! use max30101::register::led_amplitude::Led1Amplitude;
//!
//! // About 6.4 mA on the red LED
//! device.write::<Led1Amplitude>(&0x1F).await?;
//! # Ok(()) }
//! ```
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for LED1_PA (0x0C), the red LED.
pub struct Led1Amplitude;
impl Reg for Led1Amplitude { const ADDR: u8 = 0x0C; }

/// Marker type for LED2_PA (0x0D), the infrared LED.
pub struct Led2Amplitude;
impl Reg for Led2Amplitude { const ADDR: u8 = 0x0D; }

/// Marker type for LED3_PA (0x0E), the green LED.
pub struct Led3Amplitude;
impl Reg for Led3Amplitude { const ADDR: u8 = 0x0E; }

/// Marker type for the proximity pilot amplitude (0x10).
pub struct PilotAmplitude;
impl Reg for PilotAmplitude { const ADDR: u8 = 0x10; }

macro_rules! amplitude_register {
    ($marker:ty) => {
        impl Readable for $marker {
            type Out = u8;

            fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
                Ok(b[0])
            }
        }

        impl Writable for $marker {
            type In = u8;

            fn encode(v: &Self::In, out: &mut [u8]) {
                out[0] = *v;
            }
        }
    };
}

amplitude_register!(Led1Amplitude);
amplitude_register!(Led2Amplitude);
amplitude_register!(Led3Amplitude);
amplitude_register!(PilotAmplitude);

/// Converts a pulse amplitude register value into its typical drive current in mA.
pub fn amplitude_to_milliamps(amplitude: u8) -> f32 {
    amplitude as f32 * 50.0 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitude_is_written_verbatim() {
        let mut buffer = [0u8; 1];
        Led2Amplitude::encode(&0x7F, &mut buffer);
        assert_eq!([0x7F], buffer);
        assert_eq!(0x7F, Led2Amplitude::decode(&buffer).unwrap());
    }

    #[test]
    fn amplitude_current() {
        assert_eq!(0.0, amplitude_to_milliamps(0));
        assert_eq!(50.0, amplitude_to_milliamps(0xFF));
    }
}
