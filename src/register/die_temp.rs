//! ### DIE_TINT / DIE_TFRAC / DIE_TEMP_CONFIG - Die temperature (`0x1F/0x20/0x21`, 1 byte)
//!
//! Writing `TEMP_EN` to DIE_TEMP_CONFIG starts a single conversion. When it finishes the device
//! raises `die_temp_rdy` in INT_STATUS_2 and clears `TEMP_EN`. The result is an integer part in
//! two's complement (DIE_TINT) plus a fraction in 1/16 °C steps (DIE_TFRAC). Reading DIE_TFRAC
//! clears the ready flag.
//!
//! ### Default values
//! 0x00
//!
//! See also: [`Max30101::read_temperature()`](crate::Max30101::read_temperature())
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Degrees Celsius per DIE_TFRAC step.
pub const FRACTION_STEP: f32 = 0.0625;

/// Marker type for DIE_TINT (0x1F) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct DieTempInteger;
impl Reg for DieTempInteger { const ADDR: u8 = 0x1F; }

impl Readable for DieTempInteger {
    type Out = i8;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0] as i8)
    }
}

/// Marker type for DIE_TFRAC (0x20) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct DieTempFraction;
impl Reg for DieTempFraction { const ADDR: u8 = 0x20; }

impl Readable for DieTempFraction {
    type Out = u8;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0] & 0b0000_1111)
    }
}

/// Marker type for DIE_TEMP_CONFIG (0x21) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct DieTempConfig;
impl Reg for DieTempConfig { const ADDR: u8 = 0x21; }

impl Readable for DieTempConfig {
    type Out = bool;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok((b[0] & 0b1) != 0)
    }
}

impl Writable for DieTempConfig {
    /// `true` starts a conversion.
    type In = bool;

    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = *v as u8;
    }
}

/// Combines the two die temperature registers into °C.
pub fn combine(integer: i8, fraction: u8) -> f32 {
    integer as f32 + (fraction & 0b0000_1111) as f32 * FRACTION_STEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_is_signed() {
        assert_eq!(-1, DieTempInteger::decode(&[0xFF]).unwrap());
        assert_eq!(25, DieTempInteger::decode(&[0x19]).unwrap());
        assert_eq!(-128, DieTempInteger::decode(&[0x80]).unwrap());
    }

    #[test]
    fn fraction_uses_low_nibble() {
        assert_eq!(0x0F, DieTempFraction::decode(&[0xFF]).unwrap());
    }

    #[test]
    fn combine_temperature() {
        assert_eq!(25.0, combine(25, 0));
        assert_eq!(25.5, combine(25, 8));
        assert_eq!(-0.9375, combine(-1, 1));
        assert_eq!(127.9375, combine(127, 15));
    }

    #[test]
    fn config_encode() {
        let mut buffer = [0u8; 1];
        DieTempConfig::encode(&true, &mut buffer);
        assert_eq!([1], buffer);
    }
}
