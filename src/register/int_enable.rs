//! ### INT_ENABLE_1/2 - Interrupt enable (`0x02/0x03`, 1 byte, R/W)
//!
//! Selects which sources may assert the interrupt status flags. The driver never waits on the
//! interrupt line itself, but the die temperature flag is polled through INT_STATUS_2.
//!
//! ### Default values
//! 0x00
//!
//! See also: [`Max30101::set_interrupts()`](crate::Max30101::set_interrupts())
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for INT_ENABLE_1 (0x02) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct IntEnable1;
impl Reg for IntEnable1 { const ADDR: u8 = 0x02; }

/// The payload for the INT_ENABLE_1 (0x02) register.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct IntEnable1Fields {
    pub a_full_en: bool,
    pub ppg_rdy_en: bool,
    pub alc_ovf_en: bool,
    pub prox_int_en: bool,
}

impl Readable for IntEnable1 {
    type Out = IntEnable1Fields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntEnable1Fields {
            a_full_en:   (b[0] & 0b1000_0000) != 0,
            ppg_rdy_en:  (b[0] & 0b0100_0000) != 0,
            alc_ovf_en:  (b[0] & 0b0010_0000) != 0,
            prox_int_en: (b[0] & 0b0001_0000) != 0,
        })
    }
}

impl Writable for IntEnable1 {
    type In = IntEnable1Fields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let mut value = 0u8;
        if v.a_full_en { value |= 0b1000_0000; }
        if v.ppg_rdy_en { value |= 0b0100_0000; }
        if v.alc_ovf_en { value |= 0b0010_0000; }
        if v.prox_int_en { value |= 0b0001_0000; }

        out[0] = value;
    }
}

/// Marker type for INT_ENABLE_2 (0x03) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct IntEnable2;
impl Reg for IntEnable2 { const ADDR: u8 = 0x03; }

/// The payload for the INT_ENABLE_2 (0x03) register.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct IntEnable2Fields {
    pub die_temp_rdy_en: bool,
}

impl Readable for IntEnable2 {
    type Out = IntEnable2Fields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntEnable2Fields {
            die_temp_rdy_en: (b[0] & 0b0000_0010) != 0,
        })
    }
}

impl Writable for IntEnable2 {
    type In = IntEnable2Fields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = if v.die_temp_rdy_en { 0b0000_0010 } else { 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_enable1_encode() {
        let mut buffer = [0u8; 1];
        IntEnable1::encode(&IntEnable1Fields::default(), &mut buffer);
        assert_eq!([0], buffer);

        IntEnable1::encode(&IntEnable1Fields {
            a_full_en: true,
            ppg_rdy_en: false,
            alc_ovf_en: true,
            prox_int_en: false,
        }, &mut buffer);
        assert_eq!([0b1010_0000], buffer);
    }

    #[test]
    fn int_enable1_decode() {
        let reg = IntEnable1::decode(&[0b0101_0000]).unwrap();
        assert!(!reg.a_full_en);
        assert!(reg.ppg_rdy_en);
        assert!(!reg.alc_ovf_en);
        assert!(reg.prox_int_en);
    }

    #[test]
    fn int_enable2_encode() {
        let mut buffer = [0u8; 1];
        IntEnable2::encode(&IntEnable2Fields { die_temp_rdy_en: true }, &mut buffer);
        assert_eq!([0b10], buffer);
        assert!(IntEnable2::decode(&buffer).unwrap().die_temp_rdy_en);
    }
}
