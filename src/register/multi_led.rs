//! ### MULTI_LED_CTRL1/2 - Multi-LED slot control (`0x11/0x12`, 1 byte, R/W)
//!
//! In multi-LED mode the device fires up to four time slots per sample, in order, and writes one
//! 3-byte FIFO field per enabled slot. Slots 1 and 2 live in MULTI_LED_CTRL1, slots 3 and 4 in
//! MULTI_LED_CTRL2.
//!
//! ### Default values
//! 0x00 (all slots disabled)
//!
//! See also: [`Max30101::enable_slot()`](crate::Max30101::enable_slot())
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for MULTI_LED_CTRL1 (0x11) register, holding slots 1 and 2.
pub struct SlotControl1;
impl Reg for SlotControl1 { const ADDR: u8 = 0x11; }

/// Marker type for MULTI_LED_CTRL2 (0x12) register, holding slots 3 and 4.
pub struct SlotControl2;
impl Reg for SlotControl2 { const ADDR: u8 = 0x12; }

/// The payload for both slot control registers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotPair {
    /// Slot 1 (or 3), bits 2:0.
    pub first: SlotDevice,
    /// Slot 2 (or 4), bits 6:4.
    pub second: SlotDevice,
}

impl Default for SlotPair {
    fn default() -> Self {
        Self {
            first: SlotDevice::Disabled,
            second: SlotDevice::Disabled,
        }
    }
}

macro_rules! slot_register {
    ($marker:ty) => {
        impl Readable for $marker {
            type Out = SlotPair;

            fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
                Ok(SlotPair {
                    first: SlotDevice::from(b[0] & 0b111),
                    second: SlotDevice::from((b[0] >> 4) & 0b111),
                })
            }
        }

        impl Writable for $marker {
            type In = SlotPair;

            fn encode(v: &Self::In, out: &mut [u8]) {
                let first: u8 = v.first.into();
                let second: u8 = v.second.into();
                out[0] = first | (second << 4);
            }
        }
    };
}

slot_register!(SlotControl1);
slot_register!(SlotControl2);

/// What a multi-LED time slot fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotDevice {
    Disabled,
    RedLed,
    IrLed,
    GreenLed,
    NonePilot,
    RedPilot,
    IrPilot,
    GreenPilot,
}

impl From<u8> for SlotDevice {
    fn from(field: u8) -> Self {
        match field & 0b111 {
            0 => SlotDevice::Disabled,
            1 => SlotDevice::RedLed,
            2 => SlotDevice::IrLed,
            3 => SlotDevice::GreenLed,
            4 => SlotDevice::NonePilot,
            5 => SlotDevice::RedPilot,
            6 => SlotDevice::IrPilot,
            _ => SlotDevice::GreenPilot,
        }
    }
}

impl Into<u8> for SlotDevice {
    fn into(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_control_encode() {
        let mut buffer = [0u8; 1];
        SlotControl1::encode(&SlotPair {
            first: SlotDevice::RedLed,
            second: SlotDevice::IrLed,
        }, &mut buffer);
        assert_eq!([0b0010_0001], buffer);

        SlotControl2::encode(&SlotPair {
            first: SlotDevice::GreenLed,
            second: SlotDevice::Disabled,
        }, &mut buffer);
        assert_eq!([0b0000_0011], buffer);
    }

    #[test]
    fn slot_control_decode() {
        let reg = SlotControl1::decode(&[0b0111_0101]).unwrap();
        assert_eq!(SlotDevice::RedPilot, reg.first);
        assert_eq!(SlotDevice::GreenPilot, reg.second);

        let reg = SlotControl2::decode(&[0x00]).unwrap();
        assert_eq!(SlotPair::default(), reg);
    }
}
