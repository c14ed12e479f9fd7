//! ### PROX_INT_THRESH - Proximity interrupt threshold (`0x30`, 1 byte, R/W)
//!
//! The 8 most significant bits of the infrared ADC count that ends proximity mode and starts
//! regular sampling.
//!
//! ### Default values
//! 0x00
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for PROX_INT_THRESH (0x30) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct ProxIntThreshold;
impl Reg for ProxIntThreshold { const ADDR: u8 = 0x30; }

impl Readable for ProxIntThreshold {
    type Out = u8;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}

impl Writable for ProxIntThreshold {
    type In = u8;

    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = *v;
    }
}
