//! ### FIFO_DATA - FIFO data stream (`0x07`, streamed, R)
//!
//! Reading this register repeatedly returns successive FIFO bytes; the address does not advance.
//! Each sample occupies 3 bytes per active channel, most significant byte first, with the
//! reading left-aligned to bit 17.
//!
//! Single reads through this marker return one byte. The driver drains the FIFO with
//! [`Bus::read_fifo`](crate::bus::Bus::read_fifo) instead.
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for FIFO_DATA (0x07) register
pub struct FifoData;
impl Reg for FifoData { const ADDR: u8 = 0x07; }

impl Readable for FifoData {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}
