//! ### FIFO_WR_PTR / OVF_COUNTER / FIFO_RD_PTR - FIFO pointers (`0x04/0x05/0x06`, 1 byte, R/W)
//!
//! The device keeps 32 samples in its FIFO. The write pointer names the slot the next sample
//! will be written to, the read pointer names the slot the next FIFO_DATA read returns, and the
//! overflow counter counts samples lost while the FIFO was full. All three are 5-bit values.
//!
//! Writing 0 to all three registers empties the FIFO.
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
//! use max30101::register::fifo_pointers::{FifoReadPointer, FifoWritePointer};
//!
//! let read = device.read::<FifoReadPointer>().await?;
//! let write = device.read::<FifoWritePointer>().await?;
//! println!("{} samples pending", max30101::fifo::pending_samples(read, write));
//! # Ok(()) }
//! ```
//!
//! See also: [`Max30101::clear_fifo()`](crate::Max30101::clear_fifo())
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

const POINTER_MASK: u8 = 0b0001_1111;

/// Marker type for FIFO_WR_PTR (0x04) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct FifoWritePointer;
impl Reg for FifoWritePointer { const ADDR: u8 = 0x04; }

/// Marker type for OVF_COUNTER (0x05) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
///
/// Saturates at 0x1F.
pub struct OverflowCounter;
impl Reg for OverflowCounter { const ADDR: u8 = 0x05; }

/// Marker type for FIFO_RD_PTR (0x06) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct FifoReadPointer;
impl Reg for FifoReadPointer { const ADDR: u8 = 0x06; }

macro_rules! pointer_register {
    ($marker:ty) => {
        impl Readable for $marker {
            type Out = u8;

            fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
                Ok(b[0] & POINTER_MASK)
            }
        }

        impl Writable for $marker {
            type In = u8;

            fn encode(v: &Self::In, out: &mut [u8]) {
                out[0] = *v & POINTER_MASK;
            }
        }
    };
}

pointer_register!(FifoWritePointer);
pointer_register!(OverflowCounter);
pointer_register!(FifoReadPointer);
