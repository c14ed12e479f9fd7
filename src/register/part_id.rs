//! ### REV_ID / PART_ID - Identification (`0xFE/0xFF`, 1 byte, R)
//!
//! PART_ID always reads 0x15 on a MAX30101 (shared with the MAX30102 and MAX30105).
//! REV_ID is informational.
//!
//! ### Examples
//! ```rust,no_run
//! # use max30101::{Max30101, Max30101Result};
//! # use max30101::bus::Bus;
//! # async fn demo<B: Bus>(mut device: Max30101<B>)
//! #     -> Max30101Result<(), B::Error> {
//! use max30101::register::part_id::PartId;
//!
//! let id = device.read::<PartId>().await?;
//! assert_eq!(id, 0x15);
//! # Ok(()) }
//! ```
#![doc(alias = "PART_ID")]
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the REV_ID (0xFE) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct RevId;
impl Reg for RevId { const ADDR: u8 = 0xFE; }

impl Readable for RevId {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}

/// Marker struct for the PART_ID (0xFF) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct PartId;
impl Reg for PartId { const ADDR: u8 = 0xFF; }

impl Readable for PartId {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}
