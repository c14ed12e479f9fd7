//! ### INT_STATUS_1/2 - Interrupt status (`0x00/0x01`, 1 byte, R)
//!
//! Reports which interrupt sources are asserted. Both registers are cleared on read, and the
//! die temperature flag is additionally cleared by reading DIE_TFRAC (0x20).
//!
//! ### Default values
//! INT_STATUS_1: `pwr_rdy` is set after power-up.
//!
//! INT_STATUS_2: 0x00
//!
//! ### Examples
//! ```rust,no_run
//! # use max30101::{Max30101, Max30101Result};
//! # use max30101::bus::Bus;
//! # async fn demo<B: Bus>(mut device: Max30101<B>)
//! #     -> Max30101Result<(), B::Error> {
//! use max30101::register::int_status::IntStatus2;
//!
//! let status = device.read::<IntStatus2>().await?;
//! if status.die_temp_rdy {
//!     // a temperature conversion has finished
//! }
//! # Ok(()) }
//! ```
//!
//! See also: [`Max30101::interrupt_status()`](crate::Max30101::interrupt_status())
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for INT_STATUS_1 (0x00) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct IntStatus1;
impl Reg for IntStatus1 { const ADDR: u8 = 0x00; }

/// The payload for the INT_STATUS_1 (0x00) register.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntStatus1Flags {
    /// The FIFO holds as many unread samples as the almost-full threshold allows.
    pub a_full: bool,
    /// A new sample is present in the FIFO.
    pub ppg_rdy: bool,
    /// The ambient light cancellation has reached its limit.
    pub alc_ovf: bool,
    /// The proximity threshold has been crossed.
    pub prox_int: bool,
    /// The device has powered up and is ready to collect data.
    pub pwr_rdy: bool,
}

impl Readable for IntStatus1 {
    type Out = IntStatus1Flags;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntStatus1Flags {
            a_full:   (b[0] & 0b1000_0000) != 0,
            ppg_rdy:  (b[0] & 0b0100_0000) != 0,
            alc_ovf:  (b[0] & 0b0010_0000) != 0,
            prox_int: (b[0] & 0b0001_0000) != 0,
            pwr_rdy:  (b[0] & 0b0000_0001) != 0,
        })
    }
}

/// Marker type for INT_STATUS_2 (0x01) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct IntStatus2;
impl Reg for IntStatus2 { const ADDR: u8 = 0x01; }

/// The payload for the INT_STATUS_2 (0x01) register.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct IntStatus2Flags {
    /// A die temperature conversion has finished.
    pub die_temp_rdy: bool,
}

impl Readable for IntStatus2 {
    type Out = IntStatus2Flags;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntStatus2Flags {
            die_temp_rdy: (b[0] & 0b0000_0010) != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_status1_decode() {
        let reg = IntStatus1::decode(&[0b1000_0000]).unwrap();
        assert!(reg.a_full);
        assert!(!reg.ppg_rdy);

        let reg = IntStatus1::decode(&[0b0100_0000]).unwrap();
        assert!(reg.ppg_rdy);

        let reg = IntStatus1::decode(&[0b0010_0000]).unwrap();
        assert!(reg.alc_ovf);

        let reg = IntStatus1::decode(&[0b0001_0000]).unwrap();
        assert!(reg.prox_int);

        let reg = IntStatus1::decode(&[0b0000_0001]).unwrap();
        assert!(reg.pwr_rdy);
        assert!(!reg.a_full);
    }

    #[test]
    fn int_status2_decode() {
        assert!(IntStatus2::decode(&[0b10]).unwrap().die_temp_rdy);
        assert!(!IntStatus2::decode(&[0b01]).unwrap().die_temp_rdy);
    }
}
