//! Typed catalog of the MAX30101 registers.
//!
//! Every register (or register group sharing one layout) has a marker type implementing [`Reg`] and
//! [`Readable`] and/or [`Writable`]. Use the markers with [`Max30101::read`](crate::Max30101::read)
//! and [`Max30101::write`](crate::Max30101::write), or prefer the convenience methods on the driver.
pub mod int_status;
pub mod int_enable;
pub mod fifo_pointers;
pub mod fifo_data;
pub mod fifo_config;
pub mod mode_config;
pub mod spo2_config;
pub mod led_amplitude;
pub mod multi_led;
pub mod die_temp;
pub mod prox_int_thresh;
pub mod part_id;

#[derive(Debug)]
pub struct InvalidRegisterField{
    pub register: u8,
    pub value: u8,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u8, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

pub struct UnexpectedValue(pub u8);

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}
