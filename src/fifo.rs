//! FIFO arithmetic and sample decoding.
//!
//! The device stores up to 32 samples. Each sample holds one 3-byte, big-endian field per active
//! channel, in the fixed order red, infrared, green. Only the low 18 bits of a field are significant.
//!
//! The functions here are the pure parts of [`Max30101::poll`](crate::Max30101::poll): how many
//! samples are waiting, how large the next burst may be without splitting a sample, and how the
//! bytes of one sample turn into readings.
use crate::register::mode_config::LedMode;

/// Number of samples the device FIFO holds. The FIFO pointers count modulo this value.
pub const FIFO_DEPTH: u8 = 32;

/// Bytes per channel field on the wire.
pub const BYTES_PER_CHANNEL: usize = 3;

/// Mask of the significant bits of a channel field.
pub const SAMPLE_MASK: u32 = 0x3FFFF;

/// One optical measurement path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Ir,
    Green,
}

impl Channel {
    /// Position of the channel within a FIFO sample.
    pub fn index(&self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Ir => 1,
            Channel::Green => 2,
        }
    }

    /// All channels in FIFO order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Ir, Channel::Green];
}

/// One reading per channel, taken by the device at the same instant.
///
/// Channels that are not active in the current [`LedMode`] read as 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub red: u32,
    pub ir: u32,
    pub green: u32,
}

impl Sample {
    pub fn new(red: u32, ir: u32, green: u32) -> Self {
        Self { red, ir, green }
    }

    /// Returns the reading of `channel`.
    pub fn channel(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Red => self.red,
            Channel::Ir => self.ir,
            Channel::Green => self.green,
        }
    }
}

/// Number of unread samples in the device FIFO given its read and write pointers.
pub fn pending_samples(read_pointer: u8, write_pointer: u8) -> usize {
    (write_pointer.wrapping_sub(read_pointer) % FIFO_DEPTH) as usize
}

/// Number of FIFO bytes occupied by one sample in `mode`.
pub fn stride(mode: LedMode) -> usize {
    mode.channel_count() * BYTES_PER_CHANNEL
}

/// Size of the next FIFO burst.
///
/// This is the largest multiple of `stride` that fits both the bytes still to read and the
/// transport limit, so a burst never ends in the middle of a sample. Returns 0 when not even one
/// sample fits.
pub fn chunk_len(bytes_remaining: usize, max_burst: usize, stride: usize) -> usize {
    if stride == 0 {
        return 0;
    }
    let limit = bytes_remaining.min(max_burst);

    limit - limit % stride
}

/// Decodes one big-endian channel field into its 18-bit reading.
pub fn decode_field(field: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, field[0], field[1], field[2]]) & SAMPLE_MASK
}

/// Decodes the bytes of one sample.
///
/// `raw` must hold at least [`stride(mode)`](stride) bytes.
pub fn decode_sample(raw: &[u8], mode: LedMode) -> Sample {
    let mut values = [0u32; 3];
    for (value, field) in values
        .iter_mut()
        .zip(raw.chunks_exact(BYTES_PER_CHANNEL))
        .take(mode.channel_count())
    {
        *value = decode_field([field[0], field[1], field[2]]);
    }

    Sample::new(values[0], values[1], values[2])
}
