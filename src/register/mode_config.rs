//! ### MODE_CONFIG - Mode configuration (`0x09`, 1 byte, R/W)
//!
//! Controls shutdown, soft reset and which LEDs are sampled.
//!
//! Setting `reset` returns every register to its power-on state. The bit clears itself once the
//! reset has finished, so it can be polled for completion.
//!
//! ### Default values
//! 0x00 (no LED mode selected)
//!
//! See also: [`Max30101::soft_reset()`](crate::Max30101::soft_reset()), [`Max30101::shut_down()`](crate::Max30101::shut_down())
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for MODE_CONFIG (0x09) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct ModeConfig;
impl Reg for ModeConfig { const ADDR: u8 = 0x09; }

/// The payload for the MODE_CONFIG (0x09) register.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModeConfigFields {
    /// Power-save mode. Registers stay accessible but no conversions run.
    pub shutdown: bool,

    /// Soft reset request / reset in progress.
    pub reset: bool,

    /// The active LED mode. `None` while the mode bits hold their power-on value of zero.
    pub mode: Option<LedMode>,
}

impl Readable for ModeConfig {
    type Out = ModeConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        let mode = match b[0] & 0b0000_0111 {
            0b000 => None,
            field => Some(
                LedMode::try_from(field)
                    .map_err(|_| InvalidRegisterField::new(ModeConfig::ADDR, b[0], 0))?,
            ),
        };

        Ok(ModeConfigFields {
            shutdown: (b[0] & 0b1000_0000) != 0,
            reset: (b[0] & 0b0100_0000) != 0,
            mode,
        })
    }
}

impl Writable for ModeConfig {
    type In = ModeConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let mut value = 0u8;
        if v.shutdown { value |= 0b1000_0000; }
        if v.reset { value |= 0b0100_0000; }
        if let Some(mode) = v.mode {
            let mode: u8 = mode.into();
            value |= mode;
        }

        out[0] = value;
    }
}

/// Selects which LED channels the device samples, in fixed FIFO order red, infrared, green.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    /// Red only. Known as heart-rate mode in the datasheet.
    RedOnly,
    /// Red and infrared. Known as SpO2 mode in the datasheet.
    RedIr,
    /// Up to four time slots configured through the multi-LED slot registers.
    MultiLed,
}

impl LedMode {
    /// Number of 3-byte fields each FIFO sample carries in this mode.
    pub fn channel_count(&self) -> usize {
        match self {
            LedMode::RedOnly => 1,
            LedMode::RedIr => 2,
            LedMode::MultiLed => 3,
        }
    }
}

impl TryFrom<u8> for LedMode {
    type Error = crate::register::UnexpectedValue;

    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b010 => Ok(LedMode::RedOnly),
            0b011 => Ok(LedMode::RedIr),
            0b111 => Ok(LedMode::MultiLed),
            other => Err(crate::register::UnexpectedValue(other)),
        }
    }
}

impl Into<u8> for LedMode {
    fn into(self) -> u8 {
        match self {
            LedMode::RedOnly => 0b010,
            LedMode::RedIr => 0b011,
            LedMode::MultiLed => 0b111,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_config_decode() {
        let reg = ModeConfig::decode(&[0x00]).unwrap();
        assert!(!reg.shutdown);
        assert!(!reg.reset);
        assert_eq!(None, reg.mode);

        let reg = ModeConfig::decode(&[0b1000_0011]).unwrap();
        assert!(reg.shutdown);
        assert_eq!(Some(LedMode::RedIr), reg.mode);

        let reg = ModeConfig::decode(&[0b0100_0111]).unwrap();
        assert!(reg.reset);
        assert_eq!(Some(LedMode::MultiLed), reg.mode);
    }

    #[test]
    fn mode_config_decode_rejects_reserved_modes() {
        for raw in [0b001u8, 0b100, 0b101, 0b110, 0b1000_0101] {
            let err = ModeConfig::decode(&[raw]).unwrap_err();
            assert_eq!(ModeConfig::ADDR, err.register);
            assert_eq!(raw, err.value);
            assert_eq!(0, err.bit_offset);
        }
    }

    #[test]
    fn mode_config_encode() {
        let mut buffer = [0u8; 1];
        ModeConfig::encode(&ModeConfigFields {
            shutdown: false,
            reset: false,
            mode: Some(LedMode::RedOnly),
        }, &mut buffer);
        assert_eq!([0b0000_0010], buffer);

        ModeConfig::encode(&ModeConfigFields {
            shutdown: true,
            reset: true,
            mode: None,
        }, &mut buffer);
        assert_eq!([0b1100_0000], buffer);
    }

    #[test]
    fn led_mode_channel_count() {
        assert_eq!(1, LedMode::RedOnly.channel_count());
        assert_eq!(2, LedMode::RedIr.channel_count());
        assert_eq!(3, LedMode::MultiLed.channel_count());
    }
}
