//! Acquisition parameters and their register encodings.
//!
//! A [`Configuration`] is applied with [`Max30101::setup`](crate::Max30101::setup). It can be built
//! three ways: from typed values with the chained setters, from a [`Preset`], or from plain numbers
//! with [`Configuration::from_requested`], which snaps unsupported requests to a supported encoding.
use crate::fifo::Channel;
use crate::register::fifo_config::SampleAveraging;
use crate::register::mode_config::LedMode;
use crate::register::spo2_config::{AdcRange, PulseWidth, SampleRate};

/// LED drive amplitude programmed by [`Configuration::default`], about 6.2 mA.
pub const DEFAULT_LED_AMPLITUDE: u8 = 0x1F;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Configuration {
    pub(crate) led_amplitudes: [u8; 3],
    pub(crate) proximity_amplitude: u8,
    pub(crate) sample_averaging: SampleAveraging,
    pub(crate) led_mode: LedMode,
    pub(crate) sample_rate: SampleRate,
    pub(crate) pulse_width: PulseWidth,
    pub(crate) adc_range: AdcRange,
    pub(crate) fifo_rollover: bool,
    pub(crate) fifo_almost_full: u8,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            led_amplitudes: [DEFAULT_LED_AMPLITUDE; 3],
            proximity_amplitude: 0,
            sample_averaging: SampleAveraging::X4,
            led_mode: LedMode::MultiLed,
            sample_rate: SampleRate::R400Hz,
            pulse_width: PulseWidth::Us411,
            adc_range: AdcRange::Na4096,
            fifo_rollover: true,
            fifo_almost_full: 0,
        }
    }
}

impl Configuration {
    /// Builds a configuration from untyped numeric requests.
    ///
    /// - `sample_averaging` must be one of 1, 2, 4, 8, 16 or 32, anything else selects 4.
    /// - `channels` of 1 selects red only, 2 selects red and infrared, anything else all three.
    /// - `sample_rate_hz`, `pulse_width_us` and `adc_range_na` select the largest supported value
    ///   not above the request. A request above the top value selects the *smallest* value.
    ///
    /// # Examples
    /// ```rust
    /// use max30101::config::Configuration;
    /// use max30101::register::spo2_config::SampleRate;
    ///
    /// let config = Configuration::from_requested([0x1F; 3], 4, 3, 5000, 411, 4096);
    /// assert_eq!(config.get_sample_rate(), SampleRate::R50Hz);
    /// ```
    pub fn from_requested(
        led_amplitudes: [u8; 3],
        sample_averaging: u8,
        channels: u8,
        sample_rate_hz: u32,
        pulse_width_us: u32,
        adc_range_na: u32,
    ) -> Self {
        Configuration::default()
            .led_amplitudes(led_amplitudes)
            .sample_averaging(encode_sample_averaging(sample_averaging))
            .led_mode(encode_channel_count(channels))
            .sample_rate(encode_sample_rate(sample_rate_hz))
            .pulse_width(encode_pulse_width(pulse_width_us))
            .adc_range(encode_adc_range(adc_range_na))
    }

    /// Red and infrared only, green LED off. The usual setup for SpO2 measurements.
    pub fn pulse_oximetry(ir_amplitude: u8, red_amplitude: u8) -> Self {
        Configuration::default()
            .led_mode(LedMode::RedIr)
            .led_amplitudes([red_amplitude, ir_amplitude, 0])
    }

    pub fn led_amplitudes(mut self, amplitudes: [u8; 3]) -> Self {
        self.led_amplitudes = amplitudes;

        self
    }

    pub fn led_amplitude(mut self, channel: Channel, amplitude: u8) -> Self {
        self.led_amplitudes[channel.index()] = amplitude;

        self
    }

    pub fn proximity_amplitude(mut self, amplitude: u8) -> Self {
        self.proximity_amplitude = amplitude;

        self
    }

    pub fn sample_averaging(mut self, sample_averaging: SampleAveraging) -> Self {
        self.sample_averaging = sample_averaging;

        self
    }

    /// Selects the active channels. This also decides how many bytes each FIFO sample occupies.
    pub fn led_mode(mut self, led_mode: LedMode) -> Self {
        self.led_mode = led_mode;

        self
    }

    pub fn sample_rate(mut self, sample_rate: SampleRate) -> Self {
        self.sample_rate = sample_rate;

        self
    }

    pub fn pulse_width(mut self, pulse_width: PulseWidth) -> Self {
        self.pulse_width = pulse_width;

        self
    }

    pub fn adc_range(mut self, adc_range: AdcRange) -> Self {
        self.adc_range = adc_range;

        self
    }

    /// Lets the device overwrite its oldest samples when the FIFO is full. Enabled by default.
    pub fn fifo_rollover(mut self, enable: bool) -> Self {
        self.fifo_rollover = enable;

        self
    }

    /// Number of free FIFO slots (0 to 15) that raises the almost-full flag.
    pub fn fifo_almost_full(mut self, free_slots: u8) -> Self {
        self.fifo_almost_full = free_slots & 0x0F;

        self
    }

    pub fn get_led_amplitude(&self, channel: Channel) -> u8 {
        self.led_amplitudes[channel.index()]
    }

    pub fn get_led_mode(&self) -> LedMode {
        self.led_mode
    }

    pub fn get_sample_averaging(&self) -> SampleAveraging {
        self.sample_averaging
    }

    pub fn get_sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn get_pulse_width(&self) -> PulseWidth {
        self.pulse_width
    }

    pub fn get_adc_range(&self) -> AdcRange {
        self.adc_range
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::Default => Configuration::default(),
            Preset::PulseOximetry => {
                Configuration::pulse_oximetry(DEFAULT_LED_AMPLITUDE, DEFAULT_LED_AMPLITUDE)
            }
            Preset::Calibration => Configuration::default()
                .led_amplitudes([0; 3])
                .sample_averaging(SampleAveraging::X1)
                .sample_rate(SampleRate::R1600Hz)
                .pulse_width(PulseWidth::Us215)
                .adc_range(AdcRange::Na16384),
            Preset::Streaming => Configuration::default()
                .sample_averaging(SampleAveraging::X2)
                .sample_rate(SampleRate::R100Hz)
                .pulse_width(PulseWidth::Us215)
                .adc_range(AdcRange::Na16384),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Preset {
    /// All three channels at 400 Hz, 411 µs pulses, 4096 nA range, 4x averaging.
    Default,
    /// Red and infrared only, green off.
    PulseOximetry,
    /// Fast unaveraged sampling with the LEDs off, the starting point for [`LedCalibrator`](crate::calibration::LedCalibrator).
    Calibration,
    /// All three channels at 100 Hz with 2x averaging, full ADC range.
    Streaming,
}

/// Exact match on a supported averaging factor, otherwise 4x.
pub fn encode_sample_averaging(factor: u8) -> SampleAveraging {
    match factor {
        1 => SampleAveraging::X1,
        2 => SampleAveraging::X2,
        4 => SampleAveraging::X4,
        8 => SampleAveraging::X8,
        16 => SampleAveraging::X16,
        32 => SampleAveraging::X32,
        _ => SampleAveraging::X4,
    }
}

pub fn encode_channel_count(channels: u8) -> LedMode {
    match channels {
        1 => LedMode::RedOnly,
        2 => LedMode::RedIr,
        _ => LedMode::MultiLed,
    }
}

pub fn encode_sample_rate(hz: u32) -> SampleRate {
    ladder(
        hz,
        &[
            (50, SampleRate::R50Hz),
            (100, SampleRate::R100Hz),
            (200, SampleRate::R200Hz),
            (400, SampleRate::R400Hz),
            (800, SampleRate::R800Hz),
            (1000, SampleRate::R1000Hz),
            (1600, SampleRate::R1600Hz),
            (3200, SampleRate::R3200Hz),
        ],
    )
}

pub fn encode_pulse_width(us: u32) -> PulseWidth {
    ladder(
        us,
        &[
            (69, PulseWidth::Us69),
            (118, PulseWidth::Us118),
            (215, PulseWidth::Us215),
            (411, PulseWidth::Us411),
        ],
    )
}

pub fn encode_adc_range(na: u32) -> AdcRange {
    ladder(
        na,
        &[
            (2048, AdcRange::Na2048),
            (4096, AdcRange::Na4096),
            (8192, AdcRange::Na8192),
            (16384, AdcRange::Na16384),
        ],
    )
}

/// Walks `steps` (ascending) and picks the entry whose successor is the first value strictly above
/// `request`. The top entry only matches exactly. Everything above it falls back to the bottom entry.
fn ladder<T: Copy>(request: u32, steps: &[(u32, T)]) -> T {
    for pair in steps.windows(2) {
        if request < pair[1].0 {
            return pair[0].1;
        }
    }

    match steps.last() {
        Some(&(top, value)) if request == top => value,
        _ => steps[0].1,
    }
}
