//! LED drive calibration.
//!
//! Each LED is stepped one amplitude unit per sample until its channel's DC level sits within a
//! tolerance band around a target, by default the middle of the 18-bit ADC range. Run it with the
//! [`Calibration`](crate::config::Preset::Calibration) preset, which samples quickly and unaveraged.
//!
//! ```rust,no_run
//! # use embedded_hal_async::delay::DelayNs;
//! # use max30101::{Max30101, Max30101Result};
//! # use max30101::bus::Bus;
//! # async fn demo<B: Bus, D: DelayNs>(mut device: Max30101<B>, mut delay: D) -> Max30101Result<(), B::Error> {
//! use max30101::calibration::{calibrate, CalibrationOutcome, LedCalibrator};
//! use max30101::config::{Configuration, Preset};
//!
//! device.setup(&Configuration::from_preset(Preset::Calibration), &mut delay).await?;
//! let mut calibrator = LedCalibrator::default();
//! let amplitudes = match calibrate(&mut device, &mut calibrator, &mut delay, 5000).await? {
//!     CalibrationOutcome::Converged(a) => a,
//!     CalibrationOutcome::Exhausted(a) => a,
//! };
//! let streaming = Configuration::from_preset(Preset::Streaming).led_amplitudes(amplitudes);
//! device.setup(&streaming, &mut delay).await?;
//! # Ok(()) }
//! ```
use crate::bus::Bus;
use crate::fifo::{Channel, Sample};
use crate::{Max30101, Max30101Result};
use embedded_hal_async::delay::DelayNs;
use log::{debug, trace};

/// Half of the 18-bit ADC range.
pub const DEFAULT_TARGET: u32 = 1 << 17;

pub const DEFAULT_TOLERANCE: u32 = 4096;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LedCalibrator {
    target: u32,
    tolerance: u32,
    amplitudes: [u8; 3],
    calibrated: [bool; 3],
}

impl Default for LedCalibrator {
    /// Calibrates red and infrared from zero. Green is held at full drive.
    fn default() -> Self {
        Self::new([0, 0, u8::MAX])
            .calibrate_channel(Channel::Red, true)
            .calibrate_channel(Channel::Ir, true)
    }
}

impl LedCalibrator {
    /// A calibrator starting from `amplitudes`, with no channel selected for calibration.
    pub fn new(amplitudes: [u8; 3]) -> Self {
        Self {
            target: DEFAULT_TARGET,
            tolerance: DEFAULT_TOLERANCE,
            amplitudes,
            calibrated: [false; 3],
        }
    }

    pub fn target(mut self, target: u32) -> Self {
        self.target = target;

        self
    }

    pub fn tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;

        self
    }

    /// Selects whether `channel` is adjusted. Channels left out keep their starting amplitude.
    pub fn calibrate_channel(mut self, channel: Channel, enable: bool) -> Self {
        self.calibrated[channel.index()] = enable;

        self
    }

    pub fn amplitude(&self, channel: Channel) -> u8 {
        self.amplitudes[channel.index()]
    }

    pub fn amplitudes(&self) -> [u8; 3] {
        self.amplitudes
    }

    /// Feeds one sample. Every calibrated channel outside the band moves one step towards it.
    ///
    /// Returns `true` when every calibrated channel of `sample` was strictly inside the band.
    pub fn adjust(&mut self, sample: &Sample) -> bool {
        let mut converged = true;

        for channel in Channel::ALL {
            if !self.calibrated[channel.index()] {
                continue;
            }

            let value = sample.channel(channel);
            let amplitude = &mut self.amplitudes[channel.index()];
            if value > self.target.saturating_add(self.tolerance) {
                *amplitude = amplitude.saturating_sub(1);
            } else if value < self.target.saturating_sub(self.tolerance) {
                *amplitude = amplitude.saturating_add(1);
            }

            if value.abs_diff(self.target) >= self.tolerance {
                converged = false;
            }
        }

        converged
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationOutcome {
    /// All calibrated channels settled. Holds the amplitudes in channel order.
    Converged([u8; 3]),
    /// The poll budget ran out first. Holds the last amplitudes.
    Exhausted([u8; 3]),
}

/// Runs `calibrator` against a configured device.
///
/// Each of up to `max_polls` rounds drains the FIFO and feeds every sample to the calibrator,
/// writing changed amplitudes back to the device straight away. Between rounds the task sleeps
/// 1 ms.
pub async fn calibrate<B: Bus, D: DelayNs>(
    device: &mut Max30101<B>,
    calibrator: &mut LedCalibrator,
    delay: &mut D,
    max_polls: u32,
) -> Max30101Result<CalibrationOutcome, B::Error> {
    for channel in Channel::ALL {
        device.set_led_amplitude(channel, calibrator.amplitude(channel)).await?;
    }

    for _ in 0..max_polls {
        device.poll().await?;

        while let Some(sample) = device.next_sample() {
            let before = calibrator.amplitudes();
            let converged = calibrator.adjust(&sample);

            for channel in Channel::ALL {
                let amplitude = calibrator.amplitude(channel);
                if amplitude != before[channel.index()] {
                    device.set_led_amplitude(channel, amplitude).await?;
                }
            }
            trace!("calibration {:?} -> {:?}", sample, calibrator.amplitudes());

            if converged {
                debug!("LED calibration converged at {:?}", calibrator.amplitudes());
                return Ok(CalibrationOutcome::Converged(calibrator.amplitudes()));
            }
        }

        delay.delay_ms(1).await;
    }

    debug!("LED calibration gave up at {:?}", calibrator.amplitudes());
    Ok(CalibrationOutcome::Exhausted(calibrator.amplitudes()))
}
