use crate::bus::{Bus, I2c, MAX30101_ADDRESS, MAX_BURST_BYTES};
use crate::config::Configuration;
use crate::error::Max30101Error;
use crate::fifo::{self, Channel, Sample};
use crate::register::die_temp::{self, DieTempConfig, DieTempFraction, DieTempInteger};
use crate::register::fifo_config::{FifoConfig, FifoConfigFields, SampleAveraging};
use crate::register::fifo_pointers::{FifoReadPointer, FifoWritePointer, OverflowCounter};
use crate::register::int_enable::{IntEnable1, IntEnable1Fields, IntEnable2, IntEnable2Fields};
use crate::register::int_status::{IntStatus1, IntStatus1Flags, IntStatus2};
use crate::register::led_amplitude::{Led1Amplitude, Led2Amplitude, Led3Amplitude, PilotAmplitude};
use crate::register::mode_config::{LedMode, ModeConfig};
use crate::register::multi_led::{SlotControl1, SlotControl2, SlotDevice, SlotPair};
use crate::register::part_id::{PartId, RevId};
use crate::register::prox_int_thresh::ProxIntThreshold;
use crate::register::spo2_config::{AdcRange, PulseWidth, SampleRate, SpO2Config, SpO2ConfigFields};
use crate::register::{Readable, Writable};
use crate::ring::SampleRing;
use embedded_hal_async::delay::DelayNs;
use log::{debug, trace, warn};

/// Type alias for a MAX30101 communicating over I2C
type Max30101I2c<T> = Max30101<I2c<T>>;

const MAX30101_PART_ID: u8 = 0x15;

/// How long [`Max30101::soft_reset`] waits for the reset bit to clear.
pub const RESET_TIMEOUT_MS: u32 = 100;

/// How long [`Max30101::read_temperature`] waits for a conversion.
pub const TEMPERATURE_TIMEOUT_MS: u32 = 100;

/// How long [`Max30101::red`], [`Max30101::ir`] and [`Max30101::green`] wait for a new sample.
pub const DEFAULT_LATEST_TIMEOUT_MS: u32 = 250;

/// Main MAX30101 driver struct
pub struct Max30101<B> {
    pub(crate) bus: B,
    led_mode: Option<LedMode>,
    pub(crate) ring: SampleRing,
    revision_id: u8,
}

/// Type alias used to simplify return types throughout the driver
pub type Max30101Result<T, BusError> = Result<T, Max30101Error<BusError>>;

impl<T> Max30101I2c<T>
where
    T: embedded_hal_async::i2c::I2c,
    I2c<T>: Bus,
{
    /// Constructs a new driver instance that communicates over I2C at address 0x57.
    ///
    /// The device is identified but left untouched. Call [`setup`](Max30101::setup) before
    /// polling samples.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use embedded_hal_async::i2c::I2c;
    /// # use max30101::Max30101Result;
    ///  use max30101::Max30101;
    ///  use max30101::config::Configuration;
    /// # async fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> Max30101Result<(), I::Error> {
    ///
    ///  let mut device = Max30101::new_i2c(i2c).await?;
    ///  device.setup(&Configuration::default(), &mut delay).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_i2c(i2c: T) -> Max30101Result<Self, <I2c<T> as Bus>::Error> {
        Self::new(I2c::new(i2c, MAX30101_ADDRESS)).await
    }
}

impl<B> Max30101<B>
where
    B: Bus,
{
    /// Creates a driver on top of an already constructed bus.
    ///
    /// Reads PART_ID once and fails with [`Max30101Error::InvalidPartId`] if it does not identify a
    /// MAX30101. The revision is read and cached.
    pub async fn new(mut bus: B) -> Max30101Result<Self, B::Error> {
        let part_id = bus.read::<PartId>().await?;
        if part_id != MAX30101_PART_ID {
            return Err(Max30101Error::InvalidPartId(part_id));
        }

        let revision_id = bus.read::<RevId>().await?;
        debug!("MAX30101 found, revision {}", revision_id);

        Ok(Max30101 {
            bus,
            led_mode: None,
            ring: SampleRing::new(),
            revision_id,
        })
    }

    /// Consumes the driver and returns the bus.
    pub fn release(self) -> B {
        self.bus
    }

    /// Read a register (or fixed-size register block) using a **typed marker**.
    ///
    /// This is the low-level, register-accurate entry point. You pass a marker type
    /// from [`crate::register`] (e.g. `register::spo2_config::SpO2Config`), and you get back its
    /// decoded value (`R::Out`).
    ///
    /// - The bus transfer length and address come from `R::N` and `R::ADDR`.
    /// - Bytes are decoded by `R::decode(...)`, which may return
    ///   [`InvalidRegisterField`](crate::register::InvalidRegisterField) if reserved bit patterns are observed.
    /// - The interrupt status registers are **cleared on read**. Consult the register's docs.
    ///
    /// # Examples
    /// Read PART_ID (0xFF):
    /// ```rust,no_run
    /// # use max30101::{register, Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus>(mut device: Max30101<B>) -> Max30101Result<(), B::Error> {
    /// let id: u8 = device.read::<register::part_id::PartId>().await?;
    /// assert_eq!(id, 0x15);
    /// # Ok(()) }
    /// ```
    ///
    /// Read SPO2_CONFIG (0x0A) as a typed struct:
    /// ```rust,no_run
    /// # use max30101::{Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus>(mut device: Max30101<B>) -> Max30101Result<(), B::Error> {
    /// use max30101::register::spo2_config::{SpO2Config, SpO2ConfigFields};
    /// let cfg: SpO2ConfigFields = device.read::<SpO2Config>().await?;
    /// # Ok(()) }
    /// ```
    ///
    /// # See also
    /// - [`crate::register`] for the register catalog
    pub async fn read<R: Readable>(&mut self) -> Max30101Result<R::Out, B::Error> {
        self.bus.read::<R>().await
    }

    /// Write a register using a **typed marker**.
    ///
    /// This performs a direct write of the provided fields. To preserve neighbouring bit fields,
    /// read the struct, change the fields you care about, then write it back.
    ///
    /// Writing MODE_CONFIG through this method does not update the channel layout the driver uses
    /// to decode the FIFO. Prefer [`set_led_mode`](Self::set_led_mode) for that.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use max30101::{Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus>(mut device: Max30101<B>) -> Max30101Result<(), B::Error> {
    /// use max30101::register::prox_int_thresh::ProxIntThreshold;
    /// device.write::<ProxIntThreshold>(&0x30).await?;
    /// # Ok(()) }
    /// ```
    pub async fn write<W: Writable>(&mut self, v: &W::In) -> Max30101Result<(), B::Error> {
        self.bus.write::<W>(v).await
    }

    /// Determines if a MAX30101 is answering by reading the PART_ID (0xFF) register.
    pub async fn is_connected(&mut self) -> Max30101Result<bool, B::Error> {
        Ok(self.part_id().await? == MAX30101_PART_ID)
    }

    pub async fn part_id(&mut self) -> Max30101Result<u8, B::Error> {
        self.bus.read::<PartId>().await
    }

    /// Revision read during construction.
    pub fn revision_id(&self) -> u8 {
        self.revision_id
    }

    async fn reset_in_progress(&mut self) -> Max30101Result<bool, B::Error> {
        Ok(self.bus.read::<ModeConfig>().await?.reset)
    }

    /// Triggers a soft reset and waits up to [`RESET_TIMEOUT_MS`] for it to finish.
    ///
    /// All registers return to their power-on values and the driver forgets the active channels,
    /// so [`poll`](Self::poll) fails with [`Max30101Error::NotConfigured`] until the next
    /// configuration. A reset that has not finished in time is not an error, the outcome is reported
    /// as [`WaitOutcome::TimedOut`] and the caller may carry on.
    pub async fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Max30101Result<WaitOutcome, B::Error> {
        let mut mode = self.bus.read::<ModeConfig>().await?;
        mode.reset = true;
        self.bus.write::<ModeConfig>(&mode).await?;
        self.led_mode = None;

        for _ in 0..RESET_TIMEOUT_MS {
            if !self.reset_in_progress().await? {
                return Ok(WaitOutcome::Completed);
            }

            delay.delay_ms(1).await;
        }

        warn!("soft reset still in progress after {} ms", RESET_TIMEOUT_MS);
        Ok(WaitOutcome::TimedOut)
    }

    /// Resets the device and programs a complete acquisition setup.
    ///
    /// Steps, in order:
    /// 1. Soft reset (see [`soft_reset`](Self::soft_reset)).
    /// 2. FIFO_CONFIG: sample averaging, rollover and almost-full threshold.
    /// 3. MODE_CONFIG: the LED mode, which also fixes how many channels each FIFO sample carries.
    /// 4. SPO2_CONFIG: ADC range, sample rate and pulse width.
    /// 5. LED amplitudes, with the proximity pilot amplitude.
    /// 6. Multi-LED slots: slot 1 red, slot 2 infrared, slot 3 green, as far as the mode reaches.
    ///    Unused slots are disabled.
    /// 7. FIFO pointers cleared, so streaming starts from an empty FIFO.
    ///
    /// The first failing bus transaction aborts the sequence and is returned. The driver then stays
    /// unconfigured and [`poll`](Self::poll) fails with [`Max30101Error::NotConfigured`]. On success
    /// the outcome of the reset wait is returned.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use max30101::{Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus, D: DelayNs>(mut device: Max30101<B>, mut delay: D) -> Max30101Result<(), B::Error> {
    /// use max30101::config::{Configuration, Preset};
    ///
    /// device.setup(&Configuration::from_preset(Preset::Streaming), &mut delay).await?;
    /// # Ok(()) }
    /// ```
    pub async fn setup<D: DelayNs>(
        &mut self,
        config: &Configuration,
        delay: &mut D,
    ) -> Max30101Result<WaitOutcome, B::Error> {
        let reset = self.soft_reset(delay).await?;

        self.bus
            .write::<FifoConfig>(&FifoConfigFields {
                sample_averaging: config.sample_averaging,
                rollover: config.fifo_rollover,
                almost_full: config.fifo_almost_full,
            })
            .await?;

        // the driver only adopts the mode once the whole sequence went through
        let mut mode = self.bus.read::<ModeConfig>().await?;
        mode.mode = Some(config.led_mode);
        mode.reset = false;
        self.bus.write::<ModeConfig>(&mode).await?;

        self.bus
            .write::<SpO2Config>(&SpO2ConfigFields {
                adc_range: config.adc_range,
                sample_rate: config.sample_rate,
                pulse_width: config.pulse_width,
            })
            .await?;

        for channel in Channel::ALL {
            self.set_led_amplitude(channel, config.get_led_amplitude(channel))
                .await?;
        }
        self.set_proximity_amplitude(config.proximity_amplitude).await?;

        self.disable_slots().await?;
        let slots = [SlotDevice::RedLed, SlotDevice::IrLed, SlotDevice::GreenLed];
        for (slot, device) in (1u8..).zip(slots).take(config.led_mode.channel_count()) {
            self.enable_slot(slot, device).await?;
        }

        self.clear_fifo().await?;
        self.led_mode = Some(config.led_mode);

        debug!(
            "configured: {:?}, {:?}, {:?}, {:?}, {:?}",
            config.led_mode, config.sample_averaging, config.sample_rate, config.pulse_width, config.adc_range
        );

        Ok(reset)
    }

    /// Puts the device in its power-save state. Register contents are kept.
    pub async fn shut_down(&mut self) -> Max30101Result<(), B::Error> {
        let mut mode = self.bus.read::<ModeConfig>().await?;
        mode.shutdown = true;
        mode.reset = false;
        self.bus.write::<ModeConfig>(&mode).await
    }

    pub async fn wake_up(&mut self) -> Max30101Result<(), B::Error> {
        let mut mode = self.bus.read::<ModeConfig>().await?;
        mode.shutdown = false;
        mode.reset = false;
        self.bus.write::<ModeConfig>(&mode).await
    }

    /// Selects the active channels.
    ///
    /// The driver decodes the FIFO according to this mode from here on. In
    /// [`LedMode::MultiLed`] it assumes three enabled slots.
    pub async fn set_led_mode(&mut self, led_mode: LedMode) -> Max30101Result<(), B::Error> {
        let mut mode = self.bus.read::<ModeConfig>().await?;
        mode.mode = Some(led_mode);
        mode.reset = false;
        self.bus.write::<ModeConfig>(&mode).await?;
        self.led_mode = Some(led_mode);

        Ok(())
    }

    /// The channel layout used to decode the FIFO, `None` before configuration.
    pub fn led_mode(&self) -> Option<LedMode> {
        self.led_mode
    }

    pub async fn set_sample_averaging(&mut self, averaging: SampleAveraging) -> Max30101Result<(), B::Error> {
        let mut cfg = self.bus.read::<FifoConfig>().await?;
        cfg.sample_averaging = averaging;
        self.bus.write::<FifoConfig>(&cfg).await
    }

    pub async fn set_fifo_rollover(&mut self, enable: bool) -> Max30101Result<(), B::Error> {
        let mut cfg = self.bus.read::<FifoConfig>().await?;
        cfg.rollover = enable;
        self.bus.write::<FifoConfig>(&cfg).await
    }

    /// Sets how many free FIFO slots raise the almost-full flag (0 to 15).
    pub async fn set_fifo_almost_full(&mut self, free_slots: u8) -> Max30101Result<(), B::Error> {
        let mut cfg = self.bus.read::<FifoConfig>().await?;
        cfg.almost_full = free_slots & 0x0F;
        self.bus.write::<FifoConfig>(&cfg).await
    }

    pub async fn set_adc_range(&mut self, range: AdcRange) -> Max30101Result<(), B::Error> {
        let mut cfg = self.bus.read::<SpO2Config>().await?;
        cfg.adc_range = range;
        self.bus.write::<SpO2Config>(&cfg).await
    }

    pub async fn set_sample_rate(&mut self, rate: SampleRate) -> Max30101Result<(), B::Error> {
        let mut cfg = self.bus.read::<SpO2Config>().await?;
        cfg.sample_rate = rate;
        self.bus.write::<SpO2Config>(&cfg).await
    }

    pub async fn set_pulse_width(&mut self, width: PulseWidth) -> Max30101Result<(), B::Error> {
        let mut cfg = self.bus.read::<SpO2Config>().await?;
        cfg.pulse_width = width;
        self.bus.write::<SpO2Config>(&cfg).await
    }

    /// Sets the drive amplitude of the LED behind `channel`. 0x00 is off, 0xFF about 50 mA.
    pub async fn set_led_amplitude(&mut self, channel: Channel, amplitude: u8) -> Max30101Result<(), B::Error> {
        match channel {
            Channel::Red => self.bus.write::<Led1Amplitude>(&amplitude).await,
            Channel::Ir => self.bus.write::<Led2Amplitude>(&amplitude).await,
            Channel::Green => self.bus.write::<Led3Amplitude>(&amplitude).await,
        }
    }

    pub async fn led_amplitude(&mut self, channel: Channel) -> Max30101Result<u8, B::Error> {
        match channel {
            Channel::Red => self.bus.read::<Led1Amplitude>().await,
            Channel::Ir => self.bus.read::<Led2Amplitude>().await,
            Channel::Green => self.bus.read::<Led3Amplitude>().await,
        }
    }

    pub async fn set_proximity_amplitude(&mut self, amplitude: u8) -> Max30101Result<(), B::Error> {
        self.bus.write::<PilotAmplitude>(&amplitude).await
    }

    pub async fn set_proximity_threshold(&mut self, threshold: u8) -> Max30101Result<(), B::Error> {
        self.bus.write::<ProxIntThreshold>(&threshold).await
    }

    /// Assigns `device` to multi-LED time slot `slot` (1 to 4), keeping the other slot of the
    /// same register.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use max30101::{Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus>(mut device: Max30101<B>) -> Max30101Result<(), B::Error> {
    /// use max30101::register::multi_led::SlotDevice;
    ///
    /// device.enable_slot(1, SlotDevice::RedLed).await?;
    /// device.enable_slot(2, SlotDevice::IrLed).await?;
    /// # Ok(()) }
    /// ```
    pub async fn enable_slot(&mut self, slot: u8, device: SlotDevice) -> Max30101Result<(), B::Error> {
        match slot {
            1 | 2 => {
                let mut pair = self.bus.read::<SlotControl1>().await?;
                if slot == 1 { pair.first = device } else { pair.second = device }
                self.bus.write::<SlotControl1>(&pair).await
            }
            3 | 4 => {
                let mut pair = self.bus.read::<SlotControl2>().await?;
                if slot == 3 { pair.first = device } else { pair.second = device }
                self.bus.write::<SlotControl2>(&pair).await
            }
            other => Err(Max30101Error::InvalidSlot(other)),
        }
    }

    /// Disables all four multi-LED slots.
    pub async fn disable_slots(&mut self) -> Max30101Result<(), B::Error> {
        self.bus.write::<SlotControl1>(&SlotPair::default()).await?;
        self.bus.write::<SlotControl2>(&SlotPair::default()).await
    }

    /// Enables exactly the given interrupt sources.
    ///
    /// The driver never waits on the interrupt line, this only decides which flags
    /// [`interrupt_status`](Self::interrupt_status) can report.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use max30101::{Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus>(mut device: Max30101<B>) -> Max30101Result<(), B::Error> {
    /// use max30101::Interrupts;
    /// device.set_interrupts(Interrupts::new().fifo_almost_full().die_temp_ready()).await?;
    /// # Ok(()) }
    /// ```
    pub async fn set_interrupts(&mut self, ints: Interrupts) -> Max30101Result<(), B::Error> {
        self.bus
            .write::<IntEnable1>(&IntEnable1Fields {
                a_full_en: ints.is_set(Interrupts::FIFO_ALMOST_FULL),
                ppg_rdy_en: ints.is_set(Interrupts::NEW_SAMPLE),
                alc_ovf_en: ints.is_set(Interrupts::AMBIENT_OVERFLOW),
                prox_int_en: ints.is_set(Interrupts::PROXIMITY),
            })
            .await?;

        self.bus
            .write::<IntEnable2>(&IntEnable2Fields {
                die_temp_rdy_en: ints.is_set(Interrupts::DIE_TEMP_READY),
            })
            .await
    }

    /// Reads both interrupt status registers.
    ///
    /// **Note:** The device clears these flags upon read.
    pub async fn interrupt_status(&mut self) -> Max30101Result<InterruptStatus, B::Error> {
        let primary = self.bus.read::<IntStatus1>().await?;
        let secondary = self.bus.read::<IntStatus2>().await?;

        Ok(InterruptStatus {
            primary,
            die_temp_ready: secondary.die_temp_rdy,
        })
    }

    pub async fn write_pointer(&mut self) -> Max30101Result<u8, B::Error> {
        self.bus.read::<FifoWritePointer>().await
    }

    pub async fn read_pointer(&mut self) -> Max30101Result<u8, B::Error> {
        self.bus.read::<FifoReadPointer>().await
    }

    /// Samples lost while the FIFO was full, saturating at 31.
    pub async fn overflow_count(&mut self) -> Max30101Result<u8, B::Error> {
        self.bus.read::<OverflowCounter>().await
    }

    /// Empties the device FIFO by zeroing its pointers and overflow counter.
    ///
    /// The driver's own sample ring is not touched.
    pub async fn clear_fifo(&mut self) -> Max30101Result<(), B::Error> {
        self.bus.write::<FifoWritePointer>(&0).await?;
        self.bus.write::<OverflowCounter>(&0).await?;
        self.bus.write::<FifoReadPointer>(&0).await
    }

    /// FIFO_CONFIG (0x08) as a raw byte, for diagnostics.
    pub async fn fifo_config_raw(&mut self) -> Max30101Result<u8, B::Error> {
        let cfg = self.bus.read::<FifoConfig>().await?;
        let mut raw = [0u8; 1];
        <FifoConfig as Writable>::encode(&cfg, &mut raw);

        Ok(raw[0])
    }

    /// SPO2_CONFIG (0x0A) as a raw byte, for diagnostics.
    pub async fn particle_config_raw(&mut self) -> Max30101Result<u8, B::Error> {
        let cfg = self.bus.read::<SpO2Config>().await?;
        let mut raw = [0u8; 1];
        <SpO2Config as Writable>::encode(&cfg, &mut raw);

        Ok(raw[0])
    }

    /// Drains the device FIFO into the sample ring.
    ///
    /// Reads FIFO_RD_PTR and FIFO_WR_PTR, and when they differ, moves every pending sample out of
    /// FIFO_DATA. The bytes are fetched in bursts no longer than the bus allows, each cut down to
    /// whole samples so a burst never splits a sample. Returns the number of samples that were
    /// pending.
    ///
    /// If the ring runs full the oldest unconsumed samples are overwritten.
    ///
    /// # Errors
    /// - [`Max30101Error::NotConfigured`] before the active channels are known.
    /// - [`Max30101Error::BurstTooSmall`] if the bus cannot move one whole sample at once.
    /// - [`Max30101Error::Bus`] if a transfer fails. Samples decoded from earlier bursts stay in
    ///   the ring, the rest are picked up by the next poll.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use max30101::{Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus>(mut device: Max30101<B>) -> Max30101Result<(), B::Error> {
    /// device.poll().await?;
    /// while let Some(sample) = device.next_sample() {
    ///     println!("red {} ir {}", sample.red, sample.ir);
    /// }
    /// # Ok(()) }
    /// ```
    pub async fn poll(&mut self) -> Max30101Result<usize, B::Error> {
        let mode = self.led_mode.ok_or(Max30101Error::NotConfigured)?;

        let read_pointer = self.bus.read::<FifoReadPointer>().await?;
        let write_pointer = self.bus.read::<FifoWritePointer>().await?;
        let pending = fifo::pending_samples(read_pointer, write_pointer);
        if pending == 0 {
            return Ok(0);
        }

        let stride = fifo::stride(mode);
        let max_burst = self.bus.max_burst().min(MAX_BURST_BYTES);
        let mut remaining = pending * stride;
        trace!(
            "fifo rd={} wr={}: {} samples, {} bytes",
            read_pointer, write_pointer, pending, remaining
        );

        let mut buf = [0u8; MAX_BURST_BYTES];
        while remaining > 0 {
            let chunk = fifo::chunk_len(remaining, max_burst, stride);
            if chunk == 0 {
                return Err(Max30101Error::BurstTooSmall { max_burst, stride });
            }

            if let Err(e) = self.bus.read_fifo(&mut buf[..chunk]).await {
                warn!("FIFO burst of {} bytes failed, {} bytes left unread", chunk, remaining);
                return Err(e);
            }

            for raw in buf[..chunk].chunks_exact(stride) {
                if self.ring.push(fifo::decode_sample(raw, mode)) {
                    trace!("sample ring full, oldest sample dropped");
                }
            }

            remaining -= chunk;
        }

        Ok(pending)
    }

    /// Samples waiting in the ring.
    pub fn available(&self) -> usize {
        self.ring.available()
    }

    /// The oldest waiting sample, without consuming it.
    pub fn peek(&self) -> Option<Sample> {
        self.ring.peek()
    }

    pub fn peek_channel(&self, channel: Channel) -> Option<u32> {
        self.ring.peek_channel(channel)
    }

    /// Releases the oldest waiting sample. Does nothing when none is waiting.
    pub fn consume(&mut self) {
        self.ring.consume()
    }

    /// Takes the oldest waiting sample.
    pub fn next_sample(&mut self) -> Option<Sample> {
        self.ring.pop()
    }

    pub fn ring(&self) -> &SampleRing {
        &self.ring
    }

    /// Polls until at least one new sample arrives, then returns the newest sample.
    ///
    /// Polls every millisecond for up to `timeout_ms`. Returns `None` if nothing arrived in
    /// time. Queued older samples are left in the ring for [`next_sample`](Self::next_sample).
    pub async fn latest_sample<D: DelayNs>(
        &mut self,
        timeout_ms: u32,
        delay: &mut D,
    ) -> Max30101Result<Option<Sample>, B::Error> {
        for _ in 0..=timeout_ms {
            if self.poll().await? > 0 {
                return Ok(self.ring.latest());
            }

            delay.delay_ms(1).await;
        }

        trace!("no new sample within {} ms", timeout_ms);
        Ok(None)
    }

    /// One channel of [`latest_sample`](Self::latest_sample).
    pub async fn latest<D: DelayNs>(
        &mut self,
        channel: Channel,
        timeout_ms: u32,
        delay: &mut D,
    ) -> Max30101Result<Option<u32>, B::Error> {
        Ok(self
            .latest_sample(timeout_ms, delay)
            .await?
            .map(|s| s.channel(channel)))
    }

    /// Newest red reading, waiting up to [`DEFAULT_LATEST_TIMEOUT_MS`].
    pub async fn red<D: DelayNs>(&mut self, delay: &mut D) -> Max30101Result<Option<u32>, B::Error> {
        self.latest(Channel::Red, DEFAULT_LATEST_TIMEOUT_MS, delay).await
    }

    pub async fn ir<D: DelayNs>(&mut self, delay: &mut D) -> Max30101Result<Option<u32>, B::Error> {
        self.latest(Channel::Ir, DEFAULT_LATEST_TIMEOUT_MS, delay).await
    }

    pub async fn green<D: DelayNs>(&mut self, delay: &mut D) -> Max30101Result<Option<u32>, B::Error> {
        self.latest(Channel::Green, DEFAULT_LATEST_TIMEOUT_MS, delay).await
    }

    /// Runs a single die temperature conversion.
    ///
    /// Waits up to [`TEMPERATURE_TIMEOUT_MS`] for DIE_TEMP_RDY, then reads the result registers
    /// regardless. If the conversion did not finish the value may be stale, which the returned
    /// [`TemperatureReading::outcome`] tells.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use max30101::{Max30101, Max30101Result};
    /// # use max30101::bus::Bus;
    /// # async fn demo<B: Bus, D: DelayNs>(mut device: Max30101<B>, mut delay: D) -> Max30101Result<(), B::Error> {
    /// let t = device.read_temperature(&mut delay).await?;
    /// println!("die at {} °C / {} °F", t.celsius, t.fahrenheit());
    /// # Ok(()) }
    /// ```
    pub async fn read_temperature<D: DelayNs>(&mut self, delay: &mut D) -> Max30101Result<TemperatureReading, B::Error> {
        self.bus.write::<DieTempConfig>(&true).await?;

        let mut outcome = WaitOutcome::TimedOut;
        for _ in 0..TEMPERATURE_TIMEOUT_MS {
            if self.bus.read::<IntStatus2>().await?.die_temp_rdy {
                outcome = WaitOutcome::Completed;
                break;
            }

            delay.delay_ms(1).await;
        }

        if outcome == WaitOutcome::TimedOut {
            warn!("die temperature not ready after {} ms", TEMPERATURE_TIMEOUT_MS);
        }

        let integer = self.bus.read::<DieTempInteger>().await?;
        let fraction = self.bus.read::<DieTempFraction>().await?;

        Ok(TemperatureReading {
            celsius: die_temp::combine(integer, fraction),
            outcome,
        })
    }
}

/// How a bounded wait ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitOutcome {
    /// The device reported completion in time.
    Completed,
    /// The wait gave up. The operation went ahead anyway.
    TimedOut,
}

/// Die temperature with the outcome of the conversion wait.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    pub celsius: f32,
    pub outcome: WaitOutcome,
}

impl TemperatureReading {
    pub fn fahrenheit(&self) -> f32 {
        self.celsius * 1.8 + 32.0
    }
}

/// Contents of INT_STATUS_1 and INT_STATUS_2.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    pub primary: IntStatus1Flags,
    pub die_temp_ready: bool,
}

/// Represents the interrupt sources available on the MAX30101.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interrupts(u8);

impl Interrupts {
    const FIFO_ALMOST_FULL: u8 = 1 << 0;
    const NEW_SAMPLE: u8 = 1 << 1;
    const AMBIENT_OVERFLOW: u8 = 1 << 2;
    const PROXIMITY: u8 = 1 << 3;
    const DIE_TEMP_READY: u8 = 1 << 4;

    /// Creates a new instance with no interrupts chosen.
    pub fn new() -> Self {
        Self(0)
    }

    /// Add the FIFO almost-full interrupt to this set.
    ///
    /// Raised when the free space in the FIFO drops to the threshold set with
    /// [`Max30101::set_fifo_almost_full`].
    pub fn fifo_almost_full(mut self) -> Self {
        self.0 |= Self::FIFO_ALMOST_FULL;

        self
    }

    /// Add the new-sample (PPG_RDY) interrupt to this set.
    pub fn new_sample(mut self) -> Self {
        self.0 |= Self::NEW_SAMPLE;

        self
    }

    /// Add the ambient light cancellation overflow interrupt to this set.
    pub fn ambient_overflow(mut self) -> Self {
        self.0 |= Self::AMBIENT_OVERFLOW;

        self
    }

    pub fn proximity(mut self) -> Self {
        self.0 |= Self::PROXIMITY;

        self
    }

    /// Add the die temperature ready interrupt to this set.
    pub fn die_temp_ready(mut self) -> Self {
        self.0 |= Self::DIE_TEMP_READY;

        self
    }

    /// Remove all interrupts from the set.
    pub fn none(mut self) -> Self {
        self.0 = 0;

        self
    }

    fn is_set(&self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}
