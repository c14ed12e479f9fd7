use crate::bus::{Bus, MAX_BURST_BYTES};
use crate::error::Max30101Error;
use crate::fifo::{BYTES_PER_CHANNEL, FIFO_DEPTH, SAMPLE_MASK};
use crate::register::die_temp::DieTempConfig;
use crate::register::fifo_pointers::{FifoReadPointer, FifoWritePointer};
use crate::register::int_status::IntStatus2;
use crate::register::mode_config::ModeConfig;
use crate::register::part_id::{PartId, RevId};
use crate::register::{Readable, Reg, Writable};
use embedded_hal_async::delay::DelayNs;
use heapless::{Deque, Vec};

const RESET_BIT: u8 = 0b0100_0000;
const DIE_TEMP_RDY: u8 = 0b0000_0010;

/// Register-level stand-in for a MAX30101.
///
/// Registers live in a flat byte file. The FIFO is a byte queue whose pointers move the way the
/// device moves them: pushing a sample advances FIFO_WR_PTR, draining bytes advances FIFO_RD_PTR by
/// whole samples of the currently programmed mode.
pub struct FakeBus {
    regs: [u8; 256],
    fifo: Deque<u8, 1024>,
    max_burst: usize,
    /// MODE_CONFIG reads that report a reset in progress after one is requested. `None` never finishes.
    reset_polls: Option<u32>,
    reset_remaining: Option<u32>,
    /// INT_STATUS_2 reads that come back without DIE_TEMP_RDY after a conversion starts. `None` never finishes.
    temp_polls: Option<u32>,
    temp_remaining: Option<u32>,
    failing_register: Option<u8>,
    failing_burst: Option<usize>,
    pub bursts: Vec<usize, 64>,
    pub writes: Vec<(u8, u8), 128>,
}

impl FakeBus {
    pub fn new() -> Self {
        let mut bus = FakeBus {
            regs: [0u8; 256],
            fifo: Deque::new(),
            max_burst: MAX_BURST_BYTES,
            reset_polls: Some(0),
            reset_remaining: None,
            temp_polls: Some(0),
            temp_remaining: None,
            failing_register: None,
            failing_burst: None,
            bursts: Vec::new(),
            writes: Vec::new(),
        };
        bus.regs[PartId::ADDR as usize] = 0x15;
        bus.regs[RevId::ADDR as usize] = 0x03;

        bus
    }

    pub fn with_part_id(mut self, id: u8) -> Self {
        self.regs[PartId::ADDR as usize] = id;

        self
    }

    pub fn with_max_burst(mut self, max_burst: usize) -> Self {
        self.max_burst = max_burst;

        self
    }

    /// The reset bit stays set for this many MODE_CONFIG reads after a reset is requested.
    pub fn with_reset_polls(mut self, polls: Option<u32>) -> Self {
        self.reset_polls = polls;

        self
    }

    /// DIE_TEMP_RDY shows up on the INT_STATUS_2 read after this many.
    pub fn with_temperature_polls(mut self, polls: Option<u32>) -> Self {
        self.temp_polls = polls;

        self
    }

    /// Every read or write of `addr` fails.
    pub fn with_failing_register(mut self, addr: u8) -> Self {
        self.failing_register = Some(addr);

        self
    }

    /// The FIFO burst with this (zero based) index fails.
    pub fn with_failing_burst(mut self, index: usize) -> Self {
        self.failing_burst = Some(index);

        self
    }

    pub fn set_register(&mut self, addr: u8, value: u8) {
        self.regs[addr as usize] = value;
    }

    pub fn register(&self, addr: u8) -> u8 {
        self.regs[addr as usize]
    }

    /// Appends one sample to the FIFO, three bytes per value.
    pub fn push_sample(&mut self, values: &[u32]) {
        for value in values {
            let bytes = (value & SAMPLE_MASK).to_be_bytes();
            for b in &bytes[1..] {
                self.fifo.push_back(*b).unwrap();
            }
        }
        let write = &mut self.regs[FifoWritePointer::ADDR as usize];
        *write = (*write + 1) % FIFO_DEPTH;
    }

    /// Appends raw bytes without touching the pointers.
    pub fn push_raw(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.fifo.push_back(*b).unwrap();
        }
    }

    pub fn set_pointers(&mut self, read: u8, write: u8) {
        self.regs[FifoReadPointer::ADDR as usize] = read;
        self.regs[FifoWritePointer::ADDR as usize] = write;
    }

    fn programmed_stride(&self) -> usize {
        let channels = match self.regs[ModeConfig::ADDR as usize] & 0b111 {
            0b010 => 1,
            0b011 => 2,
            _ => 3,
        };

        channels * BYTES_PER_CHANNEL
    }

    fn check(&self, addr: u8) -> Result<(), Max30101Error<()>> {
        if self.failing_register == Some(addr) {
            return Err(Max30101Error::Bus(()));
        }

        Ok(())
    }

    fn on_read(&mut self, addr: u8) {
        if addr == ModeConfig::ADDR {
            match self.reset_remaining {
                Some(0) => {
                    self.regs[addr as usize] &= !RESET_BIT;
                    self.reset_remaining = None;
                }
                Some(n) => self.reset_remaining = Some(n - 1),
                None => {}
            }
        }

        if addr == IntStatus2::ADDR {
            match self.temp_remaining {
                Some(0) => {
                    self.regs[addr as usize] |= DIE_TEMP_RDY;
                    self.temp_remaining = None;
                }
                Some(n) => self.temp_remaining = Some(n - 1),
                None => {}
            }
        }
    }

    fn on_write(&mut self, addr: u8) {
        let value = self.regs[addr as usize];

        if addr == ModeConfig::ADDR && value & RESET_BIT != 0 {
            // power-on values for everything but the identity registers
            let part = self.regs[PartId::ADDR as usize];
            let rev = self.regs[RevId::ADDR as usize];
            self.regs = [0u8; 256];
            self.regs[PartId::ADDR as usize] = part;
            self.regs[RevId::ADDR as usize] = rev;
            self.fifo.clear();

            match self.reset_polls {
                Some(0) => {}
                polls => {
                    self.regs[addr as usize] = RESET_BIT;
                    self.reset_remaining = polls;
                }
            }
        }

        if addr == DieTempConfig::ADDR && value & 1 != 0 {
            self.regs[IntStatus2::ADDR as usize] = 0;
            match self.temp_polls {
                Some(0) => {
                    self.regs[IntStatus2::ADDR as usize] = DIE_TEMP_RDY;
                    self.regs[addr as usize] = 0;
                }
                polls => self.temp_remaining = polls,
            }
        }

        if addr == FifoWritePointer::ADDR {
            self.fifo.clear();
        }
    }
}

impl Bus for FakeBus {
    type Error = ();

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Max30101Error<Self::Error>> {
        self.check(R::ADDR)?;
        self.on_read(R::ADDR);

        let start = R::ADDR as usize;
        let value = R::decode(&self.regs[start..start + R::N])?;

        // status registers clear on read
        if R::ADDR == IntStatus2::ADDR {
            self.regs[start] = 0;
        }

        Ok(value)
    }

    async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Max30101Error<Self::Error>> {
        self.check(W::ADDR)?;

        let start = W::ADDR as usize;
        W::encode(v, &mut self.regs[start..start + W::N]);
        let _ = self.writes.push((W::ADDR, self.regs[start]));
        self.on_write(W::ADDR);

        Ok(())
    }

    async fn read_fifo(&mut self, buf: &mut [u8]) -> Result<(), Max30101Error<Self::Error>> {
        let index = self.bursts.len();
        let _ = self.bursts.push(buf.len());
        if self.failing_burst == Some(index) {
            return Err(Max30101Error::Bus(()));
        }

        for b in buf.iter_mut() {
            *b = self.fifo.pop_front().unwrap_or(0);
        }

        let samples = (buf.len() / self.programmed_stride()) as u8;
        let read = &mut self.regs[FifoReadPointer::ADDR as usize];
        *read = (*read + samples) % FIFO_DEPTH;

        Ok(())
    }

    fn max_burst(&self) -> usize {
        self.max_burst
    }
}

/// Delay that returns immediately and only records how long it was asked to wait.
#[derive(Default)]
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl FakeDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}
