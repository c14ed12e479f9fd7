//! Fixed-capacity ring of decoded samples.
//!
//! [`SampleRing`] sits between the FIFO drain and whoever consumes readings. It keeps one array
//! per channel and two cursors: `head` names the slot written last and `tail` names the slot
//! consumed last, so `head - tail` (mod `N`) samples are waiting.
//!
//! Two read modes are offered. [`peek`](SampleRing::peek) / [`consume`](SampleRing::consume) walk
//! the samples in arrival order, which is what signal processing wants. [`latest`](SampleRing::latest)
//! returns the newest sample regardless of what is still queued, which is what a live display wants.
use crate::fifo::{Channel, Sample};

/// Default number of slots, matching the device FIFO depth.
pub const RING_SLOTS: usize = 32;

pub struct SampleRing<const N: usize = RING_SLOTS> {
    red: [u32; N],
    ir: [u32; N],
    green: [u32; N],
    head: usize,
    tail: usize,
    written: bool,
    dropped: u32,
}

impl<const N: usize> SampleRing<N> {
    pub const fn new() -> Self {
        Self {
            red: [0; N],
            ir: [0; N],
            green: [0; N],
            head: 0,
            tail: 0,
            written: false,
            dropped: 0,
        }
    }

    /// Number of slots. At most `N - 1` samples can wait at once.
    pub const fn slots(&self) -> usize {
        N
    }

    /// Number of samples waiting to be consumed.
    pub fn available(&self) -> usize {
        (self.head + N - self.tail) % N
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Commits a new sample: advances `head`, then stores the readings at the new `head`.
    ///
    /// When the ring is full the oldest waiting sample is discarded to make room. Returns `true`
    /// if that happened.
    pub fn push(&mut self, sample: Sample) -> bool {
        self.head = (self.head + 1) % N;
        self.red[self.head] = sample.red;
        self.ir[self.head] = sample.ir;
        self.green[self.head] = sample.green;
        self.written = true;

        if self.head == self.tail {
            self.tail = (self.tail + 1) % N;
            self.dropped = self.dropped.saturating_add(1);
            return true;
        }

        false
    }

    /// The oldest waiting sample, without consuming it.
    ///
    /// `tail` names the slot consumed last, so the oldest waiting sample sits in the slot after it.
    /// A ring whose reader looks at `tail` itself would hand out the previously consumed sample
    /// once before the first new one.
    pub fn peek(&self) -> Option<Sample> {
        if self.is_empty() {
            return None;
        }

        Some(self.slot((self.tail + 1) % N))
    }

    /// One channel of the oldest waiting sample, without consuming it.
    pub fn peek_channel(&self, channel: Channel) -> Option<u32> {
        self.peek().map(|s| s.channel(channel))
    }

    /// Releases the oldest waiting sample. Does nothing when the ring is empty.
    pub fn consume(&mut self) {
        if self.available() > 0 {
            self.tail = (self.tail + 1) % N;
        }
    }

    /// Takes the oldest waiting sample.
    pub fn pop(&mut self) -> Option<Sample> {
        let sample = self.peek()?;
        self.consume();

        Some(sample)
    }

    /// The most recently written sample, whether or not it has been consumed.
    ///
    /// `None` until the first sample arrives.
    pub fn latest(&self) -> Option<Sample> {
        self.written.then(|| self.slot(self.head))
    }

    /// Number of samples discarded because the ring was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn slot(&self, index: usize) -> Sample {
        Sample::new(self.red[index], self.ir[index], self.green[index])
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(v: u32) -> Sample {
        Sample::new(v, v + 1000, v + 2000)
    }

    #[test]
    fn empty_ring() {
        let mut ring: SampleRing = SampleRing::new();
        assert_eq!(0, ring.available());
        assert_eq!(None, ring.peek());
        assert_eq!(None, ring.latest());

        ring.consume();
        assert_eq!(0, ring.available());
        assert_eq!(None, ring.pop());
    }

    #[test]
    fn consume_walks_in_arrival_order() {
        let mut ring: SampleRing = SampleRing::new();
        for v in 1..=5 {
            assert!(!ring.push(sample(v)));
        }
        assert_eq!(5, ring.available());
        assert_eq!(Some(1), ring.peek_channel(Channel::Red));
        assert_eq!(Some(1001), ring.peek_channel(Channel::Ir));
        assert_eq!(Some(2001), ring.peek_channel(Channel::Green));

        // peeking does not consume
        assert_eq!(Some(sample(1)), ring.peek());
        assert_eq!(5, ring.available());

        for v in 1..=5 {
            assert_eq!(Some(sample(v)), ring.pop());
        }
        assert_eq!(0, ring.available());
    }

    #[test]
    fn latest_ignores_queued_samples() {
        let mut ring: SampleRing = SampleRing::new();
        ring.push(sample(1));
        ring.push(sample(2));
        ring.push(sample(3));

        assert_eq!(Some(sample(3)), ring.latest());
        assert_eq!(Some(sample(1)), ring.peek());

        while ring.pop().is_some() {}
        assert_eq!(Some(sample(3)), ring.latest());
    }

    #[test]
    fn consume_on_empty_leaves_tail() {
        let mut ring: SampleRing<4> = SampleRing::new();
        ring.push(sample(1));
        ring.consume();
        ring.consume();
        ring.consume();
        assert_eq!(0, ring.available());

        ring.push(sample(2));
        assert_eq!(1, ring.available());
        assert_eq!(Some(sample(2)), ring.peek());
    }

    #[test]
    fn full_ring_drops_oldest() {
        let mut ring: SampleRing<4> = SampleRing::new();
        assert!(!ring.push(sample(1)));
        assert!(!ring.push(sample(2)));
        assert!(!ring.push(sample(3)));
        assert_eq!(3, ring.available());

        assert!(ring.push(sample(4)));
        assert_eq!(3, ring.available());
        assert_eq!(1, ring.dropped());
        assert_eq!(Some(sample(2)), ring.pop());
        assert_eq!(Some(sample(3)), ring.pop());
        assert_eq!(Some(sample(4)), ring.pop());
        assert_eq!(None, ring.pop());
    }

    #[test]
    fn available_stays_in_bounds() {
        let mut ring: SampleRing = SampleRing::new();
        // interleave bursts of production with partial consumption
        for round in 0..200u32 {
            for v in 0..(round % 7) {
                ring.push(sample(v));
                assert!(ring.available() < ring.slots());
            }
            for _ in 0..(round % 5) {
                ring.consume();
                assert!(ring.available() < ring.slots());
            }
        }
    }

    #[test]
    fn cursors_wrap_around() {
        let mut ring: SampleRing<4> = SampleRing::new();
        for v in 0..10 {
            ring.push(sample(v));
            assert_eq!(Some(sample(v)), ring.pop());
        }
        assert_eq!(Some(sample(9)), ring.latest());
        assert!(ring.is_empty());
    }
}
