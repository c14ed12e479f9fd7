//! Moving samples to another execution context.
//!
//! The driver and its sample ring belong to whoever polls the device. When the consumer runs
//! elsewhere (another task or an interrupt handler), split a [`heapless::spsc::Queue`] and hand
//! the consumer half over. [`Max30101::pump`] then fills the producer half.
//!
//! ```rust,no_run
//! # use max30101::{Max30101, Max30101Result};
//! # use max30101::bus::Bus;
//! # async fn demo<B: Bus>(mut device: Max30101<B>) -> Max30101Result<(), B::Error> {
//! use heapless::spsc::Queue;
//! use max30101::fifo::Sample;
//!
//! let mut queue: Queue<Sample, 64> = Queue::new();
//! let (mut producer, mut consumer) = queue.split();
//!
//! device.pump(&mut producer).await?;
//! while let Some(sample) = consumer.dequeue() {
//!     log::info!("{:?}", sample);
//! }
//! # Ok(()) }
//! ```
use crate::bus::Bus;
use crate::fifo::Sample;
use crate::{Max30101, Max30101Result};
use heapless::spsc::Producer;
use log::trace;

impl<B> Max30101<B>
where
    B: Bus,
{
    /// Polls the device, then moves waiting samples from the ring into `producer` in arrival order.
    ///
    /// Stops when the queue is full. Samples that did not fit stay in the ring for the next call.
    /// Returns the number of samples moved.
    pub async fn pump<const N: usize>(
        &mut self,
        producer: &mut Producer<'_, Sample, N>,
    ) -> Max30101Result<usize, B::Error> {
        self.poll().await?;

        let mut moved = 0;
        while let Some(sample) = self.ring.peek() {
            if producer.enqueue(sample).is_err() {
                trace!("hand-off queue full, {} samples held back", self.ring.available());
                break;
            }
            self.ring.consume();
            moved += 1;
        }

        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::register::mode_config::LedMode;
    use crate::testing::{FakeBus, FakeDelay};
    use heapless::spsc::Queue;

    async fn streaming_device() -> Max30101<FakeBus> {
        let mut device = Max30101::new(FakeBus::new()).await.unwrap();
        device
            .setup(&Configuration::default().led_mode(LedMode::RedIr), &mut FakeDelay::default())
            .await
            .unwrap();
        device
    }

    #[tokio::test]
    async fn pump_moves_samples_in_order() {
        let mut device = streaming_device().await;
        for v in 1..=3u32 {
            device.bus.push_sample(&[v, v * 10]);
        }

        let mut queue: Queue<Sample, 8> = Queue::new();
        let (mut producer, mut consumer) = queue.split();

        assert_eq!(3, device.pump(&mut producer).await.unwrap());
        assert_eq!(0, device.available());
        for v in 1..=3u32 {
            assert_eq!(Some(Sample::new(v, v * 10, 0)), consumer.dequeue());
        }
        assert_eq!(None, consumer.dequeue());
    }

    #[tokio::test]
    async fn pump_holds_back_when_queue_full() {
        let mut device = streaming_device().await;
        for v in 1..=6u32 {
            device.bus.push_sample(&[v, v]);
        }

        // capacity is N - 1
        let mut queue: Queue<Sample, 4> = Queue::new();
        let (mut producer, mut consumer) = queue.split();

        assert_eq!(3, device.pump(&mut producer).await.unwrap());
        assert_eq!(3, device.available());

        assert_eq!(Some(1), consumer.dequeue().map(|s| s.red));
        assert_eq!(Some(2), consumer.dequeue().map(|s| s.red));

        // nothing new on the device, the held back samples follow
        assert_eq!(2, device.pump(&mut producer).await.unwrap());
        assert_eq!(1, device.available());
        assert_eq!(Some(3), consumer.dequeue().map(|s| s.red));
        assert_eq!(Some(4), consumer.dequeue().map(|s| s.red));
        assert_eq!(Some(5), consumer.dequeue().map(|s| s.red));
        assert_eq!(None, consumer.dequeue());
    }
}
