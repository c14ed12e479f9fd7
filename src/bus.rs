//! Transport abstraction for the MAX30101.
//!
//! The driver only talks to the device through the [`Bus`] trait. [`I2c`] implements it on top of
//! any [`embedded_hal_async::i2c::I2c`] bus, and tests substitute a fake.
use core::future::Future;
use crate::error::Max30101Error;
use crate::register::fifo_data::FifoData;
use crate::register::{Readable, Reg, Writable};
use embedded_hal::i2c::SevenBitAddress;

/// Largest register block moved by a single typed read or write.
pub const MAX_REG_BYTES: usize = 2;

/// Largest FIFO burst the driver ever requests: a full 32-sample FIFO with three channels.
pub const MAX_BURST_BYTES: usize = 288;

/// The fixed 7-bit I2C address of the MAX30101.
pub const MAX30101_ADDRESS: SevenBitAddress = 0x57;

pub trait Bus {
    type Error;

    /// Reads and decodes the register (block) described by `R`.
    fn read<R: Readable>(&mut self) -> impl Future<Output = Result<R::Out, Max30101Error<Self::Error>>>;

    /// Encodes `v` and writes it to the register (block) described by `W`.
    fn write<W: Writable>(&mut self, v: &W::In) -> impl Future<Output = Result<(), Max30101Error<Self::Error>>>;

    /// Fills `buf` with successive bytes from FIFO_DATA (0x07) in one transaction.
    ///
    /// The register address does not advance, every byte comes out of the FIFO.
    fn read_fifo(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<(), Max30101Error<Self::Error>>>;

    /// The largest number of bytes [`Bus::read_fifo`] may be asked for at once.
    fn max_burst(&self) -> usize {
        MAX_BURST_BYTES
    }
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: u8,
    max_burst: usize,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c
{
    pub fn new(i2c: I2cType, address: u8) -> Self {
        Self { i2c, address, max_burst: MAX_BURST_BYTES }
    }

    /// Limits FIFO bursts to `max_burst` bytes, for transports with small receive buffers.
    ///
    /// Values above [`MAX_BURST_BYTES`] are clamped.
    pub fn with_max_burst(mut self, max_burst: usize) -> Self {
        self.max_burst = max_burst.min(MAX_BURST_BYTES);

        self
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    type Error = <I2cType as embedded_hal_async::i2c::ErrorType>::Error;

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Max30101Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        self.i2c
            .write_read(self.address, &[R::ADDR], &mut buf[..R::N])
            .await
            .map_err(Max30101Error::Bus)?;

        Ok(R::decode(&buf[..R::N])?)
    }

    async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Max30101Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES + 1];
        buf[0] = W::ADDR;
        W::encode(v, &mut buf[1..=W::N]);
        self.i2c
            .write(self.address, &buf[..=W::N])
            .await
            .map_err(Max30101Error::Bus)?;

        Ok(())
    }

    async fn read_fifo(&mut self, buf: &mut [u8]) -> Result<(), Max30101Error<Self::Error>> {
        self.i2c
            .write_read(self.address, &[FifoData::ADDR], buf)
            .await
            .map_err(Max30101Error::Bus)?;

        Ok(())
    }

    fn max_burst(&self) -> usize {
        self.max_burst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal_async::i2c::{ErrorType, Operation};
    use heapless::Vec;

    /// Records the address and transfer lengths of every transaction.
    #[derive(Default)]
    struct RecordingI2c {
        transfers: Vec<(u8, usize, usize), 16>,
        last_write: Vec<u8, 8>,
    }

    impl ErrorType for RecordingI2c {
        type Error = Infallible;
    }

    impl embedded_hal_async::i2c::I2c for RecordingI2c {
        async fn transaction(
            &mut self,
            address: SevenBitAddress,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            let mut written = 0;
            let mut read = 0;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        written += bytes.len();
                        self.last_write.clear();
                        let _ = self.last_write.extend_from_slice(bytes);
                    }
                    Operation::Read(buf) => {
                        read += buf.len();
                        buf.fill(0xAB);
                    }
                }
            }
            let _ = self.transfers.push((address, written, read));

            Ok(())
        }
    }

    #[test]
    fn i2c_burst_limit_is_clamped() {
        let bus = I2c::new(RecordingI2c::default(), MAX30101_ADDRESS);
        assert_eq!(MAX_BURST_BYTES, bus.max_burst());

        let bus = bus.with_max_burst(1024);
        assert_eq!(MAX_BURST_BYTES, bus.max_burst());

        let bus = bus.with_max_burst(32);
        assert_eq!(32, bus.max_burst());
    }

    #[tokio::test]
    async fn i2c_fifo_burst_is_one_write_read() {
        let mut bus = I2c::new(RecordingI2c::default(), MAX30101_ADDRESS);
        let mut buf = [0u8; 12];
        bus.read_fifo(&mut buf).await.unwrap();

        assert_eq!([0xAB; 12], buf);
        let i2c = bus.release();
        assert_eq!(&[(MAX30101_ADDRESS, 1, 12)], i2c.transfers.as_slice());
        assert_eq!(&[FifoData::ADDR], i2c.last_write.as_slice());
    }
}
