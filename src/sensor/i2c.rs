use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::RegisterBus;

/// [`RegisterBus`] over an I2C peripheral.
///
/// Payloads are big-endian. Every transaction is followed by `settle_us` of
/// idle time, the front-end's minimum gap between transactions.
pub struct I2cRegisterBus<I2C, D> {
    i2c: I2C,
    delay: D,
    address: SevenBitAddress,
    settle_us: u32,
}

impl<I2C, D> I2cRegisterBus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, address: SevenBitAddress, settle_us: u32) -> Self {
        Self {
            i2c,
            delay,
            address,
            settle_us,
        }
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> RegisterBus for I2cRegisterBus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn write_register(&mut self, address: u8, value: u16) -> Result<(), Self::Error> {
        let [hi, lo] = value.to_be_bytes();
        let result = self.i2c.write(self.address, &[address, hi, lo]);
        self.delay.delay_us(self.settle_us);
        result
    }

    fn read_register(&mut self, address: u8) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        let result = self.i2c.write_read(self.address, &[address], &mut buf);
        self.delay.delay_us(self.settle_us);
        result.map(|()| u16::from_be_bytes(buf))
    }
}
