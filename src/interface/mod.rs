//! Bus interface abstraction for the ADXL345 driver.

pub mod spi;

/// SPI mode required by the device (clock idles high, data sampled on the trailing edge).
pub const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_3;
/// Clock rate used by the reference host setup.
pub const DEFAULT_SPI_CLOCK_HZ: u32 = 2_000_000;
/// Highest SPI clock rate supported by the device.
pub const MAX_SPI_CLOCK_HZ: u32 = 5_000_000;

/// Abstraction over the low-level bus access required by the driver.
///
/// One call is one bus transaction: `write` is clocked out first, then
/// `read.len()` response bytes are clocked in while chip select stays asserted.
/// The transaction's total length is `write.len() + read.len()`; a pure write
/// passes an empty `read`.
pub trait Adxl345Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Performs a single write-then-read exchange.
    fn transact(&mut self, write: &[u8], read: &mut [u8]) -> core::result::Result<(), Self::Error>;
}

impl<T> Adxl345Interface for &mut T
where
    T: Adxl345Interface + ?Sized,
{
    type Error = T::Error;

    fn transact(&mut self, write: &[u8], read: &mut [u8]) -> core::result::Result<(), Self::Error> {
        (**self).transact(write, read)
    }
}
