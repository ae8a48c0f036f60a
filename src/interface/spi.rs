//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::{Operation, SpiDevice};

use super::Adxl345Interface;

/// SPI-based interface implementation for the ADXL345 driver.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Adxl345Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn transact(&mut self, write: &[u8], read: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if read.is_empty() {
            return self.spi.transaction(&mut [Operation::Write(write)]);
        }

        let mut operations = [Operation::Write(write), Operation::Read(read)];
        self.spi.transaction(&mut operations)
    }
}

#[cfg(test)]
mod tests {
    use super::SpiInterface;
    use crate::interface::Adxl345Interface;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

    struct MockDevice<'a> {
        expectations: &'a [TransactionExpectation<'a>],
        index: usize,
    }

    impl<'a> MockDevice<'a> {
        fn new(expectations: &'a [TransactionExpectation<'a>]) -> Self {
            Self { expectations, index: 0 }
        }
    }

    impl<'a> Drop for MockDevice<'a> {
        fn drop(&mut self) {
            assert_eq!(
                self.index,
                self.expectations.len(),
                "not all SPI expectations consumed"
            );
        }
    }

    impl<'a> ErrorType for MockDevice<'a> {
        type Error = Infallible;
    }

    impl<'a> SpiDevice for MockDevice<'a> {
        fn transaction<'b>(
            &mut self,
            operations: &mut [Operation<'b, u8>],
        ) -> Result<(), Self::Error> {
            let expected = self
                .expectations
                .get(self.index)
                .expect("unexpected SPI transaction");
            self.index += 1;

            match *expected {
                TransactionExpectation::Read { command, response } => {
                    assert_eq!(operations.len(), 2, "expected write+read operations");
                    let (first, rest) = operations.split_first_mut().expect("missing first op");
                    match first {
                        Operation::Write(data) => assert_eq!(*data, &[command][..]),
                        _ => panic!("first operation must be write"),
                    }

                    match rest.first_mut().expect("missing second op") {
                        Operation::Read(buf) => {
                            assert_eq!(buf.len(), response.len(), "response length mismatch");
                            buf.copy_from_slice(response);
                        }
                        _ => panic!("second operation must be read"),
                    }
                }
                TransactionExpectation::Write { frame } => {
                    assert_eq!(operations.len(), 1, "expected a single write operation");
                    match &operations[0] {
                        Operation::Write(data) => assert_eq!(*data, frame, "frame mismatch"),
                        _ => panic!("operation must be write"),
                    }
                }
            }

            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    enum TransactionExpectation<'a> {
        Read { command: u8, response: &'a [u8] },
        Write { frame: &'a [u8] },
    }

    #[test]
    fn read_transfers_command_and_fills_buffer() {
        let expectations = [TransactionExpectation::Read {
            command: 0xF2,
            response: &[0x10, 0x00, 0xFF, 0xFF, 0x00, 0x80],
        }];
        let mock = MockDevice::new(&expectations);
        let mut interface = SpiInterface::new(mock);

        let mut buffer = [0u8; 6];
        interface.transact(&[0xF2], &mut buffer).unwrap();
        assert_eq!(buffer, [0x10, 0x00, 0xFF, 0xFF, 0x00, 0x80]);
    }

    #[test]
    fn pure_write_is_a_single_operation() {
        let expectations = [TransactionExpectation::Write {
            frame: &[0x31, 0x03],
        }];
        let mock = MockDevice::new(&expectations);
        let mut interface = SpiInterface::new(mock);

        interface.transact(&[0x31, 0x03], &mut []).unwrap();
    }

    #[test]
    fn interface_is_usable_through_mutable_reference() {
        let expectations = [TransactionExpectation::Read {
            command: 0x80,
            response: &[0xE5],
        }];
        let mock = MockDevice::new(&expectations);
        let mut interface = SpiInterface::new(mock);

        fn read_id<I: Adxl345Interface>(mut iface: I) -> u8 {
            let mut id = [0u8; 1];
            iface.transact(&[0x80], &mut id).ok().expect("transaction failed");
            id[0]
        }

        assert_eq!(read_id(&mut interface), 0xE5);
    }
}
