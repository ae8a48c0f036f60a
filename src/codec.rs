//! Register-level framing for the ADXL345 SPI protocol.
//!
//! Every bus transaction starts with a single command byte:
//!
//! | bit 7 | bit 6      | bits 5:0         |
//! |-------|------------|------------------|
//! | read  | multi-byte | register address |
//!
//! A write frame carries its payload right after the command byte. A read frame
//! is only the command byte; the device clocks the response out afterwards.
//! All functions here are pure.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::registers::{RegisterAddress, AXIS_DATA_LEN};
use crate::sample::SampleTriple;

/// Size of the working buffer backing a single transaction.
///
/// Enough for a single register write or a command byte plus the 6-byte axis burst.
pub const FRAME_CAPACITY: usize = 10;

/// Reasons a frame cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A read of zero bytes was requested.
    EmptyRead,
    /// A write without payload was requested.
    EmptyWrite,
    /// Command byte plus data would not fit into [`FRAME_CAPACITY`].
    Overflow,
}

/// Bit layout of the SPI command byte.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandByte {
    pub address: B6,
    pub multi_byte: bool,
    pub read: bool,
}

impl From<CommandByte> for u8 {
    fn from(value: CommandByte) -> Self {
        value.into_bytes()[0]
    }
}

impl From<u8> for CommandByte {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

/// Bytes sent over the bus for one operation, plus the number of bytes to read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFrame {
    buf: [u8; FRAME_CAPACITY],
    write_len: usize,
    read_len: usize,
}

impl TransactionFrame {
    /// Bytes clocked out to the device.
    pub fn write_bytes(&self) -> &[u8] {
        &self.buf[..self.write_len]
    }

    /// Number of response bytes expected after the written bytes.
    pub const fn read_len(&self) -> usize {
        self.read_len
    }

    /// Total clocked length of the transaction (written plus read bytes).
    pub const fn total_len(&self) -> usize {
        self.write_len + self.read_len
    }

    /// Returns the command byte that opens the frame.
    pub const fn command(&self) -> u8 {
        self.buf[0]
    }

    /// Returns `true` when this frame reads from the device.
    pub const fn is_read(&self) -> bool {
        self.read_len > 0
    }
}

fn command(register: RegisterAddress, read: bool, multi_byte: bool) -> u8 {
    CommandByte::new()
        .with_address(register.addr())
        .with_multi_byte(multi_byte)
        .with_read(read)
        .into()
}

/// Builds a read frame for `length` consecutive bytes starting at `register`.
///
/// The multi-byte bit is only set when more than one byte is requested.
pub fn encode_read(
    register: RegisterAddress,
    length: usize,
) -> core::result::Result<TransactionFrame, FrameError> {
    if length == 0 {
        return Err(FrameError::EmptyRead);
    }
    if 1 + length > FRAME_CAPACITY {
        return Err(FrameError::Overflow);
    }

    let mut buf = [0u8; FRAME_CAPACITY];
    buf[0] = command(register, true, length > 1);
    Ok(TransactionFrame {
        buf,
        write_len: 1,
        read_len: length,
    })
}

/// Builds a write frame: the command byte followed by `payload` verbatim.
pub fn encode_write(
    register: RegisterAddress,
    payload: &[u8],
) -> core::result::Result<TransactionFrame, FrameError> {
    if payload.is_empty() {
        return Err(FrameError::EmptyWrite);
    }
    if 1 + payload.len() > FRAME_CAPACITY {
        return Err(FrameError::Overflow);
    }

    let mut buf = [0u8; FRAME_CAPACITY];
    buf[0] = command(register, false, false);
    buf[1..=payload.len()].copy_from_slice(payload);
    Ok(TransactionFrame {
        buf,
        write_len: 1 + payload.len(),
        read_len: 0,
    })
}

/// Interprets six axis-data bytes as little-endian two's-complement X, Y, Z.
///
/// No bits are masked: the full `i16` range is reconstructed even though the
/// device populates at most 13 significant bits.
pub fn decode_axes(raw: [u8; AXIS_DATA_LEN]) -> SampleTriple {
    SampleTriple {
        x: i16::from_le_bytes([raw[0], raw[1]]),
        y: i16::from_le_bytes([raw[2], raw[3]]),
        z: i16::from_le_bytes([raw[4], raw[5]]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_read_sets_read_and_multi_byte_bits() {
        let frame = encode_read(RegisterAddress::DataX0, 6).unwrap();
        assert_eq!(frame.write_bytes(), &[0xF2]);
        assert_eq!(frame.read_len(), 6);
        assert_eq!(frame.total_len(), 7);
    }

    #[test]
    fn single_read_sets_only_read_bit() {
        let frame = encode_read(RegisterAddress::DevId, 1).unwrap();
        assert_eq!(frame.write_bytes(), &[0x80]);
        assert_eq!(frame.total_len(), 2);
        assert!(frame.is_read());
    }

    #[test]
    fn write_clears_read_bit_and_appends_payload() {
        let frame = encode_write(RegisterAddress::DataFormat, &[0x03]).unwrap();
        assert_eq!(frame.write_bytes(), &[0x31, 0x03]);
        assert_eq!(frame.read_len(), 0);
        assert_eq!(frame.total_len(), 2);
        assert!(!frame.is_read());
    }

    #[test]
    fn command_byte_layout() {
        let cmd = CommandByte::from(0xF2);
        assert!(cmd.read());
        assert!(cmd.multi_byte());
        assert_eq!(cmd.address(), 0x32);
        assert_eq!(u8::from(CommandByte::new().with_address(0x2D)), 0x2D);
    }

    #[test]
    fn frames_are_bounded_by_capacity() {
        assert_eq!(encode_read(RegisterAddress::DevId, 0), Err(FrameError::EmptyRead));
        assert!(encode_read(RegisterAddress::DataX0, FRAME_CAPACITY - 1).is_ok());
        assert_eq!(
            encode_read(RegisterAddress::DataX0, FRAME_CAPACITY),
            Err(FrameError::Overflow)
        );

        assert_eq!(encode_write(RegisterAddress::OfsX, &[]), Err(FrameError::EmptyWrite));
        assert!(encode_write(RegisterAddress::OfsX, &[0u8; FRAME_CAPACITY - 1]).is_ok());
        assert_eq!(
            encode_write(RegisterAddress::OfsX, &[0u8; FRAME_CAPACITY]),
            Err(FrameError::Overflow)
        );
    }

    #[test]
    fn multi_byte_write_keeps_payload_order() {
        let frame = encode_write(RegisterAddress::OfsX, &[0x01, 0xFF, 0x7F]).unwrap();
        assert_eq!(frame.write_bytes(), &[0x1E, 0x01, 0xFF, 0x7F]);
    }

    #[test]
    fn decode_axes_is_little_endian_signed() {
        let sample = decode_axes([0x10, 0x00, 0xFF, 0xFF, 0x00, 0x80]);
        assert_eq!(sample, SampleTriple::new(16, -1, -32768));

        let sample = decode_axes([0xFF, 0x7F, 0x00, 0x01, 0xF0, 0xFF]);
        assert_eq!(sample, SampleTriple::new(32767, 256, -16));
    }
}
