//! Register map definitions for the ADXL345 accelerometer.
//!
//! Reference: <https://www.analog.com/media/en/technical-documentation/data-sheets/adxl345.pdf>
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{OutputDataRate, Range, WakeupFrequency};

/// Value held by `DEVID` on every genuine ADXL345.
pub const EXPECTED_DEVICE_ID: u8 = 0xE5;
/// Reset value of most read/write registers.
pub const DEFAULT_RESET_VALUE: u8 = 0x00;
/// Reset value of `BW_RATE` (100 Hz, normal power).
pub const BW_RATE_RESET_VALUE: u8 = 0x0A;
/// Reset value of `INT_SOURCE` (watermark flag set).
pub const INT_SOURCE_RESET_VALUE: u8 = 0x02;

/// Number of consecutive bytes spanning the X, Y and Z axis samples.
pub const AXIS_DATA_LEN: usize = 6;

/// Named register addresses.
///
/// `0x01..=0x1C` are reserved by the datasheet and intentionally absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RegisterAddress {
    /// Device ID.
    DevId = 0x00,
    /// Tap threshold.
    ThreshTap = 0x1D,
    /// X-axis offset.
    OfsX = 0x1E,
    /// Y-axis offset.
    OfsY = 0x1F,
    /// Z-axis offset.
    OfsZ = 0x20,
    /// Tap duration.
    Dur = 0x21,
    /// Tap latency.
    Latent = 0x22,
    /// Tap window.
    Window = 0x23,
    /// Activity threshold.
    ThreshAct = 0x24,
    /// Inactivity threshold.
    ThreshInact = 0x25,
    /// Inactivity time.
    TimeInact = 0x26,
    /// Axis enable control for activity and inactivity detection.
    ActInactCtl = 0x27,
    /// Free-fall threshold.
    ThreshFf = 0x28,
    /// Free-fall time.
    TimeFf = 0x29,
    /// Axis control for single/double tap.
    TapAxes = 0x2A,
    /// Source of single/double tap.
    ActTapStatus = 0x2B,
    /// Data rate and power mode control.
    BwRate = 0x2C,
    /// Power-saving features control.
    PowerCtl = 0x2D,
    /// Interrupt enable control.
    IntEnable = 0x2E,
    /// Interrupt mapping control.
    IntMap = 0x2F,
    /// Source of interrupts.
    IntSource = 0x30,
    /// Data format control.
    DataFormat = 0x31,
    /// X-axis data, low byte.
    DataX0 = 0x32,
    /// X-axis data, high byte.
    DataX1 = 0x33,
    /// Y-axis data, low byte.
    DataY0 = 0x34,
    /// Y-axis data, high byte.
    DataY1 = 0x35,
    /// Z-axis data, low byte.
    DataZ0 = 0x36,
    /// Z-axis data, high byte.
    DataZ1 = 0x37,
    /// FIFO control.
    FifoCtl = 0x38,
    /// FIFO status.
    FifoStatus = 0x39,
}

impl RegisterAddress {
    /// Every named register in address order.
    pub const ALL: [RegisterAddress; 30] = [
        Self::DevId,
        Self::ThreshTap,
        Self::OfsX,
        Self::OfsY,
        Self::OfsZ,
        Self::Dur,
        Self::Latent,
        Self::Window,
        Self::ThreshAct,
        Self::ThreshInact,
        Self::TimeInact,
        Self::ActInactCtl,
        Self::ThreshFf,
        Self::TimeFf,
        Self::TapAxes,
        Self::ActTapStatus,
        Self::BwRate,
        Self::PowerCtl,
        Self::IntEnable,
        Self::IntMap,
        Self::IntSource,
        Self::DataFormat,
        Self::DataX0,
        Self::DataX1,
        Self::DataY0,
        Self::DataY1,
        Self::DataZ0,
        Self::DataZ1,
        Self::FifoCtl,
        Self::FifoStatus,
    ];

    /// Returns the 6-bit register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Access permission classification.
    pub const fn access(self) -> RegisterAccess {
        match self {
            Self::DevId
            | Self::ActTapStatus
            | Self::IntSource
            | Self::DataX0
            | Self::DataX1
            | Self::DataY0
            | Self::DataY1
            | Self::DataZ0
            | Self::DataZ1
            | Self::FifoStatus => RegisterAccess::ReadOnly,
            _ => RegisterAccess::ReadWrite,
        }
    }

    /// Datasheet reset value.
    pub const fn reset_value(self) -> u8 {
        match self {
            Self::DevId => EXPECTED_DEVICE_ID,
            Self::BwRate => BW_RATE_RESET_VALUE,
            Self::IntSource => INT_SOURCE_RESET_VALUE,
            _ => DEFAULT_RESET_VALUE,
        }
    }
}

impl From<RegisterAddress> for u8 {
    fn from(value: RegisterAddress) -> Self {
        value.addr()
    }
}

impl TryFrom<u8> for RegisterAddress {
    type Error = u8;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|register| register.addr() == value)
            .ok_or(value)
    }
}

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every typed register value.
pub trait Register: Copy + From<u8> + Into<u8> {
    /// Register address as documented in the datasheet.
    const ADDRESS: RegisterAddress;
}

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // g range (bits 1:0).
    pub range: Range,
    // Left-justified output (bit 2).
    pub justify: bool,
    // Full-resolution mode (bit 3).
    pub full_res: bool,
    #[skip]
    __: B1,
    // Interrupts active low (bit 5).
    pub int_invert: bool,
    // 3-wire SPI mode (bit 6).
    pub spi_3wire: bool,
    // Self-test force (bit 7).
    pub self_test: bool,
}

impl From<u8> for DataFormat {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<DataFormat> for u8 {
    fn from(value: DataFormat) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `BW_RATE` register (address `0x2C`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwRate {
    // Output data rate (bits 3:0).
    pub rate: OutputDataRate,
    // Reduced power operation (bit 4).
    pub low_power: bool,
    #[skip]
    __: B3,
}

impl From<u8> for BwRate {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<BwRate> for u8 {
    fn from(value: BwRate) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Sleep-mode reading frequency (bits 1:0).
    pub wakeup: WakeupFrequency,
    // Sleep mode (bit 2).
    pub sleep: bool,
    // Measurement mode (bit 3).
    pub measure: bool,
    // Auto-sleep (bit 4).
    pub auto_sleep: bool,
    // Link activity/inactivity (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

impl From<u8> for PowerControl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<PowerControl> for u8 {
    fn from(value: PowerControl) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for DataFormat {
    const ADDRESS: RegisterAddress = RegisterAddress::DataFormat;
}

impl Register for BwRate {
    const ADDRESS: RegisterAddress = RegisterAddress::BwRate;
}

impl Register for PowerControl {
    const ADDRESS: RegisterAddress = RegisterAddress::PowerCtl;
}
