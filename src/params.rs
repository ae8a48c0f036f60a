//! Strongly typed parameter enumerations for the ADXL345 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl345::params::{OutputDataRate, Range};
//!
//! let range = Range::from_g(8).unwrap();
//! assert_eq!(range, Range::G8);
//! assert_eq!(range.multiplier(), 8.0 * 2.0 / 1024.0);
//! assert_eq!(OutputDataRate::default(), OutputDataRate::Hz1600);
//! ```

use modular_bitfield::prelude::Specifier;

/// Full-scale measurement range (`DATA_FORMAT[1:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl Range {
    /// Every supported range, narrowest first.
    pub const ALL: [Range; 4] = [Range::G2, Range::G4, Range::G8, Range::G16];

    /// Returns the full-scale span in g.
    pub const fn scale_g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Returns the 2-bit code written into `DATA_FORMAT`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up the range for a span expressed in g (`2`, `4`, `8` or `16`).
    pub const fn from_g(g: i32) -> Option<Self> {
        match g {
            2 => Some(Self::G2),
            4 => Some(Self::G4),
            8 => Some(Self::G8),
            16 => Some(Self::G16),
            _ => None,
        }
    }

    /// Conversion factor from a raw signed count to g.
    ///
    /// The device spreads 1024 counts across the full `±scale` span, so one count is
    /// `scale * 2 / 1024` g.
    pub fn multiplier(self) -> f32 {
        f32::from(self.scale_g()) * 2.0 / 1024.0
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::G16
    }
}

/// Output data rate selections encoded in `BW_RATE[3:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// 0.10 Hz.
    Hz0_10 = 0b0000,
    /// 0.20 Hz.
    Hz0_20 = 0b0001,
    /// 0.39 Hz.
    Hz0_39 = 0b0010,
    /// 0.78 Hz.
    Hz0_78 = 0b0011,
    /// 1.56 Hz.
    Hz1_56 = 0b0100,
    /// 3.13 Hz.
    Hz3_13 = 0b0101,
    /// 6.25 Hz.
    Hz6_25 = 0b0110,
    /// 12.5 Hz.
    Hz12_5 = 0b0111,
    /// 25 Hz.
    Hz25 = 0b1000,
    /// 50 Hz.
    Hz50 = 0b1001,
    /// 100 Hz (power-on default).
    Hz100 = 0b1010,
    /// 200 Hz.
    Hz200 = 0b1011,
    /// 400 Hz.
    Hz400 = 0b1100,
    /// 800 Hz.
    Hz800 = 0b1101,
    /// 1600 Hz.
    Hz1600 = 0b1110,
    /// 3200 Hz.
    Hz3200 = 0b1111,
}

impl OutputDataRate {
    const TABLE: [(OutputDataRate, u32); 16] = [
        (Self::Hz0_10, 100),
        (Self::Hz0_20, 200),
        (Self::Hz0_39, 390),
        (Self::Hz0_78, 780),
        (Self::Hz1_56, 1_560),
        (Self::Hz3_13, 3_130),
        (Self::Hz6_25, 6_250),
        (Self::Hz12_5, 12_500),
        (Self::Hz25, 25_000),
        (Self::Hz50, 50_000),
        (Self::Hz100, 100_000),
        (Self::Hz200, 200_000),
        (Self::Hz400, 400_000),
        (Self::Hz800, 800_000),
        (Self::Hz1600, 1_600_000),
        (Self::Hz3200, 3_200_000),
    ];

    /// Returns the 4-bit code written into `BW_RATE`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the nominal rate in millihertz, as listed in the datasheet.
    pub const fn millihertz(self) -> u32 {
        Self::TABLE[self as usize].1
    }

    /// Looks up the rate matching a datasheet value expressed in millihertz.
    pub fn from_millihertz(millihertz: u32) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, mhz)| *mhz == millihertz)
            .map(|(rate, _)| *rate)
    }
}

impl Default for OutputDataRate {
    fn default() -> Self {
        Self::Hz1600
    }
}

/// Reading frequency while in sleep mode (`POWER_CTL[1:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum WakeupFrequency {
    /// 8 Hz.
    Hz8 = 0b00,
    /// 4 Hz.
    Hz4 = 0b01,
    /// 2 Hz.
    Hz2 = 0b10,
    /// 1 Hz.
    Hz1 = 0b11,
}

/// What to do when the device-id register does not hold the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdentityPolicy {
    /// Report the mismatch as an error event and continue bring-up.
    Report,
    /// Report the mismatch and abort bring-up with [`Error::DeviceIdMismatch`](crate::Error::DeviceIdMismatch).
    Abort,
}

impl Default for IdentityPolicy {
    fn default() -> Self {
        Self::Report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_codes_and_scales_match_datasheet() {
        let expected = [(Range::G2, 0b00, 2), (Range::G4, 0b01, 4), (Range::G8, 0b10, 8), (Range::G16, 0b11, 16)];
        for (range, code, scale) in expected {
            assert_eq!(range.code(), code);
            assert_eq!(range.scale_g(), scale);
            assert_eq!(Range::from_g(i32::from(scale)), Some(range));
        }
    }

    #[test]
    fn multiplier_spreads_1024_counts_over_span() {
        for range in Range::ALL {
            assert_eq!(range.multiplier(), f32::from(range.scale_g()) * 2.0 / 1024.0);
        }
        assert_eq!(Range::G2.multiplier(), 0.00390625);
        assert_eq!(Range::G16.multiplier(), 0.03125);
    }

    #[test]
    fn unsupported_spans_are_rejected() {
        for g in [3, 0, -2, 1, 32, i32::MIN] {
            assert_eq!(Range::from_g(g), None);
        }
    }

    #[test]
    fn output_rate_table_is_indexed_by_code() {
        for (rate, mhz) in OutputDataRate::TABLE {
            assert_eq!(OutputDataRate::TABLE[rate.code() as usize].0, rate);
            assert_eq!(OutputDataRate::from_millihertz(mhz), Some(rate));
        }
        assert_eq!(OutputDataRate::Hz1600.code(), 0x0E);
        assert_eq!(OutputDataRate::Hz100.code(), 0x0A);
        assert_eq!(OutputDataRate::from_millihertz(1_000_000), None);
    }
}
