//! Decoded acceleration samples.

/// Standard gravity used when converting g to m/s².
pub const STANDARD_GRAVITY: f32 = 9.8;

/// One raw X/Y/Z reading as signed counts.
///
/// Counts are not scaled. Multiply by
/// [`Adxl345::multiplier`](crate::Adxl345::multiplier) to obtain g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleTriple {
    /// X-axis reading.
    pub x: i16,
    /// Y-axis reading.
    pub y: i16,
    /// Z-axis reading.
    pub z: i16,
}

impl SampleTriple {
    /// Creates a sample from raw counts.
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Returns the counts as `[x, y, z]`.
    pub const fn as_array(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }

    /// Scales the counts to g using the given multiplier.
    pub fn to_g(&self, multiplier: f32) -> [f32; 3] {
        self.as_array().map(|count| f32::from(count) * multiplier)
    }

    /// Scales the counts to m/s² using the given multiplier.
    pub fn to_mps2(&self, multiplier: f32) -> [f32; 3] {
        self.to_g(multiplier).map(|g| g * STANDARD_GRAVITY)
    }

    /// Squared magnitude of the raw vector, in counts².
    pub fn magnitude_squared(&self) -> i64 {
        self.as_array()
            .iter()
            .map(|&count| i64::from(count) * i64::from(count))
            .sum()
    }
}

impl From<[i16; 3]> for SampleTriple {
    fn from([x, y, z]: [i16; 3]) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Range;

    #[test]
    fn scaling_applies_multiplier_per_axis() {
        let sample = SampleTriple::new(32, -64, 0);
        let multiplier = Range::G16.multiplier();
        assert_eq!(sample.to_g(multiplier), [1.0, -2.0, 0.0]);
        assert_eq!(sample.to_mps2(multiplier), [9.8, -19.6, 0.0]);
    }

    #[test]
    fn array_conversion_keeps_axis_order() {
        let sample = SampleTriple::from([7, -8, 9]);
        assert_eq!(sample, SampleTriple::new(7, -8, 9));
        assert_eq!(sample.as_array(), [7, -8, 9]);
    }

    #[test]
    fn magnitude_does_not_overflow_at_extremes() {
        let sample = SampleTriple::new(i16::MIN, i16::MIN, i16::MIN);
        assert_eq!(sample.magnitude_squared(), 3 * 32768 * 32768);
    }
}
