//! Configuration primitives for the ADXL345 driver.

use crate::params::{IdentityPolicy, OutputDataRate, Range};

/// Settle delay after each register write used by the reference host setup.
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 200;
/// Longest settle delay accepted by [`Config::validate`].
pub const MAX_SETTLE_DELAY_MS: u32 = 1_000;

/// User-facing configuration for the ADXL345 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Full-scale range written into `DATA_FORMAT` during bring-up.
    pub range: Range,
    /// Output data rate written into `BW_RATE` during bring-up.
    pub output_rate: OutputDataRate,
    /// Wait applied after every register write, in milliseconds. Zero disables it.
    pub settle_delay_ms: u32,
    /// Reaction to a device-id mismatch during bring-up.
    pub identity_policy: IdentityPolicy,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is usable.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(ConfigError::SettleDelayTooLong);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the full-scale range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Overrides the output data rate.
    pub fn output_rate(mut self, output_rate: OutputDataRate) -> Self {
        self.config.output_rate = output_rate;
        self
    }

    /// Sets the post-write settle delay in milliseconds.
    pub fn settle_delay_ms(mut self, settle_delay_ms: u32) -> Self {
        self.config.settle_delay_ms = settle_delay_ms;
        self
    }

    /// Sets the identity mismatch policy.
    pub fn identity_policy(mut self, policy: IdentityPolicy) -> Self {
        self.config.identity_policy = policy;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            range: Range::G16,
            output_rate: OutputDataRate::Hz1600,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            identity_policy: IdentityPolicy::Report,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Settle delay exceeds [`MAX_SETTLE_DELAY_MS`].
    SettleDelayTooLong,
}
