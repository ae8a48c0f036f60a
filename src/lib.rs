//! `#![no_std]` SPI driver for the Analog Devices ADXL345 accelerometer.
//!
//! ```no_run
//! # fn run<SPI: embedded_hal::spi::SpiDevice, D: embedded_hal::delay::DelayNs>(spi: SPI, delay: D) {
//! use adxl345::{Adxl345, Config, Event};
//!
//! let mut accel = Adxl345::new_spi(spi, Config::default(), delay);
//! accel.setup().ok();
//!
//! loop {
//!     if let Ok(sample) = accel.sample() {
//!         let [_x, _y, _z] = sample.to_g(accel.multiplier());
//!     }
//!     while let Some(event) = accel.poll_event() {
//!         if let Event::Error(report) = event {
//!             let _ = report;
//!         }
//!     }
//! }
//! # }
//! ```
#![no_std]

mod error;

pub mod codec;
pub mod config;
pub mod device;
pub mod event;
pub mod interface;
mod log;
pub mod params;
pub mod registers;
pub mod sample;

pub use crate::config::Config;
pub use crate::device::{Adxl345, DriverState};
pub use crate::error::{Error, Result};
pub use crate::event::{ErrorReport, Event, TerminalReason};
pub use crate::params::{OutputDataRate, Range};
pub use crate::sample::SampleTriple;
