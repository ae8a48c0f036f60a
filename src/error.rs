//! Error handling primitives for the ADXL345 driver.

use crate::codec::FrameError;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
///
/// Only failures that abort the current operation surface here. Unsupported
/// configuration requests and a lenient identity mismatch are reported through
/// the event queue instead (see [`Event::Error`](crate::event::Event::Error)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface (connection lost).
    Interface(E),
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// No transport is bound, or the driver is not in a state that allows the operation.
    NotReady,
    /// A transaction frame could not be built.
    Frame(FrameError),
    /// The device identity did not match and the configured policy aborts bring-up.
    DeviceIdMismatch(u8),
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
