//! Events reported by the driver and the bounded queue that carries them.
//!
//! The driver never calls back into user code. Identity, data, error and
//! terminal notifications are pushed into an [`EventQueue`] owned by the driver
//! and drained by the caller whenever it suits its own scheduling.

use core::fmt;

use heapless::Deque;

use crate::log;
use crate::sample::SampleTriple;

/// Number of events held before the oldest ones are dropped.
pub const EVENT_QUEUE_CAPACITY: usize = 16;

/// Notification produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Device-id register value read during bring-up, whether or not it matched.
    Identity(u8),
    /// Raw counts from one sampling call.
    Data(SampleTriple),
    /// A recoverable problem; the operation that raised it did not fail.
    Error(ErrorReport),
    /// The transport went away; no register traffic happens until a new bind.
    Terminal(TerminalReason),
}

/// Out-of-band problems reported through [`Event::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorReport {
    /// Requested range (in g) is not one of 2, 4, 8 or 16.
    UnsupportedRange(i32),
    /// Requested output rate (in millihertz) is not in the datasheet table.
    UnsupportedOutputRate(u32),
    /// `DEVID` did not hold the expected value.
    DeviceIdMismatch {
        /// Value the device should report.
        expected: u8,
        /// Value actually read.
        found: u8,
    },
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedRange(g) => write!(f, "Unsupported G range: {g}"),
            Self::UnsupportedOutputRate(mhz) => {
                write!(f, "Unsupported output data rate: {mhz} mHz")
            }
            Self::DeviceIdMismatch { expected, found } => {
                write!(f, "Invalid device ID, expected {expected} but got {found}")
            }
        }
    }
}

/// Why the driver entered a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminalReason {
    /// The transport link was lost.
    Disconnected,
    /// The transport reported that it cannot drive this device.
    Incompatible,
}

/// Bounded FIFO of pending [`Event`]s.
///
/// When full, the oldest event is discarded and [`EventQueue::dropped`] grows.
#[derive(Debug)]
pub struct EventQueue {
    queue: Deque<Event, EVENT_QUEUE_CAPACITY>,
    dropped: u32,
}

impl EventQueue {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Appends an event, evicting the oldest one if the queue is full.
    pub fn push(&mut self, event: Event) {
        if self.queue.is_full() {
            self.queue.pop_front();
            self.dropped = self.dropped.saturating_add(1);
            log::log_warn!("event queue full, dropped {} events", self.dropped);
        }

        // Cannot fail: a slot was freed above when the queue was full.
        let _ = self.queue.push_back(event);
    }

    /// Removes and returns the oldest pending event.
    pub fn pop(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when no events are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total events discarded because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Drains all pending events, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        core::iter::from_fn(move || self.queue.pop_front())
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
