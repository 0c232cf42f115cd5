//! Monotonic microsecond clock abstraction
//!
//! The PPM reader needs "now" in exactly one place: re-priming the previous
//! edge timestamp when it resumes listening. This module provides the
//! `TimeSource` trait for that, plus a controllable mock for host tests.

use core::cell::Cell;

/// Monotonic microsecond clock
///
/// # Example
///
/// ```
/// use rc_ppm_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::with_initial(70_000);
/// // Edge timestamps are the low 16 bits of the microsecond counter
/// assert_eq!(time.edge_timestamp_us(), 4_464);
/// ```
pub trait TimeSource {
    /// Current time in microseconds since system start
    fn now_us(&self) -> u64;

    /// Current time truncated to a 16-bit edge timestamp
    fn edge_timestamp_us(&self) -> u16 {
        (self.now_us() & 0xFFFF) as u16
    }
}

/// Mock time source with controllable advancement
///
/// # Example
///
/// ```
/// use rc_ppm_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance(1500);
/// assert_eq!(time.now_us(), 1500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
