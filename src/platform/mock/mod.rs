//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use rc_ppm::platform::mock::MockCompareTimer;
//! use rc_ppm::platform::traits::CompareTimer;
//!
//! let mut timer = MockCompareTimer::new();
//! timer.add_to_compare_register(75);
//! assert_eq!(timer.advance_to_next_match().at_ticks, 75);
//! ```

#![cfg(any(test, feature = "mock"))]

mod compare_timer;
mod edge_capture;

pub use compare_timer::{CompareMatch, MockCompareTimer};
pub use edge_capture::{MockEdgeCapture, MOCK_CAPTURE_SLOTS};
