//! Platform abstraction layer
//!
//! This module provides the hardware capabilities the PPM engines need: a
//! reprogrammable compare timer for generation and a falling-edge capture
//! source for decoding. Chip-specific register access lives in the
//! implementations of these traits, outside this crate.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{CompareTimer, EdgeCapture, InputLine};
