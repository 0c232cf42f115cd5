//! Platform error types
//!
//! This module defines error types for the hardware collaborators.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// Edge capture operation failed
    Capture(CaptureError),
}

/// Edge capture errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Every capture slot is taken
    NoFreeSlot,
    /// Line cannot generate edge interrupts
    InvalidLine,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Capture(e) => write!(f, "Capture error: {:?}", e),
        }
    }
}
