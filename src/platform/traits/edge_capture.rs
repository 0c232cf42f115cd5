//! Edge capture interface trait
//!
//! This module defines the pin-change source the PPM reader listens to. The
//! platform timestamps each falling edge and hands it to the dispatcher; this
//! trait only covers line registration.

use crate::platform::Result;

/// Input line identifier (pin number on the platform)
pub type InputLine = u8;

/// Multi-listener falling-edge capture source
///
/// # Safety Invariants
///
/// - A registered line keeps its capture slot until `release_line`
/// - Enabling or disabling a line never discards edges of other lines
pub trait EdgeCapture {
    /// Allocate a capture slot for `line`
    ///
    /// # Errors
    ///
    /// - `PlatformError::Capture(CaptureError::NoFreeSlot)` if every slot is taken
    /// - `PlatformError::Capture(CaptureError::InvalidLine)` if the line has
    ///   no edge interrupt
    fn register_line(&mut self, line: InputLine) -> Result<()>;

    /// Start delivering edges of `line`
    fn enable_line(&mut self, line: InputLine);

    /// Stop delivering edges of `line`
    fn disable_line(&mut self, line: InputLine);

    /// Give the capture slot of `line` back (no-op if it has none)
    fn release_line(&mut self, line: InputLine);
}
