//! Mock edge capture source for testing

use crate::platform::{
    error::{CaptureError, PlatformError},
    traits::{EdgeCapture, InputLine},
    Result,
};
use heapless::Vec;

/// Capture slots available on the mock
pub const MOCK_CAPTURE_SLOTS: usize = 4;

/// Mock edge capture
///
/// Tracks registered lines and their enabled state for test verification.
/// Lines above [`MockEdgeCapture::MAX_LINE`] have no edge interrupt.
#[derive(Debug)]
pub struct MockEdgeCapture {
    slots: Vec<(InputLine, bool), MOCK_CAPTURE_SLOTS>,
    capacity: usize,
}

impl MockEdgeCapture {
    /// Highest line number with an edge interrupt
    pub const MAX_LINE: InputLine = 31;

    /// Create a capture source with every slot free
    pub fn new() -> Self {
        Self::with_slots(MOCK_CAPTURE_SLOTS)
    }

    /// Create a capture source with only `slots` free slots
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity: slots.min(MOCK_CAPTURE_SLOTS),
        }
    }

    /// Whether `line` has a slot
    pub fn is_registered(&self, line: InputLine) -> bool {
        self.slots.iter().any(|&(l, _)| l == line)
    }

    /// Whether edges of `line` are delivered
    pub fn is_enabled(&self, line: InputLine) -> bool {
        self.slots.iter().any(|&(l, enabled)| l == line && enabled)
    }

    fn set_enabled(&mut self, line: InputLine, enabled: bool) {
        if let Some(slot) = self.slots.iter_mut().find(|(l, _)| *l == line) {
            slot.1 = enabled;
        }
    }
}

impl Default for MockEdgeCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeCapture for MockEdgeCapture {
    fn register_line(&mut self, line: InputLine) -> Result<()> {
        if line > Self::MAX_LINE {
            return Err(PlatformError::Capture(CaptureError::InvalidLine));
        }
        if self.is_registered(line) {
            return Ok(());
        }
        if self.slots.len() >= self.capacity {
            return Err(PlatformError::Capture(CaptureError::NoFreeSlot));
        }
        self.slots
            .push((line, false))
            .map_err(|_| PlatformError::Capture(CaptureError::NoFreeSlot))
    }

    fn enable_line(&mut self, line: InputLine) {
        self.set_enabled(line, true);
    }

    fn disable_line(&mut self, line: InputLine) {
        self.set_enabled(line, false);
    }

    fn release_line(&mut self, line: InputLine) {
        self.slots.retain(|&(l, _)| l != line);
    }
}
