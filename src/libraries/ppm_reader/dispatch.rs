//! Falling-edge fan-out to attached decoders
//!
//! The platform delivers "falling edge on line L at time T" once; the
//! dispatcher forwards it to every registered decoder, each of which keeps
//! only the edges of its own line.

use heapless::Vec;

use rc_ppm_core::traits::TimeSource;

use super::decoder::PpmFrameDecoder;
use crate::libraries::error::PpmError;
use crate::log_warn;
use crate::platform::traits::{EdgeCapture, InputLine};

/// Owner of the edge capture source and the ordered decoder list
pub struct EdgeDispatcher<'a, C: EdgeCapture, const N: usize> {
    capture: C,
    listeners: Vec<&'a PpmFrameDecoder, N>,
}

impl<'a, C: EdgeCapture, const N: usize> EdgeDispatcher<'a, C, N> {
    /// Dispatcher with no listener
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            listeners: Vec::new(),
        }
    }

    /// Attach `decoder` to `line` and add it to the listener list
    ///
    /// A decoder that is already listed is only moved to `line`.
    ///
    /// # Errors
    ///
    /// - `PpmError::ListenerCapacity` if the list is full
    /// - `PpmError::Platform` if the capture source rejects the line
    pub fn attach(&mut self, decoder: &'a PpmFrameDecoder, line: InputLine) -> Result<(), PpmError> {
        let listed = self.contains(decoder);
        if !listed && self.listeners.is_full() {
            log_warn!("Edge dispatcher full ({} listeners)", N);
            return Err(PpmError::ListenerCapacity);
        }
        decoder.attach(&mut self.capture, line)?;
        if !listed {
            self.listeners
                .push(decoder)
                .map_err(|_| PpmError::ListenerCapacity)?;
        }
        Ok(())
    }

    /// Suspend `decoder` (see [`PpmFrameDecoder::suspend`])
    pub fn suspend(&mut self, decoder: &PpmFrameDecoder) -> Result<(), PpmError> {
        decoder.suspend(&mut self.capture)
    }

    /// Resume `decoder` (see [`PpmFrameDecoder::resume`])
    pub fn resume<S: TimeSource>(&mut self, decoder: &PpmFrameDecoder, time: &S) -> Result<(), PpmError> {
        decoder.resume(&mut self.capture, time)
    }

    /// Edge interrupt entry point
    pub fn on_falling_edge(&self, line: InputLine, timestamp_us: u16) {
        for decoder in &self.listeners {
            decoder.on_falling_edge(line, timestamp_us);
        }
    }

    /// Number of registered decoders
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Edge capture source
    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Edge capture source (mutable)
    pub fn capture_mut(&mut self) -> &mut C {
        &mut self.capture
    }

    fn contains(&self, decoder: &PpmFrameDecoder) -> bool {
        self.listeners
            .iter()
            .any(|&listed| core::ptr::eq(listed, decoder))
    }
}
