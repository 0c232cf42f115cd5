//! Width-level capabilities for a serial-over-PPM overlay
//!
//! A byte framing layer that tunnels data through one PPM channel only needs
//! to set a width and wait for the next frame on the sending side, and read a
//! width once per frame on the receiving side. Both sides observe the synchro
//! indication through the reserved [`SynchroClients::WIDTH_LINK`] client, so
//! the overlay never steals the default client from the application.

use rc_ppm_core::SynchroClients;

use super::ppm_gen::PpmFrameWriter;
use super::ppm_reader::PpmFrameDecoder;

/// Sending side of a width link
pub trait WidthSink {
    /// Request `width_us` on `channel` for the coming frames
    fn set_width_us(&mut self, width_us: u16, channel: u8);

    /// Whether a frame started since the last call
    fn sink_is_synchro(&self) -> bool;
}

/// Receiving side of a width link
pub trait WidthSource {
    /// Width of `channel` in the last complete frame (0 if absent)
    fn source_width_us(&self, channel: u8) -> u16;

    /// Whether a frame completed since the last call
    fn source_is_synchro(&self) -> bool;
}

impl WidthSink for PpmFrameWriter<'_> {
    fn set_width_us(&mut self, width_us: u16, channel: u8) {
        self.set_channel_width(channel, width_us);
    }

    fn sink_is_synchro(&self) -> bool {
        self.is_synchro(SynchroClients::WIDTH_LINK)
    }
}

impl WidthSource for PpmFrameDecoder {
    fn source_width_us(&self, channel: u8) -> u16 {
        self.width_us(channel)
    }

    fn source_is_synchro(&self) -> bool {
        self.is_synchro(SynchroClients::WIDTH_LINK)
    }
}
