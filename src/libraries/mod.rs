//! PPM engines
//!
//! ## Libraries
//!
//! - `ppm_gen`: Compare-match driven frame generator (`PpmFrameEngine`)
//! - `ppm_reader`: Falling-edge frame decoder (`PpmFrameDecoder`) and edge fan-out
//! - `synchro`: Interrupt-safe "new frame" notification set
//! - `width_link`: Width-level capabilities for a serial-over-PPM overlay

pub mod error;
pub mod ppm_gen;
pub mod ppm_reader;
pub mod synchro;
pub mod width_link;

#[cfg(test)]
mod loopback;

// Re-export commonly used types
pub use error::PpmError;
pub use ppm_gen::{ChannelTable, FrameCursor, FramePhase, PpmFrameEngine, PpmFrameWriter};
pub use ppm_reader::{EdgeDispatcher, PpmFrameDecoder};
pub use synchro::SynchroClientRegistry;
pub use width_link::{WidthSink, WidthSource};
