//! PPM frame reader
//!
//! Rebuilds channel widths from falling-edge timestamps. Several decoders
//! may listen to different lines of the same capture source through an
//! [`EdgeDispatcher`].

mod decoder;
mod dispatch;

pub use decoder::PpmFrameDecoder;
pub use dispatch::EdgeDispatcher;
