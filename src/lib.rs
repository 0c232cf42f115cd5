#![cfg_attr(not(test), no_std)]

//! rc_ppm - Interrupt-driven RC PPM frame generator and decoder
//!
//! This library drives a PPM output through an 8-bit compare-match timer and
//! rebuilds channel widths from falling-edge timestamps on one or more input
//! lines. Timing maths lives in [`rc_ppm_core`]; this crate adds the
//! interrupt-side state machines, critical-section sharing and the hardware
//! capability traits.

// Platform abstraction layer (compare timer, edge capture)
pub mod platform;

// Logging macros and critical-section shared state
pub mod runtime;

// PPM generator and reader
pub mod libraries;

pub use libraries::{
    ChannelTable, EdgeDispatcher, FrameCursor, FramePhase, PpmError, PpmFrameDecoder,
    PpmFrameEngine, PpmFrameWriter, SynchroClientRegistry, WidthSink, WidthSource,
};
pub use rc_ppm_core::{
    EncodedWidth, FrameLayout, GeneratorConfig, Polarity, ReaderConfig, SynchroClients, TickClock,
};
