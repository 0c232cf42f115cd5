//! rc_ppm_core - Pure no_std PPM timing logic
//!
//! This crate contains the platform-agnostic half of the PPM generator and
//! reader. Everything here is plain data and arithmetic, testable on the
//! host without interrupts, timers or critical sections.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`tick`]: Microsecond to timer tick conversion (`TickClock`)
//! - [`encoding`]: Guarded 8-bit width encoding and frame filler maths
//! - [`collector`]: Falling-edge interval classification for the reader
//! - [`synchro`]: Per-client one-shot "new frame" flags
//! - [`config`]: Generator and reader parameter blocks
//! - [`traits`]: Monotonic time source

#![no_std]

pub mod collector;
pub mod config;
pub mod encoding;
pub mod synchro;
pub mod tick;
pub mod traits;

pub use collector::{EdgeOutcome, FrameCollector, COLLECTOR_CAPACITY};
pub use config::{GeneratorConfig, Polarity, ReaderConfig};
pub use encoding::{EncodedWidth, FrameLayout, GUARD_TICKS};
pub use synchro::{SynchroClients, SynchroFlags};
pub use tick::TickClock;
