//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod compare_timer;
pub mod edge_capture;

// Re-export trait interfaces
pub use compare_timer::CompareTimer;
pub use edge_capture::{EdgeCapture, InputLine};
