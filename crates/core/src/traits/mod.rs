//! Platform service traits used by the pure PPM logic.
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing

pub mod time;

pub use time::{MockTime, TimeSource};
