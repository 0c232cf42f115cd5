//! Runtime support shared by the generator and the reader
//!
//! - [`logging`]: `log_*!` macros (defmt on target, stdout in host tests)
//! - [`sync`]: Critical-section protected state shared with interrupt handlers

pub mod logging;
pub mod sync;

pub use sync::{CsState, SharedState};
