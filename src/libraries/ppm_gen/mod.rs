//! PPM frame generator
//!
//! Produces a constant-period PPM frame on the output pin of an 8-bit
//! compare-match timer. Up to 8 channels, positive or negative modulation,
//! widths changeable at any time from ordinary code.
//!
//! # Usage
//!
//! ```ignore
//! static PPM_TABLE: ChannelTable = ChannelTable::new();
//!
//! let (mut engine, mut writer) = PpmFrameEngine::initialize(
//!     &PPM_TABLE,
//!     timer,
//!     TickClock::AVR_16MHZ_PRESCALE_64,
//!     GeneratorConfig::new(Polarity::Positive, 4),
//! )?;
//!
//! // Compare interrupt
//! engine.on_compare_match();
//!
//! // Main loop
//! writer.set_channel_width(1, 1200);
//! if writer.is_synchro(SynchroClients::DEFAULT_CLIENT) { /* new frame */ }
//! ```

mod engine;
mod table;
mod writer;

pub use engine::{FrameCursor, FramePhase, PpmFrameEngine};
pub use table::{ChannelTable, SLOT_COUNT, SYNCHRO_SLOT};
pub use writer::PpmFrameWriter;
