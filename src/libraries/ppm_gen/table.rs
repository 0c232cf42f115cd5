//! Double-buffered channel table shared by the engine and its writer
//!
//! The writer publishes `next` encodings at any time; the engine copies them
//! into its private `current` set only at a frame boundary. Slot 0 holds the
//! synchro filler, slots `1..=N` the channels.

use rc_ppm_core::config::MAX_CHANNELS;
use rc_ppm_core::EncodedWidth;

use crate::libraries::error::PpmError;
use crate::libraries::synchro::SynchroClientRegistry;
use crate::runtime::{CsState, SharedState};

/// Channel slots plus the synchro slot
pub const SLOT_COUNT: usize = MAX_CHANNELS as usize + 1;

/// Index of the synchro filler slot
pub const SYNCHRO_SLOT: usize = 0;

/// Shared table between one [`super::PpmFrameEngine`] and its [`super::PpmFrameWriter`]
///
/// Intended to live in a `static`; the engine claims it for its lifetime.
///
/// # Example
///
/// ```
/// use rc_ppm::ChannelTable;
///
/// static PPM_TABLE: ChannelTable = ChannelTable::new();
/// assert!(!PPM_TABLE.is_claimed());
/// ```
pub struct ChannelTable {
    next: CsState<[EncodedWidth; SLOT_COUNT]>,
    claimed: CsState<bool>,
    synchro: SynchroClientRegistry,
}

impl ChannelTable {
    /// Unclaimed table, every slot empty
    pub const fn new() -> Self {
        Self {
            next: CsState::new([EncodedWidth::ZERO; SLOT_COUNT]),
            claimed: CsState::new(false),
            synchro: SynchroClientRegistry::new(),
        }
    }

    /// Whether a generator currently owns the table
    pub fn is_claimed(&self) -> bool {
        self.claimed.with(|claimed| *claimed)
    }

    /// Take ownership of the table
    pub(crate) fn claim(&self) -> Result<(), PpmError> {
        self.claimed.with_mut(|claimed| {
            if *claimed {
                Err(PpmError::ResourceExhausted)
            } else {
                *claimed = true;
                Ok(())
            }
        })
    }

    pub(crate) fn release(&self) {
        self.claimed.with_mut(|claimed| *claimed = false);
        self.synchro.clear();
    }

    /// Publish one channel and the filler that keeps the period constant
    pub(crate) fn publish(&self, channel: usize, width: EncodedWidth, filler: EncodedWidth) {
        self.next.with_mut(|next| {
            next[SYNCHRO_SLOT] = filler;
            next[channel] = width;
        });
    }

    /// Publish every slot at once
    pub(crate) fn publish_all(&self, slots: &[EncodedWidth; SLOT_COUNT]) {
        self.next.with_mut(|next| *next = *slots);
    }

    /// Frame boundary: copy `next` into `current` and raise the synchro set
    pub(crate) fn load_next(&self, current: &mut [EncodedWidth; SLOT_COUNT]) {
        self.next.with(|next| *current = *next);
        self.synchro.signal();
    }

    /// Snapshot of the published slots
    pub fn next_slots(&self) -> [EncodedWidth; SLOT_COUNT] {
        self.next.with(|next| *next)
    }

    /// "New frame" indication, raised once per generated frame
    pub fn synchro(&self) -> &SynchroClientRegistry {
        &self.synchro
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self::new()
    }
}
