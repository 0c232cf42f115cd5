//! Caller-side channel width updates

use rc_ppm_core::{EncodedWidth, FrameLayout, SynchroClients};

use super::table::{ChannelTable, SLOT_COUNT, SYNCHRO_SLOT};
use crate::log_warn;

/// Handle used by ordinary code to change generated channel widths
///
/// Keeps a private copy of every pending encoding, so the synchro filler is
/// computed without touching the shared table. Only the final two-slot
/// publish runs inside a critical section.
pub struct PpmFrameWriter<'a> {
    table: &'a ChannelTable,
    layout: FrameLayout,
    pending: [EncodedWidth; SLOT_COUNT],
}

impl<'a> PpmFrameWriter<'a> {
    /// Set every channel to `neutral_us` and publish the whole table
    pub(crate) fn new(table: &'a ChannelTable, layout: FrameLayout, neutral_us: u16) -> Self {
        let mut writer = Self {
            table,
            layout,
            pending: [EncodedWidth::ZERO; SLOT_COUNT],
        };
        let neutral = layout.encode_channel(neutral_us);
        for slot in writer.channel_slots_mut() {
            *slot = neutral;
        }
        writer.pending[SYNCHRO_SLOT] = writer.compute_filler();
        table.publish_all(&writer.pending);
        writer
    }

    /// Request a new width for `channel` (1-based)
    ///
    /// Takes effect at the next frame boundary. Channel 0 and channels
    /// beyond the configured count are ignored.
    pub fn set_channel_width(&mut self, channel: u8, width_us: u16) {
        if channel == 0 || channel > self.layout.channel_count() {
            return;
        }
        let index = usize::from(channel);
        let width = self.layout.encode_channel(width_us);
        self.pending[index] = width;
        let filler = self.compute_filler();
        self.pending[SYNCHRO_SLOT] = filler;
        self.table.publish(index, width, filler);
    }

    /// Pending encoding of `channel`, `None` if out of range
    pub fn pending(&self, channel: u8) -> Option<EncodedWidth> {
        if channel == 0 || channel > self.layout.channel_count() {
            None
        } else {
            Some(self.pending[usize::from(channel)])
        }
    }

    /// Pending synchro filler encoding
    pub fn filler(&self) -> EncodedWidth {
        self.pending[SYNCHRO_SLOT]
    }

    /// Frame geometry
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Pending "new frame" clients among `clients` (cleared on read)
    pub fn poll_synchro(&self, clients: SynchroClients) -> SynchroClients {
        self.table.synchro().poll_and_clear(clients)
    }

    /// Whether a frame started since `clients` last asked
    pub fn is_synchro(&self, clients: SynchroClients) -> bool {
        self.table.synchro().is_synchro(clients)
    }

    fn channel_slots_mut(&mut self) -> &mut [EncodedWidth] {
        let count = usize::from(self.layout.channel_count());
        &mut self.pending[1..=count]
    }

    fn compute_filler(&self) -> EncodedWidth {
        let count = usize::from(self.layout.channel_count());
        let ticks = match self.layout.filler_ticks(&self.pending[1..=count]) {
            Some(ticks) => ticks,
            None => {
                log_warn!(
                    "PPM channels exceed the {} tick frame, synchro gap saturated",
                    self.layout.period_ticks()
                );
                0
            }
        };
        EncodedWidth::encode(ticks)
    }
}
