//! Interrupt-safe synchro notification set
//!
//! Wraps [`SynchroFlags`] in a critical section so the interrupt side can
//! raise the indication while ordinary code polls its own clients.

use rc_ppm_core::{SynchroClients, SynchroFlags};

use crate::runtime::{CsState, SharedState};

/// Per-instance "new frame" indication for up to 8 clients
pub struct SynchroClientRegistry {
    flags: CsState<SynchroFlags>,
}

impl SynchroClientRegistry {
    /// Registry with nothing pending
    pub const fn new() -> Self {
        Self {
            flags: CsState::new(SynchroFlags::new()),
        }
    }

    /// Raise the indication for every client
    pub fn signal(&self) {
        self.flags.with_mut(|flags| flags.signal());
    }

    /// Return the pending subset of `clients` and clear only those bits
    pub fn poll_and_clear(&self, clients: SynchroClients) -> SynchroClients {
        self.flags.with_mut(|flags| flags.poll_and_clear(clients))
    }

    /// Whether any of `clients` had a pending indication (cleared on read)
    pub fn is_synchro(&self, clients: SynchroClients) -> bool {
        !self.poll_and_clear(clients).is_empty()
    }

    /// Drop every pending indication
    pub fn clear(&self) {
        self.flags.with_mut(|flags| {
            flags.poll_and_clear(SynchroClients::all());
        });
    }
}

impl Default for SynchroClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
