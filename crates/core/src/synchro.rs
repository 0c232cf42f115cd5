//! Synchro client flags
//!
//! Every generator and reader instance raises a "new frame" indication once
//! per frame. Up to 8 consumers observe it independently: each owns one bit,
//! polling reads and clears only that bit.
//!
//! # Client Allocation
//!
//! - Client 7: default client
//! - Client 6: width link (virtual serial over PPM)
//! - Clients 0-5: free

use bitflags::bitflags;

bitflags! {
    /// Set of synchro clients
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SynchroClients: u8 {
        const CLIENT_0 = 1 << 0;
        const CLIENT_1 = 1 << 1;
        const CLIENT_2 = 1 << 2;
        const CLIENT_3 = 1 << 3;
        const CLIENT_4 = 1 << 4;
        const CLIENT_5 = 1 << 5;
        const CLIENT_6 = 1 << 6;
        const CLIENT_7 = 1 << 7;
    }
}

impl SynchroClients {
    /// Client used when the caller does not pick one
    pub const DEFAULT_CLIENT: Self = Self::CLIENT_7;

    /// Client reserved for the width link overlay
    pub const WIDTH_LINK: Self = Self::CLIENT_6;

    /// Mask for client `index` (0..=7, higher indices wrap)
    pub const fn client(index: u8) -> Self {
        Self::from_bits_retain(1 << (index & 0x07))
    }
}

/// Pending synchro indications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynchroFlags {
    pending: SynchroClients,
}

impl SynchroFlags {
    /// No pending indication
    pub const fn new() -> Self {
        Self {
            pending: SynchroClients::empty(),
        }
    }

    /// Raise the indication for every client
    pub fn signal(&mut self) {
        self.pending = SynchroClients::all();
    }

    /// Return the pending subset of `clients` and clear it
    ///
    /// Bits outside `clients` are left untouched.
    pub fn poll_and_clear(&mut self, clients: SynchroClients) -> SynchroClients {
        let hit = self.pending & clients;
        self.pending.remove(hit);
        hit
    }

    /// Pending clients (does not clear)
    pub const fn pending(&self) -> SynchroClients {
        self.pending
    }
}
