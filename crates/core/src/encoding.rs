//! Pulse width encoding for an 8-bit compare-match timer
//!
//! A duration in ticks is split into full 256-tick timer cycles and a
//! remainder, so the compare interrupt can re-arm the comparator one step at
//! a time:
//!
//! ```text
//! Positive PPM    .-----.                         .-----.
//!                 |  H  |  R     F     F    (h)   |  H  |
//!              ---'     '-----x-----x-----x---x---'     '-----
//!                 <------------------------------->
//!                        Channel duration
//! H: header, R: remainder, F: full timer cycle, h: half timer cycle
//! ```
//!
//! # Guard Band
//!
//! After re-arming the comparator the interrupt handler must return before
//! the next match fires. A remainder too close to 0 or to 256 leaves no lead
//! time, so remainders are kept in `[GUARD_TICKS, 256 - GUARD_TICKS]`:
//!
//! - remainder < guard: borrow half a cycle (`remainder += 128`, half flag)
//! - remainder > 256 - guard: carry into an extra cycle and give half back
//!   (`overflow += 1`, `remainder -= 128`, half flag)
//!
//! When the half flag is set, one of the overflow steps lasts 128 ticks
//! instead of 256.

use crate::config::{GeneratorConfig, MAX_CHANNELS};
use crate::tick::{TickClock, FULL_CYCLE_TICKS};

/// Minimum distance (ticks) between a re-arm and the next compare match
pub const GUARD_TICKS: u8 = 16;

/// Half of a timer cycle
pub const HALF_CYCLE_TICKS: u8 = 128;

/// Overflow counts are 7-bit
pub const MAX_OVERFLOW_COUNT: u8 = 0x7F;

/// Largest tick count that [`EncodedWidth::encode`] represents exactly
pub const MAX_ENCODED_TICKS: u32 =
    MAX_OVERFLOW_COUNT as u32 * FULL_CYCLE_TICKS + (FULL_CYCLE_TICKS - GUARD_TICKS as u32);

/// Duration in timer ticks, decomposed for incremental re-arming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodedWidth {
    /// Number of overflow steps left (7-bit)
    overflow_count: u8,
    /// One overflow step lasts half a cycle
    half_overflow: bool,
    /// Ticks to add on the first tail step
    remainder: u8,
}

impl EncodedWidth {
    /// Empty width (nothing left to generate)
    pub const ZERO: Self = Self {
        overflow_count: 0,
        half_overflow: false,
        remainder: 0,
    };

    /// Encode a tick count with both guard bands applied
    ///
    /// Counts shorter than [`GUARD_TICKS`] are lifted to the guard, the
    /// shortest segment the interrupt can time. Counts above
    /// [`MAX_ENCODED_TICKS`] saturate.
    pub const fn encode(ticks: u32) -> Self {
        let ticks = if ticks < GUARD_TICKS as u32 {
            GUARD_TICKS as u32
        } else if ticks > MAX_ENCODED_TICKS {
            MAX_ENCODED_TICKS
        } else {
            ticks
        };

        let mut overflow_count = (ticks >> 8) as u8;
        let mut remainder = (ticks & 0xFF) as u8;
        let mut half_overflow = false;

        if remainder < GUARD_TICKS {
            // ticks >= GUARD_TICKS here, so overflow_count >= 1
            half_overflow = true;
            remainder += HALF_CYCLE_TICKS;
        } else if remainder as u32 > FULL_CYCLE_TICKS - GUARD_TICKS as u32 {
            overflow_count += 1;
            half_overflow = true;
            remainder -= HALF_CYCLE_TICKS;
        }

        Self {
            overflow_count,
            half_overflow,
            remainder,
        }
    }

    /// Total duration in ticks (undoes the half-cycle borrow)
    pub const fn ticks(&self) -> u32 {
        let total = self.overflow_count as u32 * FULL_CYCLE_TICKS + self.remainder as u32;
        if self.half_overflow {
            total - HALF_CYCLE_TICKS as u32
        } else {
            total
        }
    }

    /// Remaining overflow steps
    pub const fn overflow_count(&self) -> u8 {
        self.overflow_count
    }

    /// Whether one overflow step is a half cycle
    pub const fn half_overflow(&self) -> bool {
        self.half_overflow
    }

    /// Remainder ticks still to be added
    pub const fn remainder(&self) -> u8 {
        self.remainder
    }

    /// Nothing left to generate
    pub const fn is_exhausted(&self) -> bool {
        self.remainder == 0 && self.overflow_count == 0
    }

    /// Consume one tail step
    ///
    /// Returns the delta to add to the compare register, or `None` when the
    /// timer must run a full free cycle.
    pub fn advance(&mut self) -> Option<u8> {
        if self.remainder != 0 {
            let delta = self.remainder;
            self.remainder = 0;
            Some(delta)
        } else if self.overflow_count != 0 {
            self.overflow_count -= 1;
            if self.half_overflow {
                self.half_overflow = false;
                Some(HALF_CYCLE_TICKS)
            } else {
                None
            }
        } else {
            None
        }
    }
}

/// Frame geometry derived from a generator configuration and a tick clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    clock: TickClock,
    channel_count: u8,
    header_us: u16,
    header_ticks: u32,
    period_ticks: u32,
}

impl FrameLayout {
    /// Build the layout from a (normalized) configuration
    pub fn new(clock: TickClock, config: &GeneratorConfig) -> Self {
        let config = config.normalized();
        Self {
            clock,
            channel_count: config.channel_count,
            header_us: config.header_us,
            header_ticks: clock.header_ticks(u32::from(config.header_us)),
            period_ticks: clock.us_to_ticks(u32::from(config.frame_period_us)),
        }
    }

    /// Tick clock in use
    pub const fn clock(&self) -> TickClock {
        self.clock
    }

    /// Number of channel slots (excluding the synchro slot)
    pub const fn channel_count(&self) -> u8 {
        self.channel_count
    }

    /// Header duration in ticks
    pub const fn header_ticks(&self) -> u32 {
        self.header_ticks
    }

    /// Frame period in ticks
    pub const fn period_ticks(&self) -> u32 {
        self.period_ticks
    }

    /// Tail ticks for a channel of `width_us` (header excluded)
    ///
    /// Widths shorter than the header clamp to 0 ticks.
    pub const fn channel_ticks(&self, width_us: u16) -> u32 {
        let tail_us = (width_us as u32).saturating_sub(self.header_us as u32);
        self.clock.us_to_ticks(tail_us)
    }

    /// Encoded tail of a channel of `width_us`
    pub const fn encode_channel(&self, width_us: u16) -> EncodedWidth {
        EncodedWidth::encode(self.channel_ticks(width_us))
    }

    /// Tail ticks of the synchro slot that keep the frame period constant
    ///
    /// `channels` holds the pending encodings of channels `1..=N`. Returns
    /// `None` when the channels do not fit inside the frame period.
    pub fn filler_ticks(&self, channels: &[EncodedWidth]) -> Option<u32> {
        let count = channels.len().min(MAX_CHANNELS as usize);
        let headers = self.header_ticks * (count as u32 + 1);
        let widths: u32 = channels.iter().take(count).map(EncodedWidth::ticks).sum();
        self.period_ticks.checked_sub(headers)?.checked_sub(widths)
    }
}
