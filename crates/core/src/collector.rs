//! PPM frame collection from falling-edge timestamps
//!
//! Channel durations are the intervals between consecutive falling edges
//! (the same durations are found between rising edges, so polarity does not
//! matter). An interval of at least the synchro threshold closes the frame.
//!
//! ```text
//! Positive PPM
//!        .-----.                 .-----.         .-----.                  .-----.
//!     ---'     '-----------------'     '---------'     '------//----------'     '---
//!              <----------------------><--------------><-------//--------->
//!                     Channel#1           Channel#2          Synchro
//! ```
//!
//! Timestamps are 16-bit microsecond counters; intervals are computed modulo
//! 65536, so a wrap between two edges is harmless.

use crate::config::ReaderConfig;

/// Number of channel widths one frame can carry
pub const COLLECTOR_CAPACITY: usize = 9;

/// Write cursor value meaning "no frame in progress"
const IDLE_CURSOR: u8 = COLLECTOR_CAPACITY as u8 + 1;

/// Classification of one falling edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// Synchro gap detected, frame committed
    Synchro,
    /// Channel width stored
    Pulse,
    /// Channel width dropped (capacity exceeded or no frame in progress)
    Dropped,
}

/// Per-input frame collection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCollector {
    config: ReaderConfig,
    widths: [u16; COLLECTOR_CAPACITY],
    write_index: u8,
    committed_count: u8,
    previous_edge_us: u16,
    last_synchro_us: Option<u16>,
    period_us: u16,
    frame_seen: bool,
}

impl FrameCollector {
    /// Idle collector; every channel reads as neutral
    pub const fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            widths: [config.neutral_us; COLLECTOR_CAPACITY],
            write_index: IDLE_CURSOR,
            committed_count: 0,
            previous_edge_us: 0,
            last_synchro_us: None,
            period_us: 0,
            frame_seen: false,
        }
    }

    /// Return to the freshly attached state
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Mark the frame in progress as invalid
    ///
    /// The next synchro commits the sentinel, so a stale frame is never
    /// reported as complete.
    pub fn invalidate(&mut self) {
        self.write_index = IDLE_CURSOR;
        self.last_synchro_us = None;
    }

    /// Re-prime the previous edge time so the first interval is meaningful
    pub fn prime(&mut self, now_us: u16) {
        self.previous_edge_us = now_us;
    }

    /// Process one falling edge
    pub fn on_falling_edge(&mut self, timestamp_us: u16) -> EdgeOutcome {
        let interval = timestamp_us.wrapping_sub(self.previous_edge_us);
        self.previous_edge_us = timestamp_us;

        if interval >= self.config.synchro_threshold_us {
            self.committed_count = self.write_index;
            self.write_index = 0;
            if usize::from(self.committed_count) <= COLLECTOR_CAPACITY {
                self.frame_seen = true;
            }
            if let Some(last) = self.last_synchro_us {
                self.period_us = timestamp_us.wrapping_sub(last);
            }
            self.last_synchro_us = Some(timestamp_us);
            EdgeOutcome::Synchro
        } else if usize::from(self.write_index) < COLLECTOR_CAPACITY {
            self.widths[usize::from(self.write_index)] = interval;
            self.write_index += 1;
            EdgeOutcome::Pulse
        } else {
            EdgeOutcome::Dropped
        }
    }

    /// Channels in the last committed frame (0 before the first full frame)
    pub const fn detected_channel_count(&self) -> u8 {
        if self.committed_count as usize > COLLECTOR_CAPACITY {
            0
        } else {
            self.committed_count
        }
    }

    /// Width of `channel` (1-based) in µs, or 0 if not in the last frame
    ///
    /// Until the first complete frame every channel up to the capacity reads
    /// as neutral.
    pub fn width_us(&self, channel: u8) -> u16 {
        let readable = if self.frame_seen {
            self.detected_channel_count()
        } else {
            COLLECTOR_CAPACITY as u8
        };
        if channel >= 1 && channel <= readable {
            self.widths[usize::from(channel - 1)]
        } else {
            0
        }
    }

    /// Time between the last two synchro edges in µs (0 until measured)
    pub const fn period_us(&self) -> u16 {
        self.period_us
    }

    /// Reader parameters
    pub const fn config(&self) -> ReaderConfig {
        self.config
    }
}

impl Default for FrameCollector {
    fn default() -> Self {
        Self::new(ReaderConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a frame (channel widths then synchro) starting at `start`
    fn feed_frame(
        collector: &mut FrameCollector,
        start: u16,
        widths: &[u16],
        synchro: u16,
    ) -> u16 {
        let mut t = start;
        for &w in widths {
            t = t.wrapping_add(w);
            collector.on_falling_edge(t);
        }
        t = t.wrapping_add(synchro);
        assert_eq!(collector.on_falling_edge(t), EdgeOutcome::Synchro);
        t
    }

    #[test]
    fn test_nothing_detected_before_first_frame() {
        let mut collector = FrameCollector::default();
        assert_eq!(collector.detected_channel_count(), 0);

        // First synchro commits the idle sentinel
        collector.on_falling_edge(5000);
        assert_eq!(collector.detected_channel_count(), 0);
    }

    #[test]
    fn test_neutral_until_first_frame() {
        let mut collector = FrameCollector::default();
        assert_eq!(collector.width_us(1), 1500);
        assert_eq!(collector.width_us(9), 1500);
        assert_eq!(collector.width_us(0), 0);
        assert_eq!(collector.width_us(10), 0);

        // The sentinel commit is not a frame
        let t = feed_frame(&mut collector, 0, &[], 5000);
        assert_eq!(collector.width_us(3), 1500);

        feed_frame(&mut collector, t, &[1000, 1200], 17_800);
        assert_eq!(collector.width_us(1), 1000);
        assert_eq!(collector.width_us(3), 0);
    }

    #[test]
    fn test_collects_frame() {
        let mut collector = FrameCollector::default();
        let t = feed_frame(&mut collector, 0, &[], 5000);
        feed_frame(&mut collector, t, &[1000, 1500, 2000, 1200], 14_300);

        assert_eq!(collector.detected_channel_count(), 4);
        assert_eq!(collector.width_us(1), 1000);
        assert_eq!(collector.width_us(2), 1500);
        assert_eq!(collector.width_us(3), 2000);
        assert_eq!(collector.width_us(4), 1200);
        assert_eq!(collector.width_us(0), 0);
        assert_eq!(collector.width_us(5), 0);
    }

    #[test]
    fn test_timestamp_wraparound() {
        let mut collector = FrameCollector::default();
        let t = feed_frame(&mut collector, 60_000, &[], 4000);
        feed_frame(&mut collector, t, &[1500, 1500, 1500], 15_500);
        assert_eq!(collector.detected_channel_count(), 3);
        assert_eq!(collector.width_us(2), 1500);
    }

    #[test]
    fn test_capacity_overflow_truncates() {
        let mut collector = FrameCollector::default();
        let t = feed_frame(&mut collector, 0, &[], 5000);
        let widths = [1000u16; 11];
        let mut now = t;
        for (i, &w) in widths.iter().enumerate() {
            now = now.wrapping_add(w);
            let outcome = collector.on_falling_edge(now);
            if i < COLLECTOR_CAPACITY {
                assert_eq!(outcome, EdgeOutcome::Pulse);
            } else {
                assert_eq!(outcome, EdgeOutcome::Dropped);
            }
        }
        collector.on_falling_edge(now.wrapping_add(4000));
        assert_eq!(collector.detected_channel_count(), COLLECTOR_CAPACITY as u8);
    }

    #[test]
    fn test_period_estimate() {
        let mut collector = FrameCollector::default();
        let t = feed_frame(&mut collector, 0, &[], 5000);
        assert_eq!(collector.period_us(), 0);
        let t = feed_frame(&mut collector, t, &[1500, 1500], 17_000);
        assert_eq!(collector.period_us(), 20_000);
        feed_frame(&mut collector, t, &[1000, 1000], 20_000);
        assert_eq!(collector.period_us(), 22_000);
    }

    #[test]
    fn test_invalidate_discards_frame_in_progress() {
        let mut collector = FrameCollector::default();
        let t = feed_frame(&mut collector, 0, &[], 5000);
        let t = feed_frame(&mut collector, t, &[1500, 1500], 17_000);
        assert_eq!(collector.detected_channel_count(), 2);

        collector.invalidate();
        collector.prime(t.wrapping_add(100));
        collector.on_falling_edge(t.wrapping_add(4000));
        assert_eq!(collector.detected_channel_count(), 0);
    }

    #[test]
    fn test_prime_prevents_spurious_interval() {
        let mut collector = FrameCollector::default();
        collector.prime(10_000);
        assert_eq!(collector.on_falling_edge(11_000), EdgeOutcome::Dropped);
        // Without priming, 11000 - 0 would have been taken as a synchro
        let mut fresh = FrameCollector::default();
        assert_eq!(fresh.on_falling_edge(11_000), EdgeOutcome::Synchro);
    }

    #[test]
    fn test_reset_restores_neutral() {
        let mut collector = FrameCollector::default();
        let t = feed_frame(&mut collector, 0, &[], 5000);
        feed_frame(&mut collector, t, &[1000], 19_000);
        collector.reset();
        assert_eq!(collector.detected_channel_count(), 0);
        assert_eq!(collector.period_us(), 0);
        assert_eq!(collector.width_us(1), 1500);
    }
}
