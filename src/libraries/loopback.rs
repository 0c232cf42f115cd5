//! Generator to reader loopback tests
//!
//! The mock compare timer's pin transitions are turned into falling-edge
//! timestamps and fed back into a decoder, so both engines are checked
//! against each other.

use rc_ppm_core::{GeneratorConfig, Polarity, SynchroClients, TickClock};

use super::ppm_gen::{ChannelTable, PpmFrameEngine, PpmFrameWriter};
use super::ppm_reader::{EdgeDispatcher, PpmFrameDecoder};
use crate::platform::mock::{MockCompareTimer, MockEdgeCapture};
use crate::platform::traits::InputLine;

const LINE: InputLine = 0;

/// Client the rig uses to count generated frames
const RIG_CLIENT: SynchroClients = SynchroClients::CLIENT_0;

struct Rig<'a> {
    engine: PpmFrameEngine<'a, MockCompareTimer>,
    writer: PpmFrameWriter<'a>,
    dispatcher: EdgeDispatcher<'a, MockEdgeCapture, 2>,
}

impl<'a> Rig<'a> {
    fn new(table: &'a ChannelTable, decoder: &'a PpmFrameDecoder, config: GeneratorConfig) -> Self {
        let (engine, writer) =
            PpmFrameEngine::initialize(table, MockCompareTimer::new(), TickClock::new(4), config)
                .unwrap();
        let mut dispatcher = EdgeDispatcher::new(MockEdgeCapture::new());
        dispatcher.attach(decoder, LINE).unwrap();
        Self {
            engine,
            writer,
            dispatcher,
        }
    }

    /// Run until `frames` more frames have started
    fn run_frames(&mut self, frames: usize) {
        let tick_us = u64::from(self.engine.layout().clock().tick_us());
        let mut started = 0;
        for _ in 0..200_000 {
            let m = self.engine.timer_mut().advance_to_next_match();
            self.engine.on_compare_match();
            if m.toggled && !m.pin_high {
                let timestamp = ((m.at_ticks * tick_us) & 0xFFFF) as u16;
                self.dispatcher.on_falling_edge(LINE, timestamp);
            }
            if !self.writer.poll_synchro(RIG_CLIENT).is_empty() {
                started += 1;
                if started == frames {
                    return;
                }
            }
        }
        panic!("generator stalled");
    }
}

fn assert_within_tick(decoded: u16, requested: u16) {
    assert!(
        decoded.abs_diff(requested) <= 4,
        "decoded {} for requested {}",
        decoded,
        requested
    );
}

#[test]
fn test_four_neutral_channels() {
    let table = ChannelTable::new();
    let decoder = PpmFrameDecoder::default();
    let mut rig = Rig::new(&table, &decoder, GeneratorConfig::new(Polarity::Positive, 4));
    rig.run_frames(4);

    assert_eq!(decoder.detected_channel_nb(), 4);
    for ch in 1..=4 {
        assert_eq!(decoder.width_us(ch), 1500);
    }
    assert_eq!(decoder.ppm_period_us(), 20_000);

    // Synchro gap: filler plus its header
    let layout = rig.writer.layout();
    let gap_ticks = rig.writer.filler().ticks() + layout.header_ticks();
    assert_eq!(gap_ticks * 4, 20_000 - 4 * 1500);
}

#[test]
fn test_frame_sum_matches_period() {
    // Second set: 1300 and 1299 us leave a tail remainder above 240 ticks
    let width_sets: [[u16; 8]; 2] = [
        [600, 2400, 1000, 2000, 1500, 1234, 1777, 900],
        [1300, 1299, 2300, 1300, 1299, 2300, 1300, 1299],
    ];
    for widths in width_sets {
        for channel_count in 1..=8u8 {
            for period in [10_000u16, 15_000, 20_000, 22_500, 40_000] {
                let used: u32 = widths[..usize::from(channel_count)]
                    .iter()
                    .map(|&w| u32::from(w))
                    .sum();
                // The reader needs a synchro gap of at least 3 ms
                if used + 3000 > u32::from(period) {
                    continue;
                }

                let table = ChannelTable::new();
                let decoder = PpmFrameDecoder::default();
                let config = GeneratorConfig::new(Polarity::Positive, channel_count)
                    .with_frame_period_us(period);
                let mut rig = Rig::new(&table, &decoder, config);
                for ch in 1..=channel_count {
                    rig.writer.set_channel_width(ch, widths[usize::from(ch - 1)]);
                }
                rig.run_frames(4);

                assert_eq!(decoder.detected_channel_nb(), channel_count);
                assert_eq!(decoder.ppm_period_us(), period);
                for ch in 1..=channel_count {
                    assert_within_tick(decoder.width_us(ch), widths[usize::from(ch - 1)]);
                }
            }
        }
    }
}

#[test]
fn test_upper_guard_widths_round_trip() {
    let table = ChannelTable::new();
    let decoder = PpmFrameDecoder::default();
    let mut rig = Rig::new(&table, &decoder, GeneratorConfig::new(Polarity::Positive, 3));
    for (ch, w) in [(1, 1300), (2, 1299), (3, 2300)] {
        rig.writer.set_channel_width(ch, w);
    }
    assert!(rig.writer.pending(1).unwrap().half_overflow());
    rig.run_frames(4);

    assert_eq!(decoder.detected_channel_nb(), 3);
    assert_eq!(decoder.width_us(1), 1300);
    assert_eq!(decoder.width_us(2), 1300);
    assert_eq!(decoder.width_us(3), 2300);
    assert_eq!(decoder.ppm_period_us(), 20_000);
}

#[test]
fn test_negative_polarity_round_trip() {
    let table = ChannelTable::new();
    let decoder = PpmFrameDecoder::default();
    let config = GeneratorConfig::new(Polarity::Negative, 6).with_frame_period_us(22_500);
    let mut rig = Rig::new(&table, &decoder, config);
    let requested = [1000u16, 1100, 1200, 1800, 1900, 2000];
    for (ch, &w) in (1..).zip(requested.iter()) {
        rig.writer.set_channel_width(ch, w);
    }
    rig.run_frames(4);

    assert_eq!(decoder.detected_channel_nb(), 6);
    for (ch, &w) in (1..).zip(requested.iter()) {
        assert_within_tick(decoder.width_us(ch), w);
    }
    assert_eq!(decoder.ppm_period_us(), 22_500);
}

#[test]
fn test_width_change_keeps_period() {
    let table = ChannelTable::new();
    let decoder = PpmFrameDecoder::default();
    let mut rig = Rig::new(&table, &decoder, GeneratorConfig::new(Polarity::Positive, 4));
    rig.run_frames(3);
    assert_eq!(decoder.width_us(2), 1500);

    rig.writer.set_channel_width(2, 2100);
    rig.writer.set_channel_width(2, 2100);
    rig.run_frames(3);
    assert_eq!(decoder.width_us(2), 2100);
    assert_eq!(decoder.width_us(1), 1500);
    assert_eq!(decoder.ppm_period_us(), 20_000);
}

#[test]
fn test_invalid_channel_leaves_frame_untouched() {
    let table = ChannelTable::new();
    let decoder = PpmFrameDecoder::default();
    let mut rig = Rig::new(&table, &decoder, GeneratorConfig::new(Polarity::Positive, 4));
    rig.writer.set_channel_width(0, 900);
    rig.writer.set_channel_width(5, 900);
    rig.run_frames(4);

    assert_eq!(decoder.detected_channel_nb(), 4);
    for ch in 1..=4 {
        assert_eq!(decoder.width_us(ch), 1500);
    }
}

#[test]
fn test_synchro_fan_out() {
    let table = ChannelTable::new();
    let decoder = PpmFrameDecoder::default();
    let mut rig = Rig::new(&table, &decoder, GeneratorConfig::new(Polarity::Positive, 2));
    let a = SynchroClients::CLIENT_1 | SynchroClients::CLIENT_2;
    let b = SynchroClients::DEFAULT_CLIENT;
    // Drop indications raised before the test starts
    rig.writer.poll_synchro(SynchroClients::all());
    decoder.poll_synchro(SynchroClients::all());

    rig.run_frames(3);
    assert_eq!(rig.writer.poll_synchro(a), a);
    assert_eq!(rig.writer.poll_synchro(b), b);
    assert!(rig.writer.poll_synchro(a).is_empty());
    assert!(rig.writer.poll_synchro(b).is_empty());

    assert_eq!(decoder.poll_synchro(a), a);
    assert_eq!(decoder.poll_synchro(b), b);
    assert!(decoder.poll_synchro(a).is_empty());
    assert!(decoder.poll_synchro(b).is_empty());
}
