//! Compare-match driven PPM frame state machine
//!
//! Each compare interrupt either starts a channel (header) or consumes one
//! step of the channel tail. The pin is toggled by the timer hardware, so
//! edge timing does not depend on interrupt latency; the handler only has to
//! re-arm the comparator before the next match.
//!
//! ```text
//! Header: add header ticks, move to the next slot, load its encoding
//!         (slot 0 = synchro: copy next -> current, signal synchro)
//! Tail:   add remainder, or half cycle, or nothing (free 256-tick cycle)
//!         exhausted -> re-enable toggle, back to Header
//!         otherwise -> disable toggle
//! ```

use rc_ppm_core::{EncodedWidth, FrameLayout, GeneratorConfig, Polarity, TickClock};

use super::table::{ChannelTable, SLOT_COUNT};
use super::writer::PpmFrameWriter;
use crate::libraries::error::PpmError;
use crate::platform::traits::CompareTimer;
use crate::{log_debug, log_error, log_info, log_trace};

/// Position inside the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramePhase {
    /// Next match starts a slot
    Header,
    /// Next match continues the slot tail
    Tail,
}

/// Active slot and phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameCursor {
    /// Slot being generated (0 = synchro)
    pub active_index: u8,
    /// Phase of the slot
    pub phase: FramePhase,
}

/// Interrupt-side PPM generator
///
/// Owns the compare timer. Call [`PpmFrameEngine::on_compare_match`] from the
/// compare interrupt; change widths through the [`PpmFrameWriter`] returned
/// by [`PpmFrameEngine::initialize`].
pub struct PpmFrameEngine<'a, T: CompareTimer> {
    table: &'a ChannelTable,
    timer: T,
    layout: FrameLayout,
    polarity: Polarity,
    header_step: Option<u8>,
    current: [EncodedWidth; SLOT_COUNT],
    working: EncodedWidth,
    cursor: FrameCursor,
}

impl<'a, T: CompareTimer> PpmFrameEngine<'a, T> {
    /// Claim `table`, set every channel to neutral and start the timer
    ///
    /// Channel count and frame period are clamped into range. The first
    /// compare match starts the synchro slot.
    ///
    /// # Errors
    ///
    /// Returns `PpmError::ResourceExhausted` if `table` already belongs to a
    /// running engine. The timer is dropped unconfigured.
    pub fn initialize(
        table: &'a ChannelTable,
        mut timer: T,
        clock: TickClock,
        config: GeneratorConfig,
    ) -> Result<(Self, PpmFrameWriter<'a>), PpmError> {
        if let Err(e) = table.claim() {
            log_error!("PPM channel table already claimed");
            return Err(e);
        }

        let normalized = config.normalized();
        if normalized.channel_count != config.channel_count {
            log_debug!(
                "PPM channel count {} clamped to {}",
                config.channel_count,
                normalized.channel_count
            );
        }
        if normalized.frame_period_us != config.frame_period_us {
            log_debug!(
                "PPM frame period {} us clamped to {} us",
                config.frame_period_us,
                normalized.frame_period_us
            );
        }

        let layout = FrameLayout::new(clock, &normalized);
        let writer = PpmFrameWriter::new(table, layout, normalized.neutral_us);
        let header_step = if clock.has_programmable_header() {
            Some(u8::try_from(layout.header_ticks()).unwrap_or(u8::MAX))
        } else {
            None
        };

        let polarity = normalized.polarity;
        timer.set_pin_level(polarity.idle_level());
        timer.set_normal_mode();
        if polarity == Polarity::Positive {
            timer.force_compare_event();
        }
        timer.set_auto_toggle_on_compare(true);
        timer.enable_compare_interrupt();

        log_info!(
            "PPM generator started: {} channels, {} us period",
            normalized.channel_count,
            normalized.frame_period_us
        );

        let engine = Self {
            table,
            timer,
            layout,
            polarity,
            header_step,
            current: [EncodedWidth::ZERO; SLOT_COUNT],
            working: EncodedWidth::ZERO,
            cursor: FrameCursor {
                // Wraps to the synchro slot on the first header
                active_index: layout.channel_count(),
                phase: FramePhase::Header,
            },
        };
        Ok((engine, writer))
    }

    /// Compare-match interrupt handler
    pub fn on_compare_match(&mut self) {
        match self.cursor.phase {
            FramePhase::Header => {
                if let Some(step) = self.header_step {
                    self.timer.add_to_compare_register(step);
                }
                self.cursor.active_index += 1;
                if self.cursor.active_index > self.layout.channel_count() {
                    self.cursor.active_index = 0;
                    self.table.load_next(&mut self.current);
                    log_trace!("PPM frame boundary");
                }
                self.working = self.current[usize::from(self.cursor.active_index)];
                self.cursor.phase = FramePhase::Tail;
            }
            FramePhase::Tail => {
                if let Some(delta) = self.working.advance() {
                    self.timer.add_to_compare_register(delta);
                }
                if self.working.is_exhausted() {
                    self.timer.set_auto_toggle_on_compare(true);
                    self.cursor.phase = FramePhase::Header;
                } else {
                    self.timer.set_auto_toggle_on_compare(false);
                }
            }
        }
    }

    /// Current slot and phase
    pub fn cursor(&self) -> FrameCursor {
        self.cursor
    }

    /// Frame geometry
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Modulation polarity
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Encodings of the frame being generated
    pub fn current_slots(&self) -> &[EncodedWidth; SLOT_COUNT] {
        &self.current
    }

    /// Compare timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Compare timer (mutable)
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Stop generation and give the timer back
    ///
    /// Disables the compare interrupt, parks the pin at its idle level and
    /// releases the table for another engine.
    pub fn release(mut self, writer: PpmFrameWriter<'a>) -> T {
        drop(writer);
        self.timer.disable_compare_interrupt();
        self.timer.set_auto_toggle_on_compare(false);
        self.timer.set_pin_level(self.polarity.idle_level());
        self.table.release();
        log_info!("PPM generator stopped");
        self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockCompareTimer;
    use rc_ppm_core::SynchroClients;

    fn start(
        table: &ChannelTable,
        config: GeneratorConfig,
    ) -> (PpmFrameEngine<'_, MockCompareTimer>, PpmFrameWriter<'_>) {
        PpmFrameEngine::initialize(table, MockCompareTimer::new(), TickClock::new(4), config)
            .unwrap()
    }

    /// Run matches until a header starts; returns the slot and its start tick
    fn next_slot_start(engine: &mut PpmFrameEngine<'_, MockCompareTimer>) -> (u8, u64) {
        for _ in 0..1000 {
            let m = engine.timer_mut().advance_to_next_match();
            let was_header = engine.cursor().phase == FramePhase::Header;
            engine.on_compare_match();
            if was_header {
                return (engine.cursor().active_index, m.at_ticks);
            }
        }
        panic!("no header within 1000 matches");
    }

    /// Run until slot `index` starts; returns its start tick
    fn run_to_slot(engine: &mut PpmFrameEngine<'_, MockCompareTimer>, index: u8) -> u64 {
        for _ in 0..20 {
            let (slot, at) = next_slot_start(engine);
            if slot == index {
                return at;
            }
        }
        panic!("slot {} never started", index);
    }

    #[test]
    fn test_initialize_positive() {
        let table = ChannelTable::new();
        let (engine, _writer) = start(&table, GeneratorConfig::new(Polarity::Positive, 4));

        let timer = engine.timer();
        assert!(timer.is_normal_mode());
        assert!(timer.is_interrupt_enabled());
        assert!(timer.is_auto_toggle());
        assert_eq!(timer.forced_events(), 1);
        assert!(!timer.read_pin_level());
        assert!(table.is_claimed());
        assert_eq!(
            engine.cursor(),
            FrameCursor {
                active_index: 4,
                phase: FramePhase::Header
            }
        );
    }

    #[test]
    fn test_initialize_negative() {
        let table = ChannelTable::new();
        let (engine, _writer) = start(&table, GeneratorConfig::new(Polarity::Negative, 4));
        assert_eq!(engine.timer().forced_events(), 0);
        assert!(engine.timer().read_pin_level());
    }

    #[test]
    fn test_initialize_clamps_channel_count() {
        let table = ChannelTable::new();
        let (engine, _writer) = start(&table, GeneratorConfig::new(Polarity::Positive, 12));
        assert_eq!(engine.layout().channel_count(), 8);
    }

    #[test]
    fn test_second_engine_rejected() {
        let table = ChannelTable::new();
        let (_engine, _writer) = start(&table, GeneratorConfig::default());
        let second = PpmFrameEngine::initialize(
            &table,
            MockCompareTimer::new(),
            TickClock::new(4),
            GeneratorConfig::default(),
        );
        assert!(matches!(second, Err(PpmError::ResourceExhausted)));
    }

    #[test]
    fn test_release_frees_table() {
        let table = ChannelTable::new();
        let (engine, writer) = start(&table, GeneratorConfig::new(Polarity::Negative, 2));
        let timer = engine.release(writer);
        assert!(!timer.is_interrupt_enabled());
        assert!(timer.read_pin_level());
        assert!(!table.is_claimed());

        assert!(PpmFrameEngine::initialize(
            &table,
            timer,
            TickClock::new(4),
            GeneratorConfig::default()
        )
        .is_ok());
    }

    #[test]
    fn test_first_header_loads_synchro_slot() {
        let table = ChannelTable::new();
        let (mut engine, writer) = start(&table, GeneratorConfig::new(Polarity::Positive, 4));

        engine.timer_mut().advance_to_next_match();
        engine.on_compare_match();
        assert_eq!(
            engine.cursor(),
            FrameCursor {
                active_index: 0,
                phase: FramePhase::Tail
            }
        );
        assert_eq!(engine.current_slots()[0], writer.filler());
        assert!(writer.is_synchro(SynchroClients::DEFAULT_CLIENT));
    }

    #[test]
    fn test_width_change_waits_for_frame_boundary() {
        let table = ChannelTable::new();
        let (mut engine, mut writer) = start(&table, GeneratorConfig::new(Polarity::Positive, 4));
        run_to_slot(&mut engine, 2);

        writer.set_channel_width(3, 2000);
        // The running frame keeps the old width
        assert_eq!(engine.current_slots()[3].ticks(), 300);
        run_to_slot(&mut engine, 3);
        assert_eq!(engine.current_slots()[3].ticks(), 300);

        // The synchro slot opens a new frame and picks the change up
        run_to_slot(&mut engine, 0);
        assert_eq!(engine.current_slots()[3].ticks(), 425);
    }

    #[test]
    fn test_channel_slot_duration() {
        let table = ChannelTable::new();
        let (mut engine, mut writer) = start(&table, GeneratorConfig::new(Polarity::Positive, 2));
        writer.set_channel_width(1, 1100);

        let slot_1 = run_to_slot(&mut engine, 1);
        let slot_2 = run_to_slot(&mut engine, 2);
        // Header plus tail: 1100 us at 4 us per tick
        assert_eq!(slot_2 - slot_1, 275);
    }

    #[test]
    fn test_one_us_tick_header_is_full_cycle() {
        let table = ChannelTable::new();
        let (mut engine, _writer) = PpmFrameEngine::initialize(
            &table,
            MockCompareTimer::new(),
            TickClock::new(1),
            GeneratorConfig::new(Polarity::Positive, 1),
        )
        .unwrap();

        let frame_start = run_to_slot(&mut engine, 0);
        let channel_start = run_to_slot(&mut engine, 1);
        // Synchro slot: one free cycle of header, then the filler
        assert_eq!(channel_start - frame_start, 256 + 18_288);
        let next_frame = run_to_slot(&mut engine, 0);
        assert_eq!(next_frame - frame_start, 20_000);
    }
}
