//! Microsecond to timer tick conversion
//!
//! PPM timing is produced by an 8-bit free-running timer whose counter
//! advances once per "tick". [`TickClock`] converts between microseconds and
//! ticks for a given prescaler configuration.
//!
//! # Oscillator Correction
//!
//! Cores running from a 16.5 MHz internal oscillator (Digispark) report
//! 16 cycles per microsecond to integer arithmetic, which makes every tick
//! about 3% shorter than nominal. The calibrated variant compensates with
//! `us + us / 32` before dividing.

/// Number of ticks in one full cycle of the 8-bit timer
pub const FULL_CYCLE_TICKS: u32 = 256;

/// Largest delta that can be added to an 8-bit compare register in one step
pub const MAX_COMPARE_STEP: u32 = FULL_CYCLE_TICKS - 1;

/// Stateless microsecond/tick converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    /// Duration of one timer tick in microseconds (>= 1)
    tick_us: u32,
    /// Apply the 16.5 MHz oscillator correction
    calibrated: bool,
}

impl TickClock {
    /// 16 MHz core, prescaler 64: one tick every 4 µs
    pub const AVR_16MHZ_PRESCALE_64: Self = Self::new(4);

    /// Digispark 16.5 MHz core, prescaler 64, with oscillator correction
    pub const DIGISPARK_16_5MHZ: Self = Self::calibrated(4);

    /// Create a clock with the given tick duration (clamped to at least 1 µs)
    pub const fn new(tick_us: u32) -> Self {
        Self {
            tick_us: if tick_us == 0 { 1 } else { tick_us },
            calibrated: false,
        }
    }

    /// Create a clock that applies the `us + us / 32` oscillator correction
    pub const fn calibrated(tick_us: u32) -> Self {
        Self {
            tick_us: if tick_us == 0 { 1 } else { tick_us },
            calibrated: true,
        }
    }

    /// Derive the tick duration from the CPU frequency and timer prescaler
    ///
    /// Cycles per microsecond use integer division, as the timer hardware
    /// configuration does. A 16.5 MHz core gets the oscillator correction.
    ///
    /// # Arguments
    ///
    /// * `cpu_hz` - CPU clock frequency in Hz
    /// * `prescaler` - Timer prescaler (CPU cycles per timer tick)
    pub const fn from_prescaler(cpu_hz: u32, prescaler: u32) -> Self {
        let cycles_per_us = cpu_hz / 1_000_000;
        let tick_us = if cycles_per_us == 0 {
            prescaler
        } else {
            prescaler / cycles_per_us
        };
        if cpu_hz == 16_500_000 {
            Self::calibrated(tick_us)
        } else {
            Self::new(tick_us)
        }
    }

    /// Tick duration in microseconds
    pub const fn tick_us(&self) -> u32 {
        self.tick_us
    }

    /// Whether the oscillator correction is applied
    pub const fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Convert a duration to ticks, rounded to the nearest tick
    pub const fn us_to_ticks(&self, us: u32) -> u32 {
        let rounded = us.saturating_add(self.tick_us / 2);
        let corrected = if self.calibrated {
            rounded.saturating_add(rounded >> 5)
        } else {
            rounded
        };
        corrected / self.tick_us
    }

    /// Convert ticks back to microseconds (inverse of [`Self::us_to_ticks`])
    pub const fn ticks_to_us(&self, ticks: u32) -> u32 {
        let raw = ticks.saturating_mul(self.tick_us);
        if self.calibrated {
            // us * 33/32 = raw  =>  us = raw * 32/33
            ((raw as u64 * 32 + 16) / 33) as u32
        } else {
            raw
        }
    }

    /// Ticks spent in one channel header of `header_us`
    ///
    /// With a 1 µs tick the header cannot be expressed as an 8-bit compare
    /// step; the generator lets the timer run one free cycle instead, so the
    /// header lasts exactly [`FULL_CYCLE_TICKS`].
    pub const fn header_ticks(&self, header_us: u32) -> u32 {
        if self.has_programmable_header() {
            let ticks = self.us_to_ticks(header_us);
            if ticks > MAX_COMPARE_STEP {
                MAX_COMPARE_STEP
            } else {
                ticks
            }
        } else {
            FULL_CYCLE_TICKS
        }
    }

    /// Whether the header is programmed into the compare register
    pub const fn has_programmable_header(&self) -> bool {
        self.tick_us > 1
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::AVR_16MHZ_PRESCALE_64
    }
}
