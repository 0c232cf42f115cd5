//! Mock compare-match timer for testing

use crate::platform::traits::CompareTimer;

/// One simulated compare match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareMatch {
    /// Absolute time of the match in ticks since creation
    pub at_ticks: u64,
    /// Pin level after the match
    pub pin_high: bool,
    /// Whether the match toggled the pin
    pub toggled: bool,
}

/// Mock 8-bit compare timer
///
/// Models a free-running counter that wraps every 256 ticks. The next match
/// fires when the counter reaches the compare register again; leaving the
/// register unchanged after a match therefore yields a full 256-tick cycle.
/// Matches are produced on demand with [`MockCompareTimer::advance_to_next_match`].
#[derive(Debug, Default)]
pub struct MockCompareTimer {
    now_ticks: u64,
    compare: u8,
    compare_at_last_match: u8,
    normal_mode: bool,
    interrupt_enabled: bool,
    auto_toggle: bool,
    pin_high: bool,
    forced_events: u32,
}

impl MockCompareTimer {
    /// Create a stopped timer with the pin low
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks until the next compare match
    pub fn ticks_to_next_match(&self) -> u32 {
        match self.compare.wrapping_sub(self.compare_at_last_match) {
            0 => 256,
            delta => u32::from(delta),
        }
    }

    /// Run the counter up to the next compare match
    ///
    /// Applies the hardware pin toggle if enabled. The caller is expected to
    /// invoke the compare interrupt handler afterwards.
    pub fn advance_to_next_match(&mut self) -> CompareMatch {
        self.now_ticks += u64::from(self.ticks_to_next_match());
        self.compare_at_last_match = self.compare;
        let toggled = self.auto_toggle;
        if toggled {
            self.pin_high = !self.pin_high;
        }
        CompareMatch {
            at_ticks: self.now_ticks,
            pin_high: self.pin_high,
            toggled,
        }
    }

    /// Absolute time of the last match in ticks
    pub fn now_ticks(&self) -> u64 {
        self.now_ticks
    }

    /// Whether the timer was put in normal mode
    pub fn is_normal_mode(&self) -> bool {
        self.normal_mode
    }

    /// Whether the compare interrupt is enabled
    pub fn is_interrupt_enabled(&self) -> bool {
        self.interrupt_enabled
    }

    /// Whether toggle-on-compare is enabled
    pub fn is_auto_toggle(&self) -> bool {
        self.auto_toggle
    }

    /// Number of forced compare events
    pub fn forced_events(&self) -> u32 {
        self.forced_events
    }
}

impl CompareTimer for MockCompareTimer {
    fn set_normal_mode(&mut self) {
        self.normal_mode = true;
    }

    fn enable_compare_interrupt(&mut self) {
        self.interrupt_enabled = true;
    }

    fn disable_compare_interrupt(&mut self) {
        self.interrupt_enabled = false;
    }

    fn force_compare_event(&mut self) {
        self.forced_events += 1;
        if self.auto_toggle {
            self.pin_high = !self.pin_high;
        }
    }

    fn set_auto_toggle_on_compare(&mut self, enabled: bool) {
        self.auto_toggle = enabled;
    }

    fn add_to_compare_register(&mut self, ticks: u8) {
        self.compare = self.compare.wrapping_add(ticks);
    }

    fn read_pin_level(&self) -> bool {
        self.pin_high
    }

    fn set_pin_level(&mut self, high: bool) {
        self.pin_high = high;
    }
}
