//! Compare-match timer interface trait
//!
//! This module defines the 8-bit compare timer the PPM generator drives. The
//! timer counts freely from 0 to 255 and wraps; a compare match fires when
//! the counter reaches the compare register, optionally toggling the output
//! pin in hardware.

/// Reprogrammable 8-bit compare-match timer with an attached output pin
///
/// Platform implementations must provide this interface for PPM generation.
///
/// # Safety Invariants
///
/// - One owner per compare channel; the generator holds it for its lifetime
/// - Methods are called from the compare interrupt or with it disabled
/// - `add_to_compare_register` wraps modulo 256, it never saturates
pub trait CompareTimer {
    /// Put the timer in free-running normal mode (no PWM, no clear on match)
    fn set_normal_mode(&mut self);

    /// Enable the compare-match interrupt
    fn enable_compare_interrupt(&mut self);

    /// Disable the compare-match interrupt
    fn disable_compare_interrupt(&mut self);

    /// Force a compare event now
    ///
    /// Toggles the pin if toggle-on-compare is enabled. Does not raise the
    /// interrupt.
    fn force_compare_event(&mut self);

    /// Enable or disable the hardware pin toggle on the next compare match
    fn set_auto_toggle_on_compare(&mut self, enabled: bool);

    /// Move the next compare match `ticks` ticks after the previous one
    fn add_to_compare_register(&mut self, ticks: u8);

    /// Current output pin level (`true` = high)
    fn read_pin_level(&self) -> bool;

    /// Drive the output pin to `high`
    fn set_pin_level(&mut self, high: bool);
}
