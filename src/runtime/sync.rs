//! Interrupt-safe shared state
//!
//! State touched both by an interrupt handler and by ordinary code lives in a
//! [`CsState`]: every access runs inside a critical section, so multi-byte
//! fields are never observed half-written. Closures passed to
//! [`SharedState::with`] / [`SharedState::with_mut`] run with interrupts
//! masked and must stay short; they directly delay the compare-match and
//! edge-capture deadlines.

use core::cell::RefCell;

use critical_section::Mutex;

/// Synchronized state access.
///
/// # Example
///
/// ```
/// use rc_ppm::runtime::sync::{CsState, SharedState};
///
/// static COUNTER: CsState<u32> = CsState::new(0);
///
/// COUNTER.with_mut(|v| *v += 1);
/// assert_eq!(COUNTER.with(|v| *v), 1);
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

/// Critical-section protected state.
///
/// Usable from interrupt handlers and from thread mode; nested critical
/// sections are allowed, nested `with_mut` on the same value is not.
pub struct CsState<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CsState<T> {
    /// Creates a new `CsState` wrapping the given value.
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }
}

impl<T> SharedState<T> for CsState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}
