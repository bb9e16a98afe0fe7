//! Gepollte periodische Timer
//!
//! Ersetzen Timer-Interrupts: die Steuer-Schleife fragt jeden Tick ab,
//! ob die Periode abgelaufen ist.

use crate::config::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    period: Millis,
    next_due: Millis,
}

impl PeriodicTimer {
    /// Erste Fälligkeit eine Periode nach `now`
    pub const fn new(period: Millis, now: Millis) -> Self {
        Self {
            period,
            next_due: now.saturating_add(period),
        }
    }

    pub fn period(&self) -> Millis {
        self.period
    }

    /// `true` genau einmal pro abgelaufener Periode
    ///
    /// Verpasste Perioden werden nicht nachgeholt.
    pub fn poll(&mut self, now: Millis) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now.saturating_add(self.period);
        true
    }
}
