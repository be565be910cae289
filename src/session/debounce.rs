// Fixed-delay debounce for search input
// Author: Gabriel Demetrios Lafis

use std::time::{Duration, Instant};

/// Debounces raw search keystrokes so one request is issued per settled
/// term instead of one per keypress.
///
/// The debouncer is a pure state machine over caller-supplied instants:
/// feed every keystroke through `input` and poll `settle` from the event
/// loop; a term is released once the delay has elapsed with no newer
/// keystroke.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    /// Create a debouncer with the given settle delay
    pub fn new(delay: Duration) -> Self {
        SearchDebouncer {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke, restarting the settle timer
    pub fn input(&mut self, term: &str, now: Instant) {
        self.pending = Some((term.to_string(), now));
    }

    /// Release the pending term if the delay has elapsed since the last
    /// keystroke
    pub fn settle(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.duration_since(*at) >= self.delay => {
                self.pending.take().map(|(term, _)| term)
            }
            _ => None,
        }
    }

    /// Release the pending term immediately, delay notwithstanding
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(term, _)| term)
    }

    /// Check whether a keystroke is waiting to settle
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
