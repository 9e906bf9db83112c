//! Pick sequencing.

/// Numbers directory picks so only the newest one may update the gallery.
///
/// A file input that is dismissed without a `cancel` event never settles;
/// starting a new pick makes that one stale instead of waiting on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickTracker {
    latest: u64,
    in_flight: Option<u64>,
}

impl PickTracker {
    /// Start a pick and return its ticket. Supersedes any pick in flight.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.in_flight = Some(self.latest);
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Finish `ticket`. Returns `false` when a newer pick replaced it.
    pub fn finish(&mut self, ticket: u64) -> bool {
        if self.is_current(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}
