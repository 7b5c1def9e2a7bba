//! Element id allocation.

use chrono::Utc;

use super::types::ElementId;

/// Hands out decimal-string ids seeded from wall-clock milliseconds.
///
/// Ids are strictly increasing per generator even when the clock stalls or
/// steps backwards, so an id is never handed out twice. Once the numeric
/// range is used up (a loaded id at `u64::MAX`), ids continue as
/// `"<u64::MAX>-<n>"` with `n` counting up.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
    spill: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> ElementId {
        let Some(next) = self.last.checked_add(1) else {
            self.spill += 1;
            return ElementId::new(format!("{}-{}", self.last, self.spill));
        };
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.last = now.max(next);
        ElementId::new(self.last.to_string())
    }

    /// Record an id that entered the template from elsewhere, so later
    /// allocations stay above it. Non-numeric ids are ignored.
    pub fn observe(&mut self, id: &ElementId) {
        if let Ok(n) = id.as_str().parse::<u64>() {
            self.last = self.last.max(n);
        }
    }
}
