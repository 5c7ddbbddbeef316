use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Issues record timestamps that never go backwards within the process,
/// even if the wall clock is stepped back.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_micros: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now();
        let micros = wall.timestamp_micros();
        let previous = self.last_micros.fetch_max(micros, Ordering::SeqCst);
        // Truncated to micros so equal ticks compare equal once stored.
        DateTime::from_timestamp_micros(previous.max(micros)).unwrap_or(wall)
    }
}
