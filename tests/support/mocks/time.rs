// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use tabula_core::application::ports::time::Clock;

/// 2024-01-01T00:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("valid RFC3339 literal")
        .with_timezone(&Utc)
}

/// Starts at [`fixed_now`] and moves one second forward per reading, so
/// consecutive timestamps always differ.
#[derive(Default)]
pub struct SteppingClock {
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        fixed_now() + Duration::seconds(tick)
    }
}
