//! System clock adapter.

use chrono::{DateTime, SubsecRound, Utc};

use crate::ports::clock::Clock;

/// Reads the system clock at whole-second precision.
///
/// Cache entries carry this stamp, so `created_at` in the cache file is
/// always a plain `YYYY-MM-DDTHH:MM:SSZ` value.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }
}
