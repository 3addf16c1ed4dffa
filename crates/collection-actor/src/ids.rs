//! # Identifier Generation
//!
//! Every record gets its id and creation time from one shared [`MonotonicIds`].
//! Ids are millisecond timestamps rendered as decimal strings. Two requests in
//! the same millisecond get consecutive values, so ids stay unique and sort in
//! creation order across every collection that shares the generator.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// An id paired with the instant it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub id: String,
    pub at: DateTime<Utc>,
}

/// Process-wide source of creation-ordered ids.
#[derive(Debug, Default)]
pub struct MonotonicIds {
    last: AtomicI64,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next stamp. The id is never less than the current wall-clock
    /// millisecond and always greater than the previous id.
    pub fn next_stamp(&self) -> Stamp {
        let now = Utc::now();
        let wall = now.timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = wall.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => {
                    // Keep `at` consistent with the id when the id ran ahead of the clock.
                    let at = if next == wall {
                        now
                    } else {
                        // `next` only runs a few ticks past the clock, well inside
                        // chrono's range, so the fallback never fires.
                        let ahead = Utc.timestamp_millis_opt(next).single();
                        debug_assert!(ahead.is_some(), "id {next} outside the timestamp range");
                        ahead.unwrap_or(now)
                    };
                    return Stamp {
                        id: next.to_string(),
                        at,
                    };
                }
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase_within_a_millisecond() {
        let ids = MonotonicIds::new();
        let stamps: Vec<Stamp> = (0..1000).map(|_| ids.next_stamp()).collect();

        for pair in stamps.windows(2) {
            let a: i64 = pair[0].id.parse().unwrap();
            let b: i64 = pair[1].id.parse().unwrap();
            assert!(b > a, "{b} should follow {a}");
            assert!(pair[1].at >= pair[0].at);
        }
    }

    #[test]
    fn test_stamp_time_matches_id_when_ahead_of_clock() {
        let ids = MonotonicIds::new();
        let ahead = Utc::now().timestamp_millis() + 60_000;
        ids.last.store(ahead, Ordering::Relaxed);

        let stamp = ids.next_stamp();
        assert_eq!(stamp.id, (ahead + 1).to_string());
        assert_eq!(stamp.at.timestamp_millis(), ahead + 1);
    }

    #[test]
    fn test_id_tracks_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let stamp = MonotonicIds::new().next_stamp();
        let id: i64 = stamp.id.parse().unwrap();
        assert!(id >= before);
    }
}
