//! Daily usage streak.
//!
//! Called once per service open, not per append. The streak is touched at
//! most once per calendar day: same-day opens are no-ops, the next day
//! extends, and any gap (or a clock moved backwards) resets to 1.

use chrono::NaiveDate;
use serde::Serialize;

use crate::store::ActivityStore;

/// Outcome of a streak touch. Only non-`Unchanged` outcomes update
/// `last_visit` and warrant a persistence flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StreakUpdate {
    Unchanged,
    Extended { streak: u32 },
    Reset,
}

pub struct StreakTracker;

impl StreakTracker {
    /// Compare `today` against the store's last visit and update the streak.
    pub fn touch(store: &mut ActivityStore, today: NaiveDate) -> StreakUpdate {
        let last = store.last_visit;
        if today == last {
            return StreakUpdate::Unchanged;
        }

        let update = match (today - last).num_days() {
            1 => {
                store.streak += 1;
                StreakUpdate::Extended {
                    streak: store.streak,
                }
            }
            _ => {
                // Gap of more than a day, or the clock moved backwards.
                store.streak = 1;
                StreakUpdate::Reset
            }
        };
        store.last_visit = today;
        store.mark_dirty();
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_visited(date: NaiveDate, streak: u32) -> ActivityStore {
        let mut store = ActivityStore::new(date);
        store.streak = streak;
        store
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn same_day_is_noop() {
        let mut store = store_visited(day(10), 4);
        assert_eq!(StreakTracker::touch(&mut store, day(10)), StreakUpdate::Unchanged);
        assert_eq!(store.streak, 4);
        assert_eq!(store.last_visit, day(10));
        assert!(!store.is_dirty());
    }

    #[test]
    fn next_day_extends_by_one() {
        let mut store = store_visited(day(10), 4);
        assert_eq!(
            StreakTracker::touch(&mut store, day(11)),
            StreakUpdate::Extended { streak: 5 }
        );
        assert_eq!(store.streak, 5);
        assert_eq!(store.last_visit, day(11));
        assert!(store.is_dirty());
    }

    #[test]
    fn gap_resets_to_one() {
        let mut store = store_visited(day(10), 4);
        assert_eq!(StreakTracker::touch(&mut store, day(13)), StreakUpdate::Reset);
        assert_eq!(store.streak, 1);
        assert_eq!(store.last_visit, day(13));
    }

    #[test]
    fn clock_moved_backwards_resets() {
        let mut store = store_visited(day(10), 4);
        assert_eq!(StreakTracker::touch(&mut store, day(8)), StreakUpdate::Reset);
        assert_eq!(store.streak, 1);
        assert_eq!(store.last_visit, day(8));
    }

    #[test]
    fn touch_is_idempotent_within_a_day() {
        let mut store = store_visited(day(10), 2);
        StreakTracker::touch(&mut store, day(11));
        StreakTracker::touch(&mut store, day(11));
        assert_eq!(store.streak, 3);
    }
}
