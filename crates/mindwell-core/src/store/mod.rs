//! Activity store: the durable aggregate root.
//!
//! All activity logs, preferences, and counters live here. Other components
//! read it through a shared borrow (the borrow checker enforces the
//! read-only snapshot contract) and mutate it only through the narrow
//! operations below. Every mutation marks the store dirty for the next
//! persistence flush.

mod codec;
mod config;
mod dedup_set;
mod entries;

pub use codec::{ExportDocument, PersistenceCodec};
pub use config::AppConfig;
pub use dedup_set::DedupSet;
pub use entries::{
    ActivityRecord, AiExchange, BreathingSession, CommunityPost, JournalEntry, MeditationSession,
    MoodEntry, MoodKind, SleepLog, SleepQuality,
};

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// User-facing preferences, persisted inside the activity document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub reminder_time: String,
    pub theme: String,
    pub notifications: bool,
    pub sound_enabled: bool,
    pub privacy_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            reminder_time: "09:00".into(),
            theme: "dark".into(),
            notifications: true,
            sound_enabled: true,
            privacy_mode: false,
        }
    }
}

/// Aggregated mood/factor patterns, updated on every mood append.
/// A display sidecar: the wellness scorer never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analytics {
    /// Weekday name -> normalized mood intensities recorded on that weekday.
    pub mood_patterns: BTreeMap<String, Vec<f64>>,
    pub sleep_patterns: BTreeMap<String, Vec<f64>>,
    /// Factor tag -> normalized mood intensities recorded with that factor.
    pub factor_correlations: BTreeMap<String, Vec<f64>>,
    pub weekly_trends: Vec<f64>,
}

/// The durable aggregate of all append-only activity logs, preferences,
/// and counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityStore {
    pub moods: Vec<MoodEntry>,
    pub journals: Vec<JournalEntry>,
    pub breathing_sessions: Vec<BreathingSession>,
    pub meditation_sessions: Vec<MeditationSession>,
    pub sleep_logs: Vec<SleepLog>,
    pub community_posts: Vec<CommunityPost>,
    pub ai_conversations: Vec<AiExchange>,
    pub last_visit: NaiveDate,
    /// Consecutive-day usage count, always >= 1 once initialized.
    pub streak: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
    pub level: u32,
    /// Distinct 1-5 values ever recorded.
    pub used_mood_values: DedupSet<u8>,
    /// Distinct emotion names ever recorded.
    pub used_emotions: DedupSet<String>,
    pub puzzles_completed: u32,
    pub preferences: Preferences,
    pub analytics: Analytics,
    #[serde(skip)]
    dirty: bool,
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self {
            moods: Vec::new(),
            journals: Vec::new(),
            breathing_sessions: Vec::new(),
            meditation_sessions: Vec::new(),
            sleep_logs: Vec::new(),
            community_posts: Vec::new(),
            ai_conversations: Vec::new(),
            last_visit: NaiveDate::default(),
            streak: 1,
            total_xp: 0,
            level: 1,
            used_mood_values: DedupSet::new(),
            used_emotions: DedupSet::new(),
            puzzles_completed: 0,
            preferences: Preferences::default(),
            analytics: Analytics::default(),
            dirty: false,
        }
    }
}

impl ActivityStore {
    /// Default empty store for a first run, visited today.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            last_visit: today,
            ..Self::default()
        }
    }

    /// Append a record to its log. Validation happened upstream in the
    /// entry constructors; this always succeeds in-memory. Mood appends
    /// also maintain the dedup sets and mood analytics.
    pub fn append(&mut self, record: ActivityRecord) {
        match record {
            ActivityRecord::Mood(entry) => {
                match &entry.kind {
                    MoodKind::Scale { value } => {
                        self.used_mood_values.insert(*value);
                    }
                    MoodKind::Wheel { emotion, .. } => {
                        self.used_emotions.insert(emotion.clone());
                    }
                }
                self.update_mood_analytics(&entry);
                self.moods.push(entry);
            }
            ActivityRecord::Journal(entry) => self.journals.push(entry),
            ActivityRecord::Breathing(entry) => self.breathing_sessions.push(entry),
            ActivityRecord::Meditation(entry) => self.meditation_sessions.push(entry),
            ActivityRecord::Sleep(entry) => self.sleep_logs.push(entry),
            ActivityRecord::Community(entry) => self.community_posts.push(entry),
            ActivityRecord::Ai(entry) => self.ai_conversations.push(entry),
        }
        self.dirty = true;
    }

    /// Puzzle internals are out of scope; only the counter lives here.
    pub fn record_puzzle_completion(&mut self) {
        self.puzzles_completed += 1;
        self.dirty = true;
    }

    /// Add XP and recompute level as `total_xp / 100 + 1`.
    /// Returns the new level if it increased.
    pub fn award_xp(&mut self, xp: u32) -> Option<u32> {
        self.total_xp += xp;
        let level = self.total_xp / 100 + 1;
        self.dirty = true;
        if level > self.level {
            self.level = level;
            Some(level)
        } else {
            None
        }
    }

    /// Summed breathing-session seconds.
    pub fn total_breathing_secs(&self) -> u64 {
        self.breathing_sessions.iter().map(|s| s.duration).sum()
    }

    // ── Dirty tracking ───────────────────────────────────────────────

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn update_mood_analytics(&mut self, entry: &MoodEntry) {
        let weekday = entry.date.weekday().to_string();
        let normalized = entry.kind.normalized();
        self.analytics
            .mood_patterns
            .entry(weekday)
            .or_default()
            .push(normalized);
        for factor in &entry.factors {
            self.analytics
                .factor_correlations
                .entry(factor.clone())
                .or_default()
                .push(normalized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn store() -> ActivityStore {
        ActivityStore::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn append_preserves_call_order() {
        let mut s = store();
        for value in [3u8, 1, 3] {
            let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, u32::from(value), 0).unwrap();
            s.append(ActivityRecord::Mood(
                MoodEntry::scale(at, value, vec![], None).unwrap(),
            ));
        }
        assert_eq!(s.moods.len(), 3);
        let values: Vec<u8> = s
            .moods
            .iter()
            .map(|m| match m.kind {
                MoodKind::Scale { value } => value,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(values, vec![3, 1, 3]);
        assert!(s.is_dirty());
    }

    #[test]
    fn mood_append_maintains_dedup_sets() {
        let mut s = store();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        s.append(ActivityRecord::Mood(
            MoodEntry::scale(at, 4, vec![], None).unwrap(),
        ));
        s.append(ActivityRecord::Mood(
            MoodEntry::scale(at, 4, vec![], None).unwrap(),
        ));
        s.append(ActivityRecord::Mood(
            MoodEntry::wheel(at, "Joy", "#FFD93D", 7, vec![], None).unwrap(),
        ));
        assert_eq!(s.used_mood_values.len(), 1);
        assert_eq!(s.used_emotions.len(), 1);
    }

    #[test]
    fn mood_append_updates_analytics() {
        let mut s = store();
        // 2024-03-01 is a Friday.
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        s.append(ActivityRecord::Mood(
            MoodEntry::scale(at, 5, vec!["sleep".into(), "work".into()], None).unwrap(),
        ));
        assert_eq!(s.analytics.mood_patterns["Fri"], vec![1.0]);
        assert_eq!(s.analytics.factor_correlations.len(), 2);
    }

    #[test]
    fn award_xp_recomputes_level() {
        let mut s = store();
        assert_eq!(s.award_xp(50), None);
        assert_eq!(s.level, 1);
        assert_eq!(s.award_xp(60), Some(2));
        assert_eq!(s.level, 2);
        assert_eq!(s.total_xp, 110);
    }

    #[test]
    fn puzzle_counter_increments() {
        let mut s = store();
        s.record_puzzle_completion();
        s.record_puzzle_completion();
        assert_eq!(s.puzzles_completed, 2);
    }
}
