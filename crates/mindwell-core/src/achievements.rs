//! Achievement rule engine.
//!
//! A fixed catalog of achievement definitions is evaluated against the
//! activity store after every append. Unlocking is monotonic (false ->
//! true, never back) and evaluation is idempotent: re-running against
//! unchanged data yields nothing new and never double-awards XP.
//!
//! Two rules (`earlyBird`, `nightOwl`) are keyed on the hour of the mood
//! entry being created right now; they are never evaluated retroactively
//! against historical entries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::score::WellnessScorer;
use crate::store::{ActivityStore, SleepQuality};

/// One catalog entry: id, display name, description, XP reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub xp: u32,
}

/// The fixed achievement catalog.
///
/// `communityHelper` and `insightfulUser` have no automatic rule here;
/// their unlock paths live outside this engine.
pub static CATALOG: [AchievementDef; 18] = [
    AchievementDef { id: "firstMood", name: "First Step", description: "Track your first mood", xp: 10 },
    AchievementDef { id: "weekStreak", name: "Week Warrior", description: "Maintain a 7-day streak", xp: 50 },
    AchievementDef { id: "monthStreak", name: "Monthly Master", description: "Maintain a 30-day streak", xp: 200 },
    AchievementDef { id: "tenMoods", name: "Mood Master", description: "Track 10 moods", xp: 30 },
    AchievementDef { id: "fiftyMoods", name: "Emotion Expert", description: "Track 50 moods", xp: 100 },
    AchievementDef { id: "firstJournal", name: "Dear Diary", description: "Write your first journal entry", xp: 15 },
    AchievementDef { id: "longJournal", name: "Wordsmith", description: "Write a 500+ word journal entry", xp: 40 },
    AchievementDef { id: "breathingPro", name: "Breathing Pro", description: "Complete 5 breathing sessions", xp: 25 },
    AchievementDef { id: "meditationMaster", name: "Meditation Master", description: "Complete 10 meditation sessions", xp: 60 },
    AchievementDef { id: "earlyBird", name: "Early Bird", description: "Track mood before 9 AM", xp: 20 },
    AchievementDef { id: "nightOwl", name: "Night Owl", description: "Track mood after 9 PM", xp: 20 },
    AchievementDef { id: "moodExplorer", name: "Mood Explorer", description: "Use all emotion categories", xp: 35 },
    AchievementDef { id: "consistentUser", name: "Consistent User", description: "Use app 3 days in a row", xp: 25 },
    AchievementDef { id: "zenMaster", name: "Zen Master", description: "30 minutes of breathing exercises", xp: 80 },
    AchievementDef { id: "communityHelper", name: "Community Helper", description: "Help 5 community members", xp: 45 },
    AchievementDef { id: "insightfulUser", name: "Insightful", description: "View analytics 10 times", xp: 30 },
    AchievementDef { id: "sleepChampion", name: "Sleep Champion", description: "Log 7 nights of good sleep", xp: 50 },
    AchievementDef { id: "wellnessWarrior", name: "Wellness Warrior", description: "Achieve 80+ wellness score", xp: 100 },
];

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementFlag {
    pub unlocked: bool,
}

/// Per-id unlock map, persisted as its own document separate from the
/// activity logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementState {
    entries: BTreeMap<String, AchievementFlag>,
}

impl AchievementState {
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.entries.get(id).map(|f| f.unlocked).unwrap_or(false)
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.values().filter(|f| f.unlocked).count()
    }

    /// One-way transition. Returns `true` only when newly unlocked.
    fn unlock(&mut self, id: &str) -> bool {
        let flag = self.entries.entry(id.to_string()).or_default();
        if flag.unlocked {
            false
        } else {
            flag.unlocked = true;
            true
        }
    }
}

/// Pure rule evaluation over a store snapshot.
pub struct AchievementEngine;

impl AchievementEngine {
    /// Evaluate every rule against the store and unlock what newly holds.
    ///
    /// `mood_hour` is the hour-of-day of a mood entry created by the
    /// triggering append, or `None` when the trigger was anything else.
    /// Each newly-unlocked id awards the catalog's fixed XP to the store's
    /// running total.
    pub fn evaluate(
        store: &mut ActivityStore,
        state: &mut AchievementState,
        now: DateTime<Utc>,
        mood_hour: Option<u32>,
    ) -> Vec<&'static AchievementDef> {
        let streak = store.streak;
        let mut unlocked = Vec::new();
        for def in &CATALOG {
            if state.is_unlocked(def.id) {
                continue;
            }
            if Self::rule_holds(def.id, store, streak, now, mood_hour) && state.unlock(def.id) {
                unlocked.push(def);
            }
        }
        for def in &unlocked {
            store.award_xp(def.xp);
        }
        unlocked
    }

    fn rule_holds(
        id: &str,
        store: &ActivityStore,
        streak: u32,
        now: DateTime<Utc>,
        mood_hour: Option<u32>,
    ) -> bool {
        match id {
            "firstMood" => !store.moods.is_empty(),
            "tenMoods" => store.moods.len() >= 10,
            "fiftyMoods" => store.moods.len() >= 50,
            "firstJournal" => !store.journals.is_empty(),
            "longJournal" => store.journals.iter().any(|j| j.word_count >= 500),
            "breathingPro" => store.breathing_sessions.len() >= 5,
            "zenMaster" => store.total_breathing_secs() >= 1800,
            "meditationMaster" => store.meditation_sessions.len() >= 10,
            "moodExplorer" => store.used_mood_values.len() + store.used_emotions.len() >= 5,
            "consistentUser" => streak >= 3,
            "weekStreak" => streak >= 7,
            "monthStreak" => streak >= 30,
            "sleepChampion" => {
                store
                    .sleep_logs
                    .iter()
                    .filter(|log| {
                        matches!(log.quality, Some(SleepQuality::Excellent | SleepQuality::Good))
                    })
                    .count()
                    >= 7
            }
            "wellnessWarrior" => WellnessScorer::score(store, now) >= 80,
            "earlyBird" => mood_hour.is_some_and(|h| h < 9),
            "nightOwl" => mood_hour.is_some_and(|h| h >= 21),
            // No automatic rule.
            _ => false,
        }
    }
}
