use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The presentation layer polls for events and renders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        technique: String,
        phase_label: String,
        phase_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        phase_index: usize,
        phase_label: String,
        phase_secs: u64,
        at: DateTime<Utc>,
    },
    /// Fired every 5th completed cycle. A pure notification, not a state change.
    CycleMilestone {
        cycles: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_in_phase_ms: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_in_phase_ms: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        technique: String,
        duration_secs: u64,
        cycles: u32,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        id: String,
        name: String,
        xp: u32,
        at: DateTime<Utc>,
    },
    LevelUp {
        level: u32,
        at: DateTime<Utc>,
    },
}
