//! Log entry types.
//!
//! All entries are append-only: once constructed and appended to the
//! [`ActivityStore`](super::ActivityStore), no update or delete operation
//! exists. Constructors validate upfront and stamp the caller-supplied
//! timestamp, so a failed validation never mutates anything.
//!
//! Serialized field names follow the persisted document schema (camelCase).

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// How a mood was recorded: a 1-5 ordinal value or an emotion-wheel
/// selection with a 1-10 intensity. The two schemas coexist in the
/// persisted document; [`MoodKind::normalized`] maps either onto a common
/// 0.0-1.0 range before any aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoodKind {
    Scale { value: u8 },
    Wheel {
        emotion: String,
        color: String,
        intensity: u8,
    },
}

impl MoodKind {
    /// Normalize to 0.0-1.0 (`value/5` or `intensity/10`).
    pub fn normalized(&self) -> f64 {
        match self {
            MoodKind::Scale { value } => f64::from(*value) / 5.0,
            MoodKind::Wheel { intensity, .. } => f64::from(*intensity) / 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: MoodKind,
    #[serde(default)]
    pub factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoodEntry {
    /// A 1-5 scale mood.
    pub fn scale(
        date: DateTime<Utc>,
        value: u8,
        factors: Vec<String>,
        note: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&value) {
            return Err(ValidationError::InvalidValue {
                field: "value".into(),
                message: format!("must be 1-5, got {value}"),
            });
        }
        Ok(Self {
            date,
            kind: MoodKind::Scale { value },
            factors,
            note,
        })
    }

    /// An emotion-wheel selection with a 1-10 intensity.
    pub fn wheel(
        date: DateTime<Utc>,
        emotion: impl Into<String>,
        color: impl Into<String>,
        intensity: u8,
        factors: Vec<String>,
        note: Option<String>,
    ) -> Result<Self, ValidationError> {
        let emotion = emotion.into();
        if emotion.trim().is_empty() {
            return Err(ValidationError::MissingField("emotion".into()));
        }
        if !(1..=10).contains(&intensity) {
            return Err(ValidationError::InvalidValue {
                field: "intensity".into(),
                message: format!("must be 1-10, got {intensity}"),
            });
        }
        Ok(Self {
            date,
            kind: MoodKind::Wheel {
                emotion,
                color: color.into(),
                intensity,
            },
            factors,
            note,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Derived at construction: whitespace-separated word count.
    pub word_count: usize,
}

impl JournalEntry {
    pub fn new(
        date: DateTime<Utc>,
        title: Option<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::MissingField("content".into()));
        }
        let word_count = content.split_whitespace().count();
        Ok(Self {
            date,
            title: title.filter(|t| !t.trim().is_empty()),
            content,
            tags,
            word_count,
        })
    }
}

/// Produced only by [`SessionTimer::stop`](crate::timer::SessionTimer::stop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingSession {
    pub date: DateTime<Utc>,
    pub technique: String,
    /// Whole seconds of active (non-paused) session time.
    pub duration: u64,
    pub cycles: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationSession {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub name: String,
    pub category: String,
    /// Duration in minutes.
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SleepQuality {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLog {
    pub date: DateTime<Utc>,
    /// Bedtime as `HH:MM`.
    pub bedtime: String,
    /// Wake time as `HH:MM`.
    pub wake_time: String,
    /// Hours slept, wrapping past midnight when wake < bedtime.
    #[serde(rename = "duration")]
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<SleepQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dreams: Option<String>,
}

impl SleepLog {
    pub fn new(
        date: DateTime<Utc>,
        bedtime: &str,
        wake_time: &str,
        quality: Option<SleepQuality>,
        dreams: Option<String>,
    ) -> Result<Self, ValidationError> {
        let bed = parse_hhmm("bedtime", bedtime)?;
        let wake = parse_hhmm("wakeTime", wake_time)?;

        let mut minutes = (wake - bed).num_minutes();
        if minutes < 0 {
            // Overnight: wake is on the next calendar day.
            minutes += 24 * 60;
        }

        Ok(Self {
            date,
            bedtime: bedtime.to_string(),
            wake_time: wake_time.to_string(),
            duration_hours: minutes as f64 / 60.0,
            quality,
            dreams: dreams.filter(|d| !d.trim().is_empty()),
        })
    }
}

fn parse_hhmm(field: &str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ValidationError::InvalidValue {
        field: field.into(),
        message: format!("expected HH:MM, got '{value}'"),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub content: String,
}

impl CommunityPost {
    pub fn new(date: DateTime<Utc>, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::MissingField("content".into()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            date,
            content,
        })
    }
}

/// One user message / generated reply pair. The response generator itself
/// lives outside the core; only the log is kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiExchange {
    pub date: DateTime<Utc>,
    pub user: String,
    pub ai: String,
}

/// Tagged record handed to [`ActivityStore::append`](super::ActivityStore::append),
/// one variant per log.
#[derive(Debug, Clone)]
pub enum ActivityRecord {
    Mood(MoodEntry),
    Journal(JournalEntry),
    Breathing(BreathingSession),
    Meditation(MeditationSession),
    Sleep(SleepLog),
    Community(CommunityPost),
    Ai(AiExchange),
}
