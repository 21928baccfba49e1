//! Weighted wellness-score aggregator.
//!
//! `score = base 50 + mood(30) + activity(20) + sleep(20) + consistency(15)
//! + community(15)`, each component a function of a 7- or 30-day lookback.
//! The theoretical ceiling exceeds 100, so the final value is clamped to
//! 0-100. The score is recomputed from the logs on every call and is never
//! persisted as a source of truth.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::store::{ActivityStore, SleepQuality};

const BASE_SCORE: f64 = 50.0;

/// Individual weighted component, kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub name: &'static str,
    /// Maximum contribution of this component.
    pub weight: f64,
    /// Raw score in 0.0..=1.0.
    pub value: f64,
    pub contribution: f64,
}

impl ScoreComponent {
    fn new(name: &'static str, weight: f64, value: f64) -> Self {
        let value = value.clamp(0.0, 1.0);
        Self {
            name,
            weight,
            value,
            contribution: weight * value,
        }
    }
}

/// Complete scoring breakdown for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub components: Vec<ScoreComponent>,
    /// Final clamped 0-100 composite.
    pub total: u32,
}

/// Composite score over recent mood, activity frequency, sleep quality,
/// streak, and community engagement.
pub struct WellnessScorer;

impl WellnessScorer {
    /// Compute the 0-100 composite for the store as of `now`.
    pub fn score(store: &ActivityStore, now: DateTime<Utc>) -> u32 {
        Self::breakdown(store, now).total
    }

    /// Compute the composite with per-component contributions.
    pub fn breakdown(store: &ActivityStore, now: DateTime<Utc>) -> ScoreBreakdown {
        let components = vec![
            ScoreComponent::new("mood", 30.0, Self::mood_value(store)),
            ScoreComponent::new("activity", 20.0, Self::activity_value(store, now)),
            ScoreComponent::new("sleep", 20.0, Self::sleep_value(store)),
            ScoreComponent::new("consistency", 15.0, f64::from(store.streak) / 30.0),
            ScoreComponent::new("community", 15.0, Self::community_value(store, now)),
        ];
        let sum: f64 = components.iter().map(|c| c.contribution).sum();
        let total = (BASE_SCORE + sum).round().clamp(0.0, 100.0) as u32;
        ScoreBreakdown {
            base: BASE_SCORE,
            components,
            total,
        }
    }

    /// Average normalized intensity of the 7 most recent moods. Both mood
    /// schemas are normalized to 0-1 before averaging, so a 4/5 scale
    /// entry and an 8/10 wheel entry weigh the same.
    fn mood_value(store: &ActivityStore) -> f64 {
        let recent: Vec<f64> = store
            .moods
            .iter()
            .rev()
            .take(7)
            .map(|m| m.kind.normalized())
            .collect();
        if recent.is_empty() {
            return 0.0;
        }
        recent.iter().sum::<f64>() / recent.len() as f64
    }

    /// Entries across the four activity logs in the last 7 days, against a
    /// one-per-day target.
    fn activity_value(store: &ActivityStore, now: DateTime<Utc>) -> f64 {
        let cutoff = now - Duration::days(7);
        let count = store.moods.iter().filter(|e| e.date > cutoff).count()
            + store.journals.iter().filter(|e| e.date > cutoff).count()
            + store
                .breathing_sessions
                .iter()
                .filter(|e| e.date > cutoff)
                .count()
            + store
                .meditation_sessions
                .iter()
                .filter(|e| e.date > cutoff)
                .count();
        count as f64 / 7.0
    }

    /// Average quality of the 7 most recent sleep logs on a 1-4 scale.
    fn sleep_value(store: &ActivityStore) -> f64 {
        let recent: Vec<f64> = store
            .sleep_logs
            .iter()
            .rev()
            .take(7)
            .map(|log| Self::quality_numeric(log.quality))
            .collect();
        if recent.is_empty() {
            return 0.0;
        }
        (recent.iter().sum::<f64>() / recent.len() as f64) / 4.0
    }

    fn quality_numeric(quality: Option<SleepQuality>) -> f64 {
        match quality {
            Some(SleepQuality::Excellent) => 4.0,
            Some(SleepQuality::Good) => 3.0,
            Some(SleepQuality::Fair) => 2.0,
            // Poor and unspecified both score 2.
            Some(SleepQuality::Poor) | None => 2.0,
        }
    }

    /// Community posts in the last 30 days, against a 10-post target.
    fn community_value(store: &ActivityStore, now: DateTime<Utc>) -> f64 {
        let cutoff = now - Duration::days(30);
        let count = store
            .community_posts
            .iter()
            .filter(|p| p.date > cutoff)
            .count();
        count as f64 / 10.0
    }
}
