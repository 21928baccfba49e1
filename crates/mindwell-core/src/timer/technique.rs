//! Breathing technique configuration.
//!
//! A technique is an ordered list of phases, each with a fixed duration in
//! seconds. Zero-duration phases are omitted from the active sequence at
//! configuration time, not skipped at runtime.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub label: String,
    /// Duration in seconds, always > 0 once inside a technique.
    pub secs: u64,
}

impl Phase {
    pub fn new(label: impl Into<String>, secs: u64) -> Self {
        Self {
            label: label.into(),
            secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingTechnique {
    pub name: String,
    phases: Vec<Phase>,
}

impl BreathingTechnique {
    /// Build a technique, dropping zero-duration phases. A technique with
    /// no positive phase is rejected.
    pub fn new(name: impl Into<String>, phases: Vec<Phase>) -> Result<Self, ValidationError> {
        let phases: Vec<Phase> = phases.into_iter().filter(|p| p.secs > 0).collect();
        if phases.is_empty() {
            return Err(ValidationError::EmptyCollection(
                "technique has no phase with a positive duration".into(),
            ));
        }
        Ok(Self {
            name: name.into(),
            phases,
        })
    }

    /// Look up a built-in technique by key.
    pub fn preset(key: &str) -> Option<Self> {
        let (name, pattern): (&str, &[(&str, u64)]) = match key {
            "478" => (
                "4-7-8 Breathing",
                &[("Breathe In", 4), ("Hold", 7), ("Breathe Out", 8)],
            ),
            "box" => (
                "Box Breathing",
                &[
                    ("Breathe In", 4),
                    ("Hold", 4),
                    ("Breathe Out", 4),
                    ("Hold", 4),
                ],
            ),
            "calm" => (
                "Calm Breathing",
                &[("Breathe In", 3), ("Hold", 0), ("Breathe Out", 6)],
            ),
            "coherent" => (
                "Coherent Breathing",
                &[
                    ("Breathe In", 5),
                    ("Hold", 0),
                    ("Breathe Out", 5),
                    ("Hold", 0),
                ],
            ),
            _ => return None,
        };
        let phases = pattern
            .iter()
            .map(|(label, secs)| Phase::new(*label, *secs))
            .collect();
        // Presets always keep at least one positive phase.
        Self::new(name, phases).ok()
    }

    /// Keys accepted by [`preset`](Self::preset).
    pub fn preset_keys() -> &'static [&'static str] {
        &["478", "box", "calm", "coherent"]
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Seconds for one full cycle.
    pub fn cycle_secs(&self) -> u64 {
        self.phases.iter().map(|p| p.secs).sum()
    }
}
