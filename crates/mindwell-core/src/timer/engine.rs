//! Breathing session state machine.
//!
//! The timer is deadline-based: it does not use internal threads and never
//! reads the wall clock itself - the caller passes `now` into every
//! command and is responsible for calling `tick()` periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Stopped
//! ```
//!
//! `Stopped` is terminal; a new session requires a fresh `SessionTimer`.
//! Calling a command from an invalid state is a no-op, never a crash.
//!
//! One deadline is scheduled per phase. Remaining time for display is
//! recomputed by subtraction from the deadline, and elapsed time as
//! `now - started_at - paused_total`, so irregular callback scheduling
//! cannot accumulate drift.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::technique::BreathingTechnique;
use crate::events::Event;
use crate::store::{ActivityRecord, ActivityStore, BreathingSession};

/// Every 5th completed cycle fires a milestone notification.
const MILESTONE_CYCLES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// State machine for one breathing exercise.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    technique: BreathingTechnique,
    state: SessionState,
    phase_index: usize,
    cycles: u32,
    started_at: Option<DateTime<Utc>>,
    /// Instant the current phase expires. `None` unless Running.
    phase_deadline: Option<DateTime<Utc>>,
    /// Instant pause began. `None` unless Paused.
    paused_at: Option<DateTime<Utc>>,
    /// Frozen phase remainder while Paused.
    remaining_in_phase: Option<Duration>,
    /// Total time spent paused, excluded from elapsed time.
    paused_total: Duration,
}

impl SessionTimer {
    /// Create a timer in the `Idle` state.
    pub fn new(technique: BreathingTechnique) -> Self {
        Self {
            technique,
            state: SessionState::Idle,
            phase_index: 0,
            cycles: 0,
            started_at: None,
            phase_deadline: None,
            paused_at: None,
            remaining_in_phase: None,
            paused_total: Duration::zero(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn technique(&self) -> &BreathingTechnique {
        &self.technique
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn current_phase(&self) -> &super::technique::Phase {
        &self.technique.phases()[self.phase_index]
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Active session time: `now - started_at - paused_total`. While
    /// paused the clock is frozen at the pause instant. Zero before start.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        let Some(started_at) = self.started_at else {
            return Duration::zero();
        };
        let effective_now = match self.state {
            SessionState::Paused => self.paused_at.unwrap_or(now),
            _ => now,
        };
        let elapsed = effective_now - started_at - self.paused_total;
        elapsed.max(Duration::zero())
    }

    /// Remaining time in the current phase, for display.
    pub fn remaining_in_phase(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            SessionState::Running => self
                .phase_deadline
                .map(|deadline| (deadline - now).max(Duration::zero()))
                .unwrap_or_else(Duration::zero),
            SessionState::Paused => self.remaining_in_phase.unwrap_or_else(Duration::zero),
            _ => Duration::zero(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the session. Valid only from `Idle`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != SessionState::Idle {
            return None;
        }
        self.state = SessionState::Running;
        self.started_at = Some(now);
        self.cycles = 0;
        self.paused_total = Duration::zero();
        self.phase_index = 0;
        let phase = self.current_phase();
        let phase_label = phase.label.clone();
        let phase_secs = phase.secs;
        self.phase_deadline = Some(now + Duration::seconds(phase_secs as i64));
        Some(Event::SessionStarted {
            technique: self.technique.name.clone(),
            phase_label,
            phase_secs,
            at: now,
        })
    }

    /// Advance past any expired phase deadlines. Wrapping past the last
    /// phase completes a cycle; every 5th cycle also fires a milestone.
    ///
    /// Deadlines chain from the previous deadline, not from `now`, so a
    /// late callback advances through every phase it missed without drift.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state != SessionState::Running {
            return events;
        }
        while let Some(deadline) = self.phase_deadline {
            if now < deadline {
                break;
            }
            let wrapped = self.phase_index + 1 == self.technique.phases().len();
            self.phase_index = if wrapped { 0 } else { self.phase_index + 1 };
            if wrapped {
                self.cycles += 1;
                if self.cycles % MILESTONE_CYCLES == 0 {
                    events.push(Event::CycleMilestone {
                        cycles: self.cycles,
                        at: now,
                    });
                }
            }
            let phase = self.current_phase();
            let phase_secs = phase.secs;
            events.push(Event::PhaseAdvanced {
                phase_index: self.phase_index,
                phase_label: phase.label.clone(),
                phase_secs,
                at: now,
            });
            self.phase_deadline = Some(deadline + Duration::seconds(phase_secs as i64));
        }
        events
    }

    /// Freeze the current phase. Valid only from `Running`.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        let deadline = self.phase_deadline.take()?;
        let remaining = (deadline - now).max(Duration::zero());
        self.remaining_in_phase = Some(remaining);
        self.paused_at = Some(now);
        self.state = SessionState::Paused;
        Some(Event::SessionPaused {
            remaining_in_phase_ms: remaining.num_milliseconds().max(0) as u64,
            at: now,
        })
    }

    /// Resume a paused session with a fresh deadline for the remaining
    /// phase time. Valid only from `Paused`.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        let paused_at = self.paused_at.take()?;
        let remaining = self.remaining_in_phase.take().unwrap_or_else(Duration::zero);
        self.paused_total += now - paused_at;
        self.phase_deadline = Some(now + remaining);
        self.state = SessionState::Running;
        Some(Event::SessionResumed {
            remaining_in_phase_ms: remaining.num_milliseconds().max(0) as u64,
            at: now,
        })
    }

    /// End the session and commit exactly one record to the store,
    /// regardless of whether the current cycle completed. Valid from
    /// `Running` or `Paused`; terminal.
    pub fn stop(&mut self, store: &mut ActivityStore, now: DateTime<Utc>) -> Option<Event> {
        if !matches!(self.state, SessionState::Running | SessionState::Paused) {
            return None;
        }
        let duration_secs = self.elapsed(now).num_seconds().max(0) as u64;
        self.state = SessionState::Stopped;
        self.phase_deadline = None;
        self.paused_at = None;
        self.remaining_in_phase = None;

        store.append(ActivityRecord::Breathing(BreathingSession {
            date: now,
            technique: self.technique.name.clone(),
            duration: duration_secs,
            cycles: self.cycles,
        }));
        Some(Event::SessionStopped {
            technique: self.technique.name.clone(),
            duration_secs,
            cycles: self.cycles,
            at: now,
        })
    }
}
