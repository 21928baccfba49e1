//! Explicitly constructed application service.
//!
//! Owns the activity store, the persistence codec, the achievement state,
//! and at most one active breathing session, with the clock injected.
//! Presentation collaborators hold a reference to this service instead of
//! reaching for a process-wide singleton.
//!
//! Every record operation constructs a validated entry, appends it, and
//! runs achievement evaluation; mood appends additionally pass the hour of
//! creation for the time-of-day rules. Nothing here flushes implicitly
//! except `open` after a streak change - callers decide the flush cadence.

use chrono::Timelike;
use tracing::{info, warn};

use crate::achievements::{AchievementEngine, AchievementState};
use crate::clock::Clock;
use crate::error::Result;
use crate::events::Event;
use crate::score::{ScoreBreakdown, WellnessScorer};
use crate::store::{
    ActivityRecord, ActivityStore, AiExchange, CommunityPost, ExportDocument, JournalEntry,
    MeditationSession, MoodEntry, PersistenceCodec, SleepQuality, SleepLog,
};
use crate::streak::{StreakTracker, StreakUpdate};
use crate::timer::{BreathingTechnique, SessionState, SessionTimer};

pub struct WellnessService<C: Clock> {
    clock: C,
    codec: PersistenceCodec,
    store: ActivityStore,
    achievements: AchievementState,
    achievements_dirty: bool,
    session: Option<SessionTimer>,
}

impl<C: Clock> WellnessService<C> {
    /// Load both documents, touch the streak for today, and flush if the
    /// streak changed. Called once per process start.
    pub fn open(codec: PersistenceCodec, clock: C) -> Self {
        let today = clock.today();
        let mut store = codec.load_store(today);
        let achievements = codec.load_achievements();

        let update = StreakTracker::touch(&mut store, today);
        let mut service = Self {
            clock,
            codec,
            store,
            achievements,
            achievements_dirty: false,
            session: None,
        };
        match update {
            StreakUpdate::Unchanged => {}
            StreakUpdate::Extended { streak } => {
                info!(streak, "streak extended");
                service.try_flush();
            }
            StreakUpdate::Reset => {
                info!("streak reset");
                service.try_flush();
            }
        }
        service
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub fn achievements(&self) -> &AchievementState {
        &self.achievements
    }

    pub fn session(&self) -> Option<&SessionTimer> {
        self.session.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Recompute the wellness breakdown from the logs. Cached nowhere.
    pub fn wellness(&self) -> ScoreBreakdown {
        WellnessScorer::breakdown(&self.store, self.clock.now())
    }

    // ── Record operations ────────────────────────────────────────────

    pub fn log_mood_scale(
        &mut self,
        value: u8,
        factors: Vec<String>,
        note: Option<String>,
    ) -> Result<Vec<Event>> {
        let now = self.clock.now();
        let entry = MoodEntry::scale(now, value, factors, note)?;
        self.store.append(ActivityRecord::Mood(entry));
        Ok(self.evaluate(Some(now.hour())))
    }

    pub fn log_mood_wheel(
        &mut self,
        emotion: &str,
        color: &str,
        intensity: u8,
        factors: Vec<String>,
        note: Option<String>,
    ) -> Result<Vec<Event>> {
        let now = self.clock.now();
        let entry = MoodEntry::wheel(now, emotion, color, intensity, factors, note)?;
        self.store.append(ActivityRecord::Mood(entry));
        Ok(self.evaluate(Some(now.hour())))
    }

    pub fn log_journal(
        &mut self,
        title: Option<String>,
        content: &str,
        tags: Vec<String>,
    ) -> Result<Vec<Event>> {
        let entry = JournalEntry::new(self.clock.now(), title, content, tags)?;
        self.store.append(ActivityRecord::Journal(entry));
        Ok(self.evaluate(None))
    }

    pub fn log_sleep(
        &mut self,
        bedtime: &str,
        wake_time: &str,
        quality: Option<SleepQuality>,
        dreams: Option<String>,
    ) -> Result<Vec<Event>> {
        let entry = SleepLog::new(self.clock.now(), bedtime, wake_time, quality, dreams)?;
        self.store.append(ActivityRecord::Sleep(entry));
        Ok(self.evaluate(None))
    }

    pub fn log_meditation(&mut self, name: &str, category: &str, minutes: u32) -> Vec<Event> {
        self.store.append(ActivityRecord::Meditation(MeditationSession {
            date: self.clock.now(),
            name: name.into(),
            category: category.into(),
            duration: minutes,
        }));
        self.evaluate(None)
    }

    pub fn post_community(&mut self, content: &str) -> Result<Vec<Event>> {
        let post = CommunityPost::new(self.clock.now(), content)?;
        self.store.append(ActivityRecord::Community(post));
        Ok(self.evaluate(None))
    }

    pub fn record_ai_exchange(&mut self, user: &str, ai: &str) -> Vec<Event> {
        self.store.append(ActivityRecord::Ai(AiExchange {
            date: self.clock.now(),
            user: user.into(),
            ai: ai.into(),
        }));
        self.evaluate(None)
    }

    pub fn record_puzzle_completion(&mut self) {
        self.store.record_puzzle_completion();
    }

    /// Set one user preference by key.
    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        let prefs = &mut self.store.preferences;
        match key {
            "reminderTime" => prefs.reminder_time = value.to_string(),
            "theme" => prefs.theme = value.to_string(),
            "notifications" => prefs.notifications = parse_bool(key, value)?,
            "soundEnabled" => prefs.sound_enabled = parse_bool(key, value)?,
            "privacyMode" => prefs.privacy_mode = parse_bool(key, value)?,
            _ => {
                return Err(crate::error::ValidationError::InvalidValue {
                    field: "preference".into(),
                    message: format!("unknown key '{key}'"),
                }
                .into())
            }
        }
        self.store.mark_dirty();
        Ok(())
    }

    // ── Session control ──────────────────────────────────────────────

    /// Start a breathing session. Rejected while another session is
    /// running or paused.
    pub fn begin_session(&mut self, technique: BreathingTechnique) -> Option<Event> {
        if matches!(
            self.session.as_ref().map(SessionTimer::state),
            Some(SessionState::Running | SessionState::Paused)
        ) {
            return None;
        }
        let mut timer = SessionTimer::new(technique);
        let event = timer.start(self.clock.now());
        self.session = Some(timer);
        event
    }

    pub fn tick_session(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        self.session
            .as_mut()
            .map(|timer| timer.tick(now))
            .unwrap_or_default()
    }

    pub fn pause_session(&mut self) -> Option<Event> {
        let now = self.clock.now();
        self.session.as_mut()?.pause(now)
    }

    pub fn resume_session(&mut self) -> Option<Event> {
        let now = self.clock.now();
        self.session.as_mut()?.resume(now)
    }

    /// Stop the active session. The session record is committed to the
    /// store atomically here - never incrementally during the run - and
    /// achievement evaluation follows the append.
    pub fn stop_session(&mut self) -> Option<Vec<Event>> {
        let now = self.clock.now();
        let mut timer = self.session.take()?;
        let stopped = timer.stop(&mut self.store, now)?;
        let mut events = vec![stopped];
        events.extend(self.evaluate(None));
        Some(events)
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Save whatever is dirty. On failure the in-memory state is retained
    /// (and stays dirty) so a later flush retries.
    pub fn flush(&mut self) -> Result<()> {
        if self.store.is_dirty() {
            self.codec.save_store(&mut self.store)?;
        }
        if self.achievements_dirty {
            self.codec.save_achievements(&self.achievements)?;
            self.achievements_dirty = false;
        }
        Ok(())
    }

    /// Flush variant for periodic autosave: failures are a transient
    /// warning, not an error.
    pub fn try_flush(&mut self) {
        if let Err(err) = self.flush() {
            warn!(%err, "flush failed, keeping state in memory for retry");
        }
    }

    /// Produce the re-importable export superset document.
    pub fn export(&self) -> ExportDocument {
        self.codec
            .export(&self.store, &self.achievements, self.clock.now())
    }

    /// Replace live state from an export document and persist both parts.
    pub fn import(&mut self, doc: ExportDocument) -> Result<()> {
        let (store, achievements) = self.codec.import(doc)?;
        self.store = store;
        self.achievements = achievements;
        self.achievements_dirty = false;
        Ok(())
    }

    /// Replace everything with the default empty state and persist it.
    pub fn reset(&mut self) -> Result<()> {
        self.store = ActivityStore::new(self.clock.today());
        self.store.mark_dirty();
        self.achievements = AchievementState::default();
        self.codec.save_store(&mut self.store)?;
        self.codec.save_achievements(&self.achievements)?;
        self.achievements_dirty = false;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn evaluate(&mut self, mood_hour: Option<u32>) -> Vec<Event> {
        let now = self.clock.now();
        let level_before = self.store.level;
        let unlocked = AchievementEngine::evaluate(
            &mut self.store,
            &mut self.achievements,
            now,
            mood_hour,
        );
        let mut events = Vec::new();
        for def in unlocked {
            info!(id = def.id, xp = def.xp, "achievement unlocked");
            self.achievements_dirty = true;
            events.push(Event::AchievementUnlocked {
                id: def.id.to_string(),
                name: def.name.to_string(),
                xp: def.xp,
                at: now,
            });
        }
        if self.store.level > level_before {
            events.push(Event::LevelUp {
                level: self.store.level,
                at: now,
            });
        }
        events
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse::<bool>()
        .map_err(|_| {
            crate::error::ValidationError::InvalidValue {
                field: key.to_string(),
                message: format!("expected true or false, got '{value}'"),
            }
            .into()
        })
}
