//! # Mindwell Core Library
//!
//! This library provides the core business logic for the Mindwell wellness
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI being a thin
//! presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Activity Store**: Append-only logs of moods, journals, breathing and
//!   meditation sessions, sleep and community activity
//! - **Session Timer**: A deadline-based state machine for guided breathing,
//!   driven by the caller invoking `tick()` periodically
//! - **Storage**: JSON document persistence and TOML-based configuration
//! - **Achievements**: A fixed rule table evaluated after every append,
//!   unlocking milestones and awarding experience points
//! - **Wellness Score**: A weighted composite recomputed from the logs
//!
//! ## Key Components
//!
//! - [`ActivityStore`]: Aggregate root for all activity logs
//! - [`SessionTimer`]: Breathing session state machine
//! - [`PersistenceCodec`]: Document load/save boundary
//! - [`WellnessService`]: Explicitly constructed facade wiring it all together

pub mod achievements;
pub mod clock;
pub mod error;
pub mod events;
pub mod score;
pub mod service;
pub mod store;
pub mod streak;
pub mod timer;

pub use achievements::{AchievementDef, AchievementEngine, AchievementState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use score::{ScoreBreakdown, WellnessScorer};
pub use service::WellnessService;
pub use store::{
    ActivityRecord, ActivityStore, AppConfig, ExportDocument, PersistenceCodec, Preferences,
    SleepQuality,
};
pub use streak::{StreakTracker, StreakUpdate};
pub use timer::{BreathingTechnique, Phase, SessionState, SessionTimer};
