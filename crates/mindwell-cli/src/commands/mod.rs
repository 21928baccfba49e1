pub mod breathe;
pub mod chat;
pub mod community;
pub mod config;
pub mod data;
pub mod journal;
pub mod meditate;
pub mod mood;
pub mod prefs;
pub mod puzzle;
pub mod sleep;
pub mod stats;

use mindwell_core::{Event, PersistenceCodec, SystemClock, WellnessService};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the service against the default data directory.
pub fn open_service() -> Result<WellnessService<SystemClock>, Box<dyn std::error::Error>> {
    Ok(WellnessService::open(PersistenceCodec::new()?, SystemClock))
}

/// Print achievement and level notifications from a batch of events.
pub fn print_unlocks(events: &[Event]) {
    for event in events {
        match event {
            Event::AchievementUnlocked { name, xp, .. } => {
                println!("Achievement unlocked: {name} (+{xp} XP)");
            }
            Event::LevelUp { level, .. } => {
                println!("Level up! You're now level {level}.");
            }
            _ => {}
        }
    }
}
