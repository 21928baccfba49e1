use clap::Subcommand;

use super::{open_service, print_unlocks, CliResult};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record a mood entry
    Log {
        /// Mood on a 1-5 scale
        #[arg(long, conflicts_with_all = ["emotion", "intensity", "color"])]
        value: Option<u8>,
        /// Emotion-wheel selection name
        #[arg(long, requires = "intensity")]
        emotion: Option<String>,
        /// Wheel color for the emotion
        #[arg(long, default_value = "#6366f1")]
        color: String,
        /// Emotion intensity on a 1-10 scale
        #[arg(long)]
        intensity: Option<u8>,
        /// Contextual factor tag (repeatable)
        #[arg(long = "factor")]
        factors: Vec<String>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },
    /// List recorded moods
    List {
        /// Most recent N entries
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: MoodAction) -> CliResult {
    match action {
        MoodAction::Log {
            value,
            emotion,
            color,
            intensity,
            factors,
            note,
        } => {
            let mut svc = open_service()?;
            let events = match (value, emotion) {
                (Some(value), None) => svc.log_mood_scale(value, factors, note)?,
                (None, Some(emotion)) => {
                    let intensity = intensity.ok_or("--emotion requires --intensity")?;
                    svc.log_mood_wheel(&emotion, &color, intensity, factors, note)?
                }
                _ => return Err("select a mood: either --value or --emotion".into()),
            };
            svc.flush()?;
            println!("Mood saved.");
            print_unlocks(&events);
        }
        MoodAction::List { limit, json } => {
            let svc = open_service()?;
            let moods: Vec<_> = svc.store().moods.iter().rev().take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&moods)?);
            } else {
                for mood in moods {
                    match &mood.kind {
                        mindwell_core::store::MoodKind::Scale { value } => {
                            println!("{}  {}/5", mood.date.format("%Y-%m-%d %H:%M"), value);
                        }
                        mindwell_core::store::MoodKind::Wheel {
                            emotion, intensity, ..
                        } => {
                            println!(
                                "{}  {} ({}/10)",
                                mood.date.format("%Y-%m-%d %H:%M"),
                                emotion,
                                intensity
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
