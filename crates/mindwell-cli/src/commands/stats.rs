use clap::Subcommand;
use serde::Serialize;

use mindwell_core::achievements::CATALOG;
use mindwell_core::ScoreBreakdown;

use super::{open_service, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Overall stats: streak, level, log counts, wellness score
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Achievement catalog with unlock state
    Achievements {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct StatsSummary {
    streak: u32,
    level: u32,
    total_xp: u32,
    moods: usize,
    journals: usize,
    breathing_sessions: usize,
    meditation_sessions: usize,
    sleep_logs: usize,
    community_posts: usize,
    puzzles_completed: u32,
    mindful_minutes: u64,
    wellness: ScoreBreakdown,
}

pub fn run(action: StatsAction) -> CliResult {
    match action {
        StatsAction::Show { json } => {
            let svc = open_service()?;
            let store = svc.store();
            let summary = StatsSummary {
                streak: store.streak,
                level: store.level,
                total_xp: store.total_xp,
                moods: store.moods.len(),
                journals: store.journals.len(),
                breathing_sessions: store.breathing_sessions.len(),
                meditation_sessions: store.meditation_sessions.len(),
                sleep_logs: store.sleep_logs.len(),
                community_posts: store.community_posts.len(),
                puzzles_completed: store.puzzles_completed,
                mindful_minutes: store.total_breathing_secs() / 60,
                wellness: svc.wellness(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Streak:            {} days", summary.streak);
                println!(
                    "Level:             {} ({} XP)",
                    summary.level, summary.total_xp
                );
                println!("Moods:             {}", summary.moods);
                println!("Journals:          {}", summary.journals);
                println!(
                    "Breathing:         {} sessions, {} mindful minutes",
                    summary.breathing_sessions, summary.mindful_minutes
                );
                println!("Meditations:       {}", summary.meditation_sessions);
                println!("Sleep logs:        {}", summary.sleep_logs);
                println!("Community posts:   {}", summary.community_posts);
                println!("Puzzles:           {}", summary.puzzles_completed);
                println!("Wellness score:    {}", summary.wellness.total);
                for component in &summary.wellness.components {
                    println!(
                        "  {:12} {:>5.1} / {}",
                        component.name, component.contribution, component.weight
                    );
                }
            }
        }
        StatsAction::Achievements { json } => {
            let svc = open_service()?;
            let state = svc.achievements();
            if json {
                let rows: Vec<serde_json::Value> = CATALOG
                    .iter()
                    .map(|def| {
                        serde_json::json!({
                            "id": def.id,
                            "name": def.name,
                            "description": def.description,
                            "xp": def.xp,
                            "unlocked": state.is_unlocked(def.id),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!(
                    "Unlocked {} of {}:",
                    state.unlocked_count(),
                    CATALOG.len()
                );
                for def in &CATALOG {
                    let mark = if state.is_unlocked(def.id) { "x" } else { " " };
                    println!("[{mark}] {:18} {} (+{} XP)", def.id, def.description, def.xp);
                }
            }
        }
    }
    Ok(())
}
