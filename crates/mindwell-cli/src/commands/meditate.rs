use clap::Subcommand;

use super::{open_service, print_unlocks, CliResult};

#[derive(Subcommand)]
pub enum MeditateAction {
    /// Record a completed meditation
    Log {
        /// Meditation name, e.g. "Body Scan"
        name: String,
        #[arg(long, default_value = "relaxation")]
        category: String,
        #[arg(long)]
        minutes: u32,
    },
    /// List meditation sessions
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: MeditateAction) -> CliResult {
    match action {
        MeditateAction::Log {
            name,
            category,
            minutes,
        } => {
            let mut svc = open_service()?;
            let events = svc.log_meditation(&name, &category, minutes);
            svc.flush()?;
            println!("Meditation logged: {name} ({minutes} min).");
            print_unlocks(&events);
        }
        MeditateAction::List { limit, json } => {
            let svc = open_service()?;
            let sessions: Vec<_> = svc
                .store()
                .meditation_sessions
                .iter()
                .rev()
                .take(limit)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else {
                for session in sessions {
                    println!(
                        "{}  {}  {} min",
                        session.date.format("%Y-%m-%d %H:%M"),
                        session.name,
                        session.duration
                    );
                }
            }
        }
    }
    Ok(())
}
