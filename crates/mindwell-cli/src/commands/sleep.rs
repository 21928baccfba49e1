use clap::Subcommand;

use mindwell_core::SleepQuality;

use super::{open_service, print_unlocks, CliResult};

#[derive(Subcommand)]
pub enum SleepAction {
    /// Record last night's sleep
    Log {
        /// Bedtime as HH:MM
        #[arg(long)]
        bedtime: String,
        /// Wake time as HH:MM
        #[arg(long)]
        wake: String,
        /// Quality: excellent, good, fair, or poor
        #[arg(long)]
        quality: Option<String>,
        /// Dream notes
        #[arg(long)]
        dreams: Option<String>,
    },
    /// List sleep logs
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SleepAction) -> CliResult {
    match action {
        SleepAction::Log {
            bedtime,
            wake,
            quality,
            dreams,
        } => {
            let quality = match quality {
                Some(q) => Some(
                    SleepQuality::parse(&q)
                        .ok_or_else(|| format!("unknown sleep quality '{q}'"))?,
                ),
                None => None,
            };
            let mut svc = open_service()?;
            let events = svc.log_sleep(&bedtime, &wake, quality, dreams)?;
            svc.flush()?;
            let log = svc.store().sleep_logs.last().expect("log just appended");
            println!("Sleep logged: {:.1} hours.", log.duration_hours);
            print_unlocks(&events);
        }
        SleepAction::List { limit, json } => {
            let svc = open_service()?;
            let logs: Vec<_> = svc.store().sleep_logs.iter().rev().take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&logs)?);
            } else {
                for log in logs {
                    println!(
                        "{}  {} -> {}  {:.1}h",
                        log.date.format("%Y-%m-%d"),
                        log.bedtime,
                        log.wake_time,
                        log.duration_hours
                    );
                }
            }
        }
    }
    Ok(())
}
