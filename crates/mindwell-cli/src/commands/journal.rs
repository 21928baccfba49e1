use clap::Subcommand;

use super::{open_service, print_unlocks, CliResult};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write a journal entry
    Write {
        /// Entry body
        content: String,
        #[arg(long)]
        title: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List journal entries
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: JournalAction) -> CliResult {
    match action {
        JournalAction::Write {
            content,
            title,
            tags,
        } => {
            let mut svc = open_service()?;
            let events = svc.log_journal(title, &content, tags)?;
            svc.flush()?;
            let entry = svc.store().journals.last().expect("entry just appended");
            println!("Journal entry saved ({} words).", entry.word_count);
            print_unlocks(&events);
        }
        JournalAction::List { limit, json } => {
            let svc = open_service()?;
            let entries: Vec<_> = svc.store().journals.iter().rev().take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!(
                        "{}  {}  ({} words)",
                        entry.date.format("%Y-%m-%d %H:%M"),
                        entry.title.as_deref().unwrap_or("Untitled Entry"),
                        entry.word_count
                    );
                }
            }
        }
    }
    Ok(())
}
