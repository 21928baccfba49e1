use clap::Subcommand;

use super::{open_service, CliResult};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show all preferences
    Show,
    /// Set a preference: reminderTime, theme, notifications, soundEnabled,
    /// or privacyMode
    Set { key: String, value: String },
}

pub fn run(action: PrefsAction) -> CliResult {
    match action {
        PrefsAction::Show => {
            let svc = open_service()?;
            println!("{}", serde_json::to_string_pretty(&svc.store().preferences)?);
        }
        PrefsAction::Set { key, value } => {
            let mut svc = open_service()?;
            svc.set_preference(&key, &value)?;
            svc.flush()?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}
