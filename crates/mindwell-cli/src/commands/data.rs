use std::path::PathBuf;

use clap::Subcommand;

use mindwell_core::PersistenceCodec;

use super::{open_service, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Export everything (activity + achievements) to one JSON document
    Export {
        /// Output path; stdout if omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Import a previously exported document, replacing current data
    Import { path: PathBuf },
    /// Erase all stored data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    match action {
        DataAction::Export { output } => {
            let svc = open_service()?;
            let doc = svc.export();
            match output {
                Some(path) => {
                    PersistenceCodec::write_export(&path, &doc)?;
                    println!("Exported to {}.", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&doc)?),
            }
        }
        DataAction::Import { path } => {
            let doc = PersistenceCodec::read_export(&path)?;
            let mut svc = open_service()?;
            svc.import(doc)?;
            println!(
                "Imported {} moods, {} journals, {} breathing sessions.",
                svc.store().moods.len(),
                svc.store().journals.len(),
                svc.store().breathing_sessions.len()
            );
        }
        DataAction::Reset { yes } => {
            if !yes {
                return Err("refusing to erase data without --yes".into());
            }
            let mut svc = open_service()?;
            svc.reset()?;
            println!("All data reset.");
        }
    }
    Ok(())
}
