use clap::Subcommand;

use super::{open_service, CliResult};

#[derive(Subcommand)]
pub enum PuzzleAction {
    /// Record one completed puzzle
    Complete,
    /// Show the completion counter
    Count,
}

pub fn run(action: PuzzleAction) -> CliResult {
    match action {
        PuzzleAction::Complete => {
            let mut svc = open_service()?;
            svc.record_puzzle_completion();
            svc.flush()?;
            println!(
                "Puzzles completed: {}.",
                svc.store().puzzles_completed
            );
        }
        PuzzleAction::Count => {
            let svc = open_service()?;
            println!("{}", svc.store().puzzles_completed);
        }
    }
    Ok(())
}
