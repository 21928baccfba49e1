use clap::Subcommand;

use super::{open_service, print_unlocks, CliResult};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Record one companion-chat exchange
    Log {
        /// Your message
        message: String,
        /// The companion's reply
        #[arg(long)]
        reply: String,
    },
    /// List logged exchanges
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ChatAction) -> CliResult {
    match action {
        ChatAction::Log { message, reply } => {
            let mut svc = open_service()?;
            let events = svc.record_ai_exchange(&message, &reply);
            svc.flush()?;
            println!("Exchange logged.");
            print_unlocks(&events);
        }
        ChatAction::List { limit, json } => {
            let svc = open_service()?;
            let exchanges: Vec<_> = svc
                .store()
                .ai_conversations
                .iter()
                .rev()
                .take(limit)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&exchanges)?);
            } else {
                for exchange in exchanges {
                    println!("{}  you: {}", exchange.date.format("%Y-%m-%d %H:%M"), exchange.user);
                    println!("{}  companion: {}", " ".repeat(16), exchange.ai);
                }
            }
        }
    }
    Ok(())
}
