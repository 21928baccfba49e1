use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mindwell", version, about = "Mindwell wellness tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mood tracking
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Journaling
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Sleep logging
    Sleep {
        #[command(subcommand)]
        action: commands::sleep::SleepAction,
    },
    /// Meditation logging
    Meditate {
        #[command(subcommand)]
        action: commands::meditate::MeditateAction,
    },
    /// Guided breathing sessions
    Breathe {
        #[command(subcommand)]
        action: commands::breathe::BreatheAction,
    },
    /// Community posts
    Community {
        #[command(subcommand)]
        action: commands::community::CommunityAction,
    },
    /// Companion chat log
    Chat {
        #[command(subcommand)]
        action: commands::chat::ChatAction,
    },
    /// Puzzle completion tracking
    Puzzle {
        #[command(subcommand)]
        action: commands::puzzle::PuzzleAction,
    },
    /// Streak, score, and achievement statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// User preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Export, import, and reset of the stored documents
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Sleep { action } => commands::sleep::run(action),
        Commands::Meditate { action } => commands::meditate::run(action),
        Commands::Breathe { action } => commands::breathe::run(action),
        Commands::Community { action } => commands::community::run(action),
        Commands::Chat { action } => commands::chat::run(action),
        Commands::Puzzle { action } => commands::puzzle::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
