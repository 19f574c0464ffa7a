use clap::{Parser, Subcommand};
use pathfinder_core::{Config, Language};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "pathfinder-cli", version, about = "PathFinder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current session state as JSON
    Status,
    /// Discard the saved session and start fresh, as on app launch
    Boot,
    /// Complete the one-time setup
    Setup(commands::account::SetupArgs),
    /// Change the UI language (en, hi, te, ta, bn, gu)
    Language { code: Language },
    /// Log out; profile fields are kept
    Logout,
    /// Local profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Assessment flow
    Flow {
        #[command(subcommand)]
        action: commands::flow::FlowAction,
    },
    /// Completed assessments of this session
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Navigate to a page
    Nav(commands::nav::NavArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Backend API calls
    Remote {
        #[command(subcommand)]
        action: commands::remote::RemoteAction,
    },
}

/// Log to stderr so stdout stays machine-readable.
fn init_logging() {
    let env_filter = EnvFilter::try_from_env("PATHFINDER_LOG").unwrap_or_else(|_| {
        let config = Config::load_or_default();
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::account::status(),
        Commands::Boot => commands::account::boot(),
        Commands::Setup(args) => commands::account::setup(args),
        Commands::Language { code } => commands::account::language(code),
        Commands::Logout => commands::account::logout(),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Flow { action } => commands::flow::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Nav(args) => commands::nav::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Remote { action } => commands::remote::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
