use clap::{Parser, Subcommand};

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "aqualog", version, about = "Aqualog hydration tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// First-run onboarding: biometrics, times, goal computation
    Onboard(commands::onboard::OnboardArgs),
    /// Profile and preferences
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Daily water goal
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Log and inspect water intake
    Drink {
        #[command(subcommand)]
        action: commands::drink::DrinkAction,
    },
    /// Weekly and monthly history views
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Hydration reminder schedule
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Onboard(args) => commands::onboard::run(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Drink { action } => commands::drink::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Remind { action } => commands::remind::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
