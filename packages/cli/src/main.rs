mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{inspect, rules, InspectArgs, RulesArgs};

/// Atelier CLI - debug surface for the editor state engine
#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which inspector controls a node exposes
    Inspect(InspectArgs),

    /// List the active dependency rules in application order
    Rules(RulesArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Inspect(args) => inspect(args),
        Command::Rules(args) => rules(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
