//! Infoline CLI - A tool for collecting and reviewing school data entries

use clap::Parser;
use infoline::cli::{Cli, Commands};
use infoline::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = run(cli);

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> infoline::Result<()> {
    match cli.command {
        Some(Commands::Init { force, sample }) => {
            infoline::cli::commands::init::run(cli.cwd.as_deref(), force, sample, cli.dry_run)
        }
        Some(Commands::Enter {
            category,
            column,
            value,
            school,
        }) => infoline::cli::commands::enter::run(
            cli.cwd.as_deref(),
            &category,
            &column,
            &value,
            school.as_deref(),
            cli.dry_run,
        ),
        Some(Commands::Submit {
            category,
            column,
            school,
        }) => infoline::cli::commands::submit::run(
            cli.cwd.as_deref(),
            &category,
            column.as_deref(),
            school.as_deref(),
            cli.dry_run,
        ),
        Some(Commands::Approve {
            school,
            category,
            column,
        }) => infoline::cli::commands::approve::run(
            cli.cwd.as_deref(),
            &school,
            category.as_deref(),
            column.as_deref(),
            cli.dry_run,
        ),
        Some(Commands::Reject {
            school,
            reason,
            category,
            column,
        }) => infoline::cli::commands::reject::run(
            cli.cwd.as_deref(),
            &school,
            &reason,
            category.as_deref(),
            column.as_deref(),
            cli.dry_run,
        ),
        Some(Commands::Reopen {
            school,
            category,
            column,
        }) => infoline::cli::commands::reopen::run(
            cli.cwd.as_deref(),
            school.as_deref(),
            category.as_deref(),
            column.as_deref(),
            cli.dry_run,
        ),
        Some(Commands::List {
            json,
            school,
            category,
            status,
        }) => infoline::cli::commands::list::run(
            cli.cwd.as_deref(),
            json,
            school.as_deref(),
            category.as_deref(),
            status.as_deref(),
        ),
        Some(Commands::Show {
            category,
            column,
            school,
            json,
        }) => infoline::cli::commands::show::run(
            cli.cwd.as_deref(),
            &category,
            &column,
            school.as_deref(),
            json,
        ),
        Some(Commands::Status { school, json }) => {
            infoline::cli::commands::status::run(cli.cwd.as_deref(), school.as_deref(), json)
        }
        Some(Commands::Doctor { fix }) => {
            infoline::cli::commands::doctor::run(cli.cwd.as_deref(), fix)
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
