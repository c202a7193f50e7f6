use clap::{Parser, Subcommand};
use pushy::commands::*;
use pushy::core::{command_init::AuthorOverride, error::Result, print_error};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pushy")]
#[command(about = "Publish site content changes to git from the admin panel")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Directory inside the site's git working tree; the site root must be the working-tree root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pending changes as JSON
    ReadItems,
    /// Publish the selection read from stdin as one commit
    PublishItems {
        /// Author name for the commit
        #[arg(long)]
        author_name: Option<String>,
        /// Author email for the commit
        #[arg(long)]
        author_email: Option<String>,
    },
    /// Show the pending changes
    Status,
    /// Print the number of pending changes
    Count,
    /// Check the git installation and repository
    Check,
    /// Route a raw admin request, body on stdin
    Request {
        /// Task name, e.g. "readItems" or "pushy:publishItems"
        task: String,
    },
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let options = GlobalOptions {
        repo: cli.repo,
        config: cli.config,
    };

    let result: Result<()> = match cli.command {
        Commands::ReadItems => execute_read_items(&options),
        Commands::PublishItems {
            author_name,
            author_email,
        } => execute_publish_items(
            &options,
            &AuthorOverride {
                name: author_name,
                email: author_email,
            },
        ),
        Commands::Status => execute_status(&options),
        Commands::Count => execute_count(&options),
        Commands::Check => execute_check(&options),
        Commands::Request { task } => execute_request(&options, &task),
    };

    if let Err(e) = result {
        log::debug!("Command failed: {e:?}");
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
