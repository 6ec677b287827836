use std::path::PathBuf;

use booking_config::PathManager;
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{book, config, movies, user};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "screenbook")]
#[command(about = "Screenbook - browse the movie catalog and book showtime dates")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log to a daily-rotating file instead of stderr. Without a value, the
    /// default log location is used.
    #[arg(long, global = true, value_name = "FILE", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    #[command(long_about = "Register, inspect, rename and delete users. Users are identified by a server-generated id; every authenticated action refreshes their last-active timestamp.")]
    User {
        #[command(subcommand)]
        cmd: UserCommands,
    },
    /// List the movie catalog
    Movies,
    /// Show one movie
    Movie {
        /// Movie id
        movie_id: String,
    },
    /// Show the showtime schedule
    Showtimes,
    /// Rate a movie on behalf of a user
    #[command(long_about = "Set a movie's rating. The rating must be a number between 0 and 10; decimals are allowed.")]
    Rate {
        /// Acting user id
        user_id: String,
        /// Movie id
        movie_id: String,
        /// New rating in [0, 10]
        rating: String,
    },
    /// Book a movie for a showtime date
    #[command(long_about = "Book a movie for a user on a date in YYYYMMDD format. The date must be scheduled in the showtime calendar, the movie must exist in the catalog and be playing that date, and the same movie cannot be booked twice for one date.")]
    Book {
        /// Acting user id
        user_id: String,
        /// Showtime date (YYYYMMDD)
        date: String,
        /// Movie id
        movie: String,
    },
    /// Show a user's bookings, enriched with movie metadata
    #[command(long_about = "Show a user's bookings with each movie id resolved against the live catalog. Movies missing from the catalog are kept as id-only entries. Use --all to dump every raw ledger record instead.")]
    Bookings {
        /// User to list bookings for
        #[arg(required_unless_present = "all")]
        user_id: Option<String>,

        /// Dump every raw ledger record
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "user_id")]
        all: bool,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Add {
        /// Display name
        name: String,
    },
    /// List all users
    List,
    /// Show one user
    Show {
        /// User id
        user_id: String,
    },
    /// Change a user's display name
    Rename {
        /// User id
        user_id: String,
        /// New display name
        name: String,
    },
    /// Delete a user
    Rm {
        /// User id
        user_id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (endpoints, ledger mode, storage paths)
    Show,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .map(|value| value.unwrap_or_else(|| PathManager::default().log_file()));
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config = commands::load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::User { cmd } => {
            let service = commands::build_service(&config)?;
            user::run_user(cmd, &service, &output).await
        }
        Commands::Movies => {
            let service = commands::build_service(&config)?;
            movies::run_movies(&service, &output).await
        }
        Commands::Movie { movie_id } => {
            let service = commands::build_service(&config)?;
            movies::run_movie(&movie_id, &service, &output).await
        }
        Commands::Showtimes => {
            let service = commands::build_service(&config)?;
            movies::run_showtimes(&service, &output).await
        }
        Commands::Rate {
            user_id,
            movie_id,
            rating,
        } => {
            let service = commands::build_service(&config)?;
            movies::run_rate(&user_id, &movie_id, &rating, &service, &output).await
        }
        Commands::Book {
            user_id,
            date,
            movie,
        } => {
            let service = commands::build_service(&config)?;
            book::run_book(&user_id, &date, &movie, &service, &output).await
        }
        Commands::Bookings { user_id, all } => {
            let service = commands::build_service(&config)?;
            book::run_bookings(user_id.as_deref(), all, &service, &output).await
        }
        Commands::Config { cmd } => {
            config::run_config(cmd, cli.config.as_ref(), &config, &output).await
        }
    }
}
