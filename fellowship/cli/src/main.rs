//! Fellowship CLI - query The One API from the command line

mod filter_expr;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use fellowship::model::{Model, Movie, Quote};
use fellowship::{CancellationToken, FellowshipClient, FellowshipConfig, FellowshipError, PageRequest};
use filter_expr::{FilterExprError, parse_filter};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fellowship")]
#[command(about = "Query movies and quotes from The One API", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// API key [default: $ONE_API_KEY]
    #[arg(long, global = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Base URL of the API [default: $ONE_API_BASE_URL or the public API]
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Movie resources
    Movies {
        #[command(subcommand)]
        command: MoviesCommand,
    },

    /// Quote resources
    Quotes {
        #[command(subcommand)]
        command: QuotesCommand,
    },
}

#[derive(Subcommand)]
enum MoviesCommand {
    /// List movies
    List(ListArgs),

    /// Fetch a single movie by id
    Get {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List the quotes of one movie
    Quotes {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum QuotesCommand {
    /// List quotes
    List(ListArgs),

    /// Fetch a single quote by id
    Get {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Maximum number of items per page
    #[arg(short, long)]
    limit: Option<u32>,

    /// 1-based page number
    #[arg(short, long)]
    page: Option<u32>,

    /// Filter expression, repeatable (e.g. "runtimeInMinutes>=160", "name=/ring/i", "!dialog")
    #[arg(short, long = "filter", value_name = "EXPR")]
    filters: Vec<String>,

    /// Print the whole response envelope (total, page, pages) instead of just the items
    #[arg(long)]
    envelope: bool,
}

impl ListArgs {
    fn request<M: Model>(&self) -> Result<PageRequest<M>, FilterExprError> {
        let filters = self
            .filters
            .iter()
            .map(|expr| parse_filter::<M>(expr))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageRequest::new()
            .maybe_limit(self.limit)
            .maybe_page(self.page)
            .filters(filters))
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fellowship(#[from] FellowshipError),

    #[error("invalid --filter: {0}")]
    FilterExpr(#[from] FilterExprError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("no {resource} found with id '{id}'")]
    NotFound { resource: &'static str, id: String },
}

fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v flags; default is WARN only
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,fellowship=info".to_string(),
            2 => "info,fellowship=debug".to_string(),
            _ => "debug,fellowship=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn build_client(cli: &Cli) -> Result<FellowshipClient, FellowshipError> {
    let mut config = match &cli.api_key {
        Some(key) => FellowshipConfig::new(key.clone()),
        None => FellowshipConfig::from_env()?,
    };
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }

    FellowshipClient::from_config(&config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list<M: Model>(response: fellowship::ApiResponse<M>, envelope: bool) -> Result<(), CliError> {
    if envelope {
        print_json(&response)
    } else {
        print_json(&response.docs)
    }
}

fn print_found<M: Model>(item: Option<M>, id: String) -> Result<(), CliError> {
    match item {
        Some(item) => print_json(&item),
        None => Err(CliError::NotFound { resource: M::NAME, id }),
    }
}

async fn run(command: Commands, client: FellowshipClient) -> Result<(), CliError> {
    match command {
        Commands::Movies { command } => match command {
            MoviesCommand::List(list) => {
                let response = client.movies().get_all_page(&list.request::<Movie>()?).await?;
                print_list(response, list.envelope)
            }
            MoviesCommand::Get { id } => {
                let movie = client.movies().get_by_id(&id).await?;
                print_found(movie, id)
            }
            MoviesCommand::Quotes { movie_id, list } => {
                let quotes = client.movies().get_quotes(&movie_id, &list.request::<Quote>()?).await?;
                print_json(&quotes)
            }
        },
        Commands::Quotes { command } => match command {
            QuotesCommand::List(list) => {
                let response = client.quotes().get_all_page(&list.request::<Quote>()?).await?;
                print_list(response, list.envelope)
            }
            QuotesCommand::Get { id } => {
                let quote = client.quotes().get_by_id(&id).await?;
                print_found(quote, id)
            }
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling request");
            ctrl_c.cancel();
        }
    });

    match run(cli.command, client.with_cancellation(token)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Fellowship(e)) if e.is_cancelled() => {
            eprintln!("Cancelled");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
