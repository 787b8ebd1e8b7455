use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use pokedex_pipeline::app::{App, Pokedex};
use pokedex_pipeline::config::ConfigLoader;
use pokedex_pipeline::domain::{PokemonKey, SortKey};
use pokedex_pipeline::error::{FetchErrorKind, PokedexError};
use pokedex_pipeline::gateway::HttpTransport;
use pokedex_pipeline::output::{JsonOutput, ListResult};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Fetch enriched PokeAPI records, ranges and evolution lines")]
#[command(version)]
struct Cli {
    /// Path to a pokedex.json config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Show one enriched record by id or name")]
    Show { key: String },
    #[command(about = "Fetch a contiguous id range")]
    Range {
        #[arg(long, default_value_t = 1)]
        start: u32,
        #[arg(long)]
        count: Option<u32>,
        #[arg(long)]
        concurrency: Option<usize>,
    },
    #[command(about = "Show the evolution line of a pokemon id")]
    Evolution { id: u32 },
    #[command(about = "Load pages and search them by name")]
    Search {
        query: String,
        #[arg(long, value_enum, default_value_t = SortKey::Id)]
        sort: SortKey,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<PokedexError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &PokedexError) -> u8 {
    match error {
        PokedexError::InvalidIdentifier(_) | PokedexError::InvalidSortKey(_) => 2,
        PokedexError::Fetch(err) if err.is_not_found() => 2,
        PokedexError::Fetch(err) => match err.kind() {
            FetchErrorKind::Timeout | FetchErrorKind::Network => 3,
            FetchErrorKind::Decode => 1,
        },
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let transport = HttpTransport::new(config.timeout)?;
    let app = App::new(transport, &config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;
    runtime.block_on(run_command(cli.command, app))
}

async fn run_command(command: Command, app: App<HttpTransport>) -> miette::Result<()> {
    match command {
        Command::Show { key } => {
            let key: PokemonKey = key.parse()?;
            let pokemon = app.enrich(&key).await.map_err(PokedexError::from)?;
            JsonOutput::print_pokemon(&pokemon).into_diagnostic()
        }
        Command::Range {
            start,
            count,
            concurrency,
        } => {
            let count = count.unwrap_or(app.page_size());
            let concurrency = concurrency.unwrap_or(app.range_concurrency());
            let pokemon = app.fetch_range(start, count, concurrency).await;
            JsonOutput::print_list(&ListResult::new(pokemon)).into_diagnostic()
        }
        Command::Evolution { id } => {
            let pokedex = Pokedex::new(app);
            let line = pokedex.evolution_of(id).await;
            JsonOutput::print_list(&ListResult::new(line)).into_diagnostic()
        }
        Command::Search { query, sort, pages } => {
            let mut pokedex = Pokedex::new(app);
            for _ in 0..pages.max(1) {
                pokedex.load_more().await;
            }
            pokedex.set_query(query);
            pokedex.set_sort(sort);
            JsonOutput::print_list(&ListResult::new(pokedex.displayed())).into_diagnostic()
        }
    }
}
