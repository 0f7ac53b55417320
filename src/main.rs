use anyhow::Result;
use clap::{Parser, Subcommand};
use fact_scout::cache::{FileStore, ResultCache};
use fact_scout::search::SearchApiClient;
use fact_scout::types::SearchQuery;
use fact_scout::{render, tui, utils, Config, ResultsController, ViewState};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Research-backed answers to your questions
#[derive(Parser, Debug)]
#[command(name = "fact-scout", version)]
#[command(about = "Research-backed answers to your questions", long_about = None)]
struct Args {
    /// Open the interactive view straight on this question
    #[arg(long = "q", value_name = "QUERY")]
    query: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer one question and print the result
    Ask {
        /// The question; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or empty the local result cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// List cached questions, oldest first
    List,
    /// Remove every cached answer
    Clear,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = Config::from_env()?;

    match args.command {
        None => {
            // the TUI owns the terminal, so log to a file
            let _guard = utils::init_file_logger(&config.logging)?;
            let controller = build_controller(&config)?;
            tui::run(controller, args.query).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Ask { query, json }) => {
            utils::init_logger(&config.logging);
            ask(&config, &query.join(" "), json).await
        }
        Some(Command::Cache { action }) => {
            utils::init_logger(&config.logging);
            let mut cache = ResultCache::new(FileStore::open(&config.cache.dir)?);
            match action {
                CacheAction::List => {
                    let queries = cache.queries()?;
                    if queries.is_empty() {
                        println!("No cached answers");
                    }
                    for query in queries {
                        println!("{}", query);
                    }
                }
                CacheAction::Clear => {
                    let removed = cache.clear()?;
                    println!("Removed {} cached answer(s)", removed);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_controller(config: &Config) -> Result<ResultsController<FileStore>> {
    let store = FileStore::open(&config.cache.dir)?;
    info!("Result cache at {:?}", store.path());

    let client = SearchApiClient::from_config(&config.api)?;
    Ok(ResultsController::with_capacity(
        Arc::new(client),
        ResultCache::new(store),
        config.cache.max_entries,
    ))
}

async fn ask(config: &Config, raw: &str, json: bool) -> Result<ExitCode> {
    let query = SearchQuery::parse(raw)?;
    let mut controller = build_controller(config)?;

    match controller.load(query).await {
        ViewState::Success { response, .. } if json => {
            println!("{}", serde_json::to_string_pretty(response)?);
            Ok(ExitCode::SUCCESS)
        }
        state @ ViewState::Success { .. } => {
            print!("{}", render::render_plain(state));
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Error { kind, .. } => {
            eprintln!("{}", kind.user_message());
            Ok(ExitCode::FAILURE)
        }
        // load always settles on Success or Error
        ViewState::Idle | ViewState::Loading { .. } => Ok(ExitCode::FAILURE),
    }
}
