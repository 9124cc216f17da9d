mod config;
mod error;
mod options;
mod report;
mod toml_parser;
mod util;

use std::time::Duration;
use error::AppError;
use etymon_lib::decompose::Decomposer;
use etymon_lib::llm::get_agent;
use etymon_lib::prompt::system_prompt;
use etymon_lib::request::get_reqwest_client;
use options::Options;
use config::Config;
use report::{print_result, ProgressReporter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn run_decomposition() -> Result<(), AppError> {
    let options = Options::load(std::env::args())?;
    let config: Config = options.try_into()?;

    debug!(word = %config.word, model = %config.model_params.name,
        attempts = config.max_attempts, "configuration loaded");

    let timeout = config.model_params.timeout_secs.map(Duration::from_secs);
    let reqwest_client = get_reqwest_client(timeout)?;

    let agent = get_agent(config.model_params.clone(), reqwest_client, system_prompt(&config.rules))?;

    let mut decomposer = Decomposer::new(agent);
    decomposer.add_observer(Box::new(ProgressReporter));

    let output = decomposer.decompose_with_retry(&config.word, config.max_attempts)?;

    print_result(&config.word, &output, config.verbose)
}

fn main() {
    // Matches the original behavior of sourcing a local .env file.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_decomposition() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
