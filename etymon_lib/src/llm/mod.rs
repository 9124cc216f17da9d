//! LLM agent interface.
mod openai;
mod anthropic;
mod gcp;
mod util;

use crate::config::{Config, ModelProvider};
use crate::error::Error;
use crate::model::WordOutput;
use crate::request::Client;
use self::anthropic::AnthropicAgent;
use self::gcp::GcpAgent;
use self::openai::OpenAIAgent;

/// What an agent run produced.
///
/// Providers that enforce the output schema natively hand back `Parsed`
/// when the response already parses; everything else arrives as `Raw`
/// and is resolved by the decompose engine in one place.
pub enum AgentOutput {
    /// Raw response text, not yet parsed.
    Raw(String),
    /// Response pre-validated against the output schema by the provider.
    Parsed(WordOutput),
}

/// Single-turn word-decomposition agent. Stateless: every run is an
/// independent exchange with no history.
pub trait Agent {

    /// Send the prompt to the model and return its output.
    fn run(&self, prompt: &str) -> Result<AgentOutput, Error>;
}

/// Create an [`Agent`] for the configured provider.
pub fn get_agent(config: Config, client: Box<dyn Client>, system_prompt: String) -> Result<Box<dyn Agent>, Error> {
    Ok(match config.provider {
        ModelProvider::OpenAI => Box::new(OpenAIAgent::new(config, client, system_prompt)),
        ModelProvider::Anthropic => Box::new(AnthropicAgent::new(config, client, system_prompt)?),
        ModelProvider::GCP => Box::new(GcpAgent::new(config, client, system_prompt)),
    })
}
