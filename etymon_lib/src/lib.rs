//! Etymon-lib decomposes a word into its etymological parts with the help
//! of a hosted LLM, validating the structured answer and feeding failures
//! back to the model.
//!
//! ### Features
//!
//!  - several providers
//!  - strict semantic validation of the decomposition DAG
//!  - bounded retry with structured feedback
//!  - transport behind a trait, easy to stub in tests
//!
//! ### Providers
//!
//! - Anthropic (Claude models)
//! - OpeanAI (GPT models)
//! - Google Cloud Platform (Gemini)
//!
//! ### Examples
//!
//! ```rust no_run
//! use etymon_lib::decompose::Decomposer;
//! use etymon_lib::llm::get_agent;
//! use etymon_lib::prompt::system_prompt;
//! use etymon_lib::request::get_reqwest_client;
//! use etymon_lib::ModelProvider;
//! use etymon_lib::Config;
//!
//! let config = Config::new(ModelProvider::OpenAI, "gpt-4o".into(), "<api-key>".into(), "https://api.openai.com/v1/chat/completions".into());
//!
//! let reqwest_client = get_reqwest_client(None).expect("transport created");
//!
//! let agent = get_agent(config, reqwest_client, system_prompt(&None)).expect("agent created");
//!
//! let decomposer = Decomposer::new(agent);
//!
//! let output = decomposer.decompose_with_retry("unhappiness", 3).expect("valid decomposition");
//!
//! for part in output.parts.iter() {
//!     println!("{} ({})", part.text, part.meaning);
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

mod error;
mod config;
pub mod model;
pub mod prompt;
pub mod llm;
pub mod request;
pub mod decompose;

pub use error::Error;
pub use config::Config;
pub use config::ModelProvider;
