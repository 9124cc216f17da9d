//! Decompose-validate-retry engine.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use crate::error::Error;
use crate::llm::{Agent, AgentOutput};
use crate::model::WordOutput;
use crate::prompt::decompose_prompt;

/// One failed attempt, fed back to the model as structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    /// What the model produced, parsed when possible, raw text otherwise.
    pub output: Value,
    /// Rules the attempt broke.
    pub issues: Vec<String>,
}

/// Observer of the decomposition lifecycle.
///
/// Observers are owned by the engine and notified explicitly. There is
/// no process-wide listener registration.
pub trait Observer {

    /// Attempt `n` for `word` is about to run.
    fn attempt(&self, n: usize, word: &str) {
        let _ = (n, word);
    }

    /// Attempt `n` was rejected with the listed issues.
    fn rejected(&self, n: usize, issues: &[String]) {
        let _ = (n, issues);
    }

    /// A valid decomposition of `word` was produced.
    fn completed(&self, word: &str, output: &WordOutput) {
        let _ = (word, output);
    }
}

/// Decomposition engine around a single-turn [`Agent`].
pub struct Decomposer {
    agent: Box<dyn Agent>,
    observers: Vec<Box<dyn Observer>>,
}

impl Decomposer {

    /// Create engine for the agent.
    pub fn new(agent: Box<dyn Agent>) -> Self {
        Decomposer {
            agent,
            observers: vec![],
        }
    }

    /// Register an observer.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Run one decomposition exchange for `word`.
    ///
    /// Failed `previous_attempts` are included in the prompt so the model
    /// can self-correct. The word is checked before any external call.
    /// Parse and validation failures carry the raw response text.
    pub fn decompose(&self, word: &str, previous_attempts: &[Attempt]) -> Result<WordOutput, Error> {
        if word.trim().is_empty() {
            return Err(Error::EmptyWord);
        }

        let prompt = decompose_prompt(word, previous_attempts)?;

        let output = self.agent.run(&prompt)?;

        self.resolve(word, output)
    }

    /// Bounded retry loop: up to `max_attempts` exchanges, each carrying
    /// all earlier failures as feedback. Recoverable failures (parse,
    /// validation) trigger another attempt; everything else propagates
    /// immediately. Exhaustion returns the last attempt's error.
    pub fn decompose_with_retry(&self, word: &str, max_attempts: usize) -> Result<WordOutput, Error> {
        if max_attempts == 0 {
            return Err(Error::Error("max attempts must be greater than zero".to_owned()));
        }

        let mut attempts: Vec<Attempt> = Vec::new();
        let mut last_error = Error::EmptyWord;

        for n in 1..=max_attempts {
            debug!(attempt = n, word, "running decomposition attempt");
            for observer in &self.observers {
                observer.attempt(n, word);
            }

            match self.decompose(word, &attempts) {
                Ok(output) => {
                    debug!(attempt = n, word, "decomposition accepted");
                    for observer in &self.observers {
                        observer.completed(word, &output);
                    }
                    return Ok(output);
                }
                Err(err) => {
                    if let Some(attempt) = attempt_from(&err) {
                        warn!(attempt = n, word, issues = attempt.issues.len(),
                            "decomposition rejected");
                        for observer in &self.observers {
                            observer.rejected(n, &attempt.issues);
                        }
                        attempts.push(attempt);
                        last_error = err;
                    } else {
                        return Err(err);
                    }
                }
            }
        }

        Err(last_error)
    }

    // The single place where the tagged agent output is resolved.
    fn resolve(&self, word: &str, output: AgentOutput) -> Result<WordOutput, Error> {
        let (raw, parsed) = match output {
            AgentOutput::Parsed(parsed) => (None, parsed),
            AgentOutput::Raw(text) => {
                match serde_json::from_str(strip_code_fence(&text)) {
                    Ok(parsed) => (Some(text), parsed),
                    Err(err) => {
                        return Err(Error::ParseError { raw: text, reason: err.to_string() });
                    }
                }
            }
        };

        match parsed.validate(word) {
            Ok(()) => Ok(parsed),
            Err(issues) => {
                let raw = raw.unwrap_or_else(||
                    serde_json::to_string(&parsed).unwrap_or_default());
                Err(Error::ValidationError { raw, issues })
            }
        }
    }
}

// Recoverable errors become feedback; anything else ends the loop.
fn attempt_from(err: &Error) -> Option<Attempt> {
    match err {
        Error::ParseError { raw, reason } => Some(Attempt {
            output: Value::String(raw.clone()),
            issues: vec![reason.clone()],
        }),
        Error::ValidationError { raw, issues } => Some(Attempt {
            output: serde_json::from_str(raw).unwrap_or(Value::String(raw.clone())),
            issues: issues.clone(),
        }),
        _ => None,
    }
}

/// Drop a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(body) = rest.strip_suffix("```") {
            return body.trim();
        }
    }

    trimmed
}
