use serde_json::{json, Value};
use crate::config::Config;
use crate::error::Error;
use crate::llm::{Agent, AgentOutput};
use crate::request::Client;
use crate::val_as_str;
use super::util;

/// Anthropic has no native structured-output mode, so the schema rides
/// in the system prompt and the reply is handed back raw.
pub struct AnthropicAgent {
    system_prompt: String,
    config: Config,
    client: Box<dyn Client>,
}

impl AnthropicAgent {
    pub(super) fn new(config: Config, client: Box<dyn Client>, system_prompt: String) -> Result<Self, Error> {
        if config.api_version.is_none() {
            return Err(Error::MissingArgError("api-version is mandatory for anthropic."))
        }
        if config.max_tokens.is_none() {
            return Err(Error::MissingArgError("max-tokens is mandatory for anthropic."))
        }

        Ok(AnthropicAgent {
            system_prompt,
            config,
            client,
        })
    }

    fn prep_payload(&self, prompt: &str) -> Value {

        let schema = util::response_schema(self.config.provider);
        let system = format!(
            "{}\n\nYour answer MUST be a single JSON object conforming to this JSON schema:\n{}",
            self.system_prompt, schema);

        let mut payload = json!({
            "model": self.config.name,
            "system": system,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        util::set_i64_param(&mut payload, "max_tokens", &self.config.max_tokens);
        util::set_f64_param(&mut payload, "top_p", &self.config.top_p);
        util::set_i64_param(&mut payload, "top_k", &self.config.top_k);
        util::set_f64_param(&mut payload, "temperature", &self.config.temperature);

        payload
    }

    fn process_response(&self, response: Value) -> Result<AgentOutput, Error> {

        util::check_for_error(&response)?;

        for msg in response["content"]
            .as_array()
            .ok_or(Error::LLMResponseError("can't enumerate messages in the response."))?
        {
            let msg_type = val_as_str!(msg["type"], "message type");

            if "text" == msg_type {
                let text = val_as_str!(msg["text"], "message text").to_owned();
                return Ok(AgentOutput::Raw(text));
            }
        }

        Err(Error::LLMResponseError("response holds no text message."))
    }
}

impl Agent for AnthropicAgent {

    fn run(&self, prompt: &str) -> Result<AgentOutput, Error> {
        let payload = self.prep_payload(prompt);

        let version = self.config.api_version.clone().unwrap_or_default();
        let headers = &[
            ("x-api-key", self.config.api_key.as_ref()),
            ("anthropic-version", version.as_ref()),
        ];

        let response = self.client.post_json(&self.config.api_url, payload, headers, &[])?;

        self.process_response(response)
    }
}
