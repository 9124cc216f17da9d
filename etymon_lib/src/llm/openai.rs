use serde_json::{json, Value};
use crate::config::Config;
use crate::error::Error;
use crate::llm::{Agent, AgentOutput};
use crate::request::Client;
use crate::val_as_str;
use super::util;

pub struct OpenAIAgent {
    system_prompt: String,
    config: Config,
    client: Box<dyn Client>,
}

impl OpenAIAgent {
    pub(super) fn new(config: Config, client: Box<dyn Client>, system_prompt: String) -> Self {
        OpenAIAgent {
            system_prompt,
            config,
            client,
        }
    }

    fn prep_payload(&self, prompt: &str) -> Value {

        let mut payload = json!({
            "model": self.config.name,
            "messages": [
                {
                    "role": "system",
                    "content": self.system_prompt
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        util::set_f64_param(&mut payload, "frequency_penalty", &self.config.frequency_penalty);
        util::set_f64_param(&mut payload, "presence_penalty", &self.config.presence_penalty);
        util::set_f64_param(&mut payload, "top_p", &self.config.top_p);
        util::set_f64_param(&mut payload, "temperature", &self.config.temperature);
        util::set_i64_param(&mut payload, "max_completion_tokens", &self.config.max_tokens);

        payload["response_format"] = json!({
            "type": "json_schema",
            "json_schema": {
                "name": "word_output",
                "strict": true,
                "schema": util::response_schema(self.config.provider)
            }
        });

        payload
    }

    fn process_response(&self, response: Value) -> Result<AgentOutput, Error> {

        util::check_for_error(&response)?;

        let choice = response["choices"]
            .as_array()
            .and_then(|arr| arr.first())
            .ok_or(Error::LLMResponseError("unexpected answer format, response holds no choices."))?;

        let msg = &choice["message"];

        if !msg["refusal"].is_null() {
            let refusal = val_as_str!(msg["refusal"], "refusal content").to_owned();
            return Err(Error::LLMErrorMessage(refusal));
        }

        let content = val_as_str!(msg["content"], "message content").to_owned();

        // Strict schema mode means the content normally parses already;
        // anything that does not is left raw for the engine to diagnose.
        Ok(match serde_json::from_str(&content) {
            Ok(output) => AgentOutput::Parsed(output),
            Err(_) => AgentOutput::Raw(content),
        })
    }
}

impl Agent for OpenAIAgent {

    fn run(&self, prompt: &str) -> Result<AgentOutput, Error> {
        let payload = self.prep_payload(prompt);

        let token = format!("Bearer {}", self.config.api_key);
        let headers = &[("Authorization", token.as_ref())];

        let response = self.client.post_json(&self.config.api_url, payload, headers, &[])?;

        self.process_response(response)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelProvider;
    use crate::request::stub::StubClient;

    fn test_config() -> Config {
        Config {
            provider: "openai".try_into().expect("determine model provider"),
            name: "<model-name>".to_owned(),
            api_key: "<api-key>".to_owned(),
            api_url: "<api-uri>".to_owned(),
            api_version: None,
            max_tokens: Some(4096),
            temperature: Some(0.123),
            top_p: Some(0.345),
            top_k: Some(5),
            frequency_penalty: Some(-0.11),
            presence_penalty: Some(0.22),
            timeout_secs: None,
        }
    }

    fn expected_payload(config: &Config, sys_msg: &str, prompt: &str) -> Value {
        json!({
            "model": config.name,
            "messages": [
              {
                "role": "system",
                "content": sys_msg
              },
              {
                "role": "user",
                "content": prompt
              }
            ],
            "frequency_penalty": config.frequency_penalty.unwrap(),
            "max_completion_tokens": config.max_tokens.unwrap(),
            "presence_penalty": config.presence_penalty.unwrap(),
            "temperature": config.temperature.unwrap(),
            "top_p": config.top_p.unwrap(),
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "word_output",
                    "strict": true,
                    "schema": util::response_schema(ModelProvider::OpenAI)
                }
            }
        })
    }

    #[test]
    fn test_request_response_ok() {
        let config = test_config();
        let sys_msg = "test sys message";
        let prompt = "deconstruct 'runner'";

        let decomposition = json!({
            "thought": "run + -er",
            "parts": [
                {"id": "run", "text": "runn", "originalWord": "rinnan", "origin": "Old English", "meaning": "to move swiftly"},
                {"id": "er", "text": "er", "originalWord": "-ere", "origin": "Old English", "meaning": "agent suffix"}
            ],
            "combinations": [[
                {"id": "runner", "text": "runner", "definition": "one who runs", "sourceIds": ["run", "er"]}
            ]]
        });

        let expected_headers = vec![
            ("Authorization".to_owned(), format!("Bearer {}", config.api_key))
        ];
        let response_body = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": config.name,
            "choices": [{
              "index": 0,
              "message": {
                "role": "assistant",
                "content": decomposition.to_string(),
              },
              "finish_reason": "stop"
            }]
        });

        let client = Box::new(StubClient::new(expected_headers, vec![],
            expected_payload(&config, sys_msg, prompt), response_body));

        let agent = OpenAIAgent::new(config, client, sys_msg.to_owned());

        let output = agent.run(prompt).expect("receive response");

        if let AgentOutput::Parsed(word_output) = output {
            assert_eq!(word_output.parts.len(), 2);
            assert_eq!(word_output.final_combination().expect("final").text, "runner");
        } else {
            panic!("type mismatch");
        }
    }

    #[test]
    fn test_unparseable_content_stays_raw() {
        let config = test_config();
        let sys_msg = "test sys message";
        let prompt = "deconstruct 'runner'";

        let expected_headers = vec![
            ("Authorization".to_owned(), format!("Bearer {}", config.api_key))
        ];
        let response_body = json!({
            "choices": [{
              "index": 0,
              "message": {
                "role": "assistant",
                "content": "not a decomposition",
              },
              "finish_reason": "stop"
            }]
        });

        let client = Box::new(StubClient::new(expected_headers, vec![],
            expected_payload(&config, sys_msg, prompt), response_body));

        let agent = OpenAIAgent::new(config, client, sys_msg.to_owned());

        let output = agent.run(prompt).expect("receive response");

        if let AgentOutput::Raw(text) = output {
            assert_eq!(text, "not a decomposition");
        } else {
            panic!("type mismatch");
        }
    }

    #[test]
    fn test_request_response_err() {
        let config = test_config();
        let sys_msg = "test sys message";
        let prompt = "deconstruct 'runner'";
        let err_msg = "You exceeded your current quota, please check your plan and billing details.";

        let expected_headers = vec![
            ("Authorization".to_owned(), format!("Bearer {}", config.api_key))
        ];
        let response_body = json!({
            "error": {
                "code": "insufficient_quota",
                "message": err_msg,
                "type": "insufficient_quota"
            }
        });

        let client = Box::new(StubClient::new(expected_headers, vec![],
            expected_payload(&config, sys_msg, prompt), response_body));

        let agent = OpenAIAgent::new(config, client, sys_msg.to_owned());

        if let Err(Error::LLMErrorMessage(msg)) = agent.run(prompt) {
            assert_eq!(msg, err_msg);
        } else {
            panic!("type mismatch");
        }
    }

    #[test]
    fn test_refusal() {
        let config = test_config();
        let sys_msg = "test sys message";
        let prompt = "deconstruct 'runner'";

        let expected_headers = vec![
            ("Authorization".to_owned(), format!("Bearer {}", config.api_key))
        ];
        let response_body = json!({
            "choices": [{
              "index": 0,
              "message": {
                "role": "assistant",
                "refusal": "I can't help with that.",
              },
              "finish_reason": "stop"
            }]
        });

        let client = Box::new(StubClient::new(expected_headers, vec![],
            expected_payload(&config, sys_msg, prompt), response_body));

        let agent = OpenAIAgent::new(config, client, sys_msg.to_owned());

        if let Err(Error::LLMErrorMessage(msg)) = agent.run(prompt) {
            assert_eq!(msg, "I can't help with that.");
        } else {
            panic!("type mismatch");
        }
    }
}
