use serde_json::{json, Value};
use crate::config::Config;
use crate::error::Error;
use crate::llm::{Agent, AgentOutput};
use crate::request::Client;
use crate::val_as_str;
use super::util;

pub struct GcpAgent {
    system_prompt: String,
    config: Config,
    client: Box<dyn Client>,
}

impl GcpAgent {
    pub(super) fn new(config: Config, client: Box<dyn Client>, system_prompt: String) -> Self {
        GcpAgent {
            system_prompt,
            config,
            client,
        }
    }

    fn prep_payload(&self, prompt: &str) -> Value {

        let mut payload = json!({
            "systemInstruction": {
                "parts":
                  { "text": self.system_prompt }
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": prompt}]
                }
            ]
        });

        payload["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": util::response_schema(self.config.provider)
        });

        util::set_i64_param(&mut payload["generationConfig"], "maxOutputTokens", &self.config.max_tokens);
        util::set_f64_param(&mut payload["generationConfig"], "topP", &self.config.top_p);
        util::set_i64_param(&mut payload["generationConfig"], "topK", &self.config.top_k);
        util::set_f64_param(&mut payload["generationConfig"], "temperature", &self.config.temperature);
        util::set_f64_param(&mut payload["generationConfig"], "presencePenalty", &self.config.presence_penalty);
        util::set_f64_param(&mut payload["generationConfig"], "frequencyPenalty", &self.config.frequency_penalty);

        payload
    }

    fn process_response(&self, response: Value) -> Result<AgentOutput, Error> {

        util::check_for_error(&response)?;

        let candidate = response["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .ok_or(Error::LLMResponseError("unexpected answer format, response holds no candidates."))?;

        let part = candidate["content"]["parts"]
            .as_array()
            .and_then(|arr| arr.first())
            .ok_or(Error::LLMResponseError("can't enumerate parts of the candidate."))?;

        let text = val_as_str!(part["text"], "candidate text").to_owned();

        // responseSchema constrains the reply, so it normally parses here.
        Ok(match serde_json::from_str(&text) {
            Ok(output) => AgentOutput::Parsed(output),
            Err(_) => AgentOutput::Raw(text),
        })
    }
}

impl Agent for GcpAgent {

    fn run(&self, prompt: &str) -> Result<AgentOutput, Error> {
        let payload = self.prep_payload(prompt);

        let params = &[("key", self.config.api_key.as_ref())];

        let response = self.client.post_json(&self.config.api_url, payload, &[], params)?;

        self.process_response(response)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::stub::StubClient;

    fn test_config() -> Config {
        Config {
            provider: "gcp".try_into().expect("determine model provider"),
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
            "systemInstruction": {
                "parts":
                  { "text": sys_msg }
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": prompt}]
                }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": util::response_schema(config.provider),
                "maxOutputTokens": config.max_tokens.unwrap(),
                "topP": config.top_p.unwrap(),
                "topK": config.top_k.unwrap(),
                "temperature": config.temperature.unwrap(),
                "presencePenalty": config.presence_penalty.unwrap(),
                "frequencyPenalty": config.frequency_penalty.unwrap(),
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

        let expected_params = vec![
            ("key".to_owned(), config.api_key.clone()),
        ];
        let response_body = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": decomposition.to_string()}
                    ],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        });

        let client = Box::new(StubClient::new(vec![], expected_params,
            expected_payload(&config, sys_msg, prompt), response_body));

        let agent = GcpAgent::new(config, client, sys_msg.to_owned());

        let output = agent.run(prompt).expect("receive response");

        if let AgentOutput::Parsed(word_output) = output {
            assert_eq!(word_output.final_combination().expect("final").text, "runner");
        } else {
            panic!("type mismatch");
        }
    }

    #[test]
    fn test_request_response_err() {
        let config = test_config();
        let sys_msg = "test sys message";
        let prompt = "deconstruct 'runner'";
        let err_msg = "API key not valid. Please pass a valid API key.";

        let expected_params = vec![
            ("key".to_owned(), config.api_key.clone()),
        ];
        let response_body = json!({
            "error": {
                "code": 400,
                "message": err_msg,
                "status": "INVALID_ARGUMENT"
            }
        });

        let client = Box::new(StubClient::new(vec![], expected_params,
            expected_payload(&config, sys_msg, prompt), response_body));

        let agent = GcpAgent::new(config, client, sys_msg.to_owned());

        if let Err(Error::LLMErrorMessage(msg)) = agent.run(prompt) {
            assert_eq!(msg, err_msg);
        } else {
            panic!("type mismatch");
        }
    }
}
