use etymon_lib::Config as ModelParams;

use crate::{error::AppError, options::Options, util::api_url_for_provider};

const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// App config
#[derive(Clone, Debug)]
pub struct Config {
    /// The word to decompose
    pub word: String,
    /// Print the full decomposition as JSON
    pub verbose: bool,
    /// Model parameters
    pub model_params: ModelParams,
    /// Retry budget for rejected decompositions
    pub max_attempts: usize,
    /// Custom instructions to add to the etymology ruleset.
    pub rules: Option<String>,
}

impl TryFrom<Options> for Config {
    type Error = AppError;

    fn try_from(options: Options) -> Result<Self, AppError> {
        let model = options.model.unwrap();
        let provider = options.model_provider.unwrap().as_str().try_into()?;
        let default_url = api_url_for_provider(provider, &model);

        let model_params = ModelParams {
            provider,
            name: model.clone(),
            api_key: options.api_key.unwrap(),
            api_url: options.api_url.unwrap_or(default_url),
            api_version: options.api_version,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            timeout_secs: options.timeout.map(|t| t as u64),
        };

        Ok(Config {
            word: options.word.unwrap(),
            verbose: options.verbose,
            model_params,
            max_attempts: options.max_attempts.map(|m| m as usize).unwrap_or(DEFAULT_MAX_ATTEMPTS),
            rules: options.rules,
        })
    }
}

#[cfg(test)]
mod test {
    use etymon_lib::ModelProvider;

    use super::*;

    #[test]
    fn test_config_try_from() {
        let mut options = Options {
            word: Some("unhappiness".into()),
            verbose: true,
            model_provider: Some("anthropic".into()),
            model: Some("mdl".into()),
            api_key: Some("apk".into()),
            api_url: Some("apr".into()),
            api_version: Some("apv".into()),
            max_tokens: Some(1024),
            temperature: Some(7.44),
            top_p: Some(0.94),
            top_k: Some(7),
            frequency_penalty: Some(0.222),
            presence_penalty: Some(0.111),
            max_attempts: Some(5),
            timeout: Some(90),
            rules: Some("rls".into()),
        };

        let config = Config::try_from(options.clone()).expect("create from options");

        assert_eq!(config.word, "unhappiness".to_owned());
        assert!(config.verbose);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.rules, Some("rls".into()));
        assert!(matches!(config.model_params.provider, ModelProvider::Anthropic));
        assert_eq!(config.model_params.name, "mdl".to_owned());
        assert_eq!(config.model_params.api_key, "apk".to_owned());
        assert_eq!(config.model_params.api_url, "apr".to_owned());
        assert_eq!(config.model_params.api_version, Some("apv".into()));
        assert_eq!(config.model_params.max_tokens, Some(1024));
        assert_eq!(config.model_params.temperature, Some(7.44));
        assert_eq!(config.model_params.top_p, Some(0.94));
        assert_eq!(config.model_params.top_k, Some(7));
        assert_eq!(config.model_params.frequency_penalty, Some(0.222));
        assert_eq!(config.model_params.presence_penalty, Some(0.111));
        assert_eq!(config.model_params.timeout_secs, Some(90));

        options.max_attempts = None;

        let config = Config::try_from(options.clone()).expect("create from options");
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);

        options.api_url = None;

        let config = Config::try_from(options.clone()).expect("create from options");
        assert_eq!(config.model_params.api_url, "https://api.anthropic.com/v1/messages");

        options.model_provider = Some("gcp".into());

        let config = Config::try_from(options.clone()).expect("create from options");
        assert_eq!(config.model_params.api_url, "https://generativelanguage.googleapis.com/v1beta/models/mdl:generateContent");

        options.model_provider = Some("openai".into());

        let config = Config::try_from(options.clone()).expect("create from options");
        assert_eq!(config.model_params.api_url, "https://api.openai.com/v1/chat/completions");
    }
}
