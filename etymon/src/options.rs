//! App initialization functions.

use anstyle::Style;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use std::ffi::OsString;
use std::str::FromStr;
use crate::error::AppError;
use crate::toml_parser::parse_toml_config;
use dirs::home_dir;

/// App options.
#[derive(Debug, Clone)]
pub struct Options {
    /// The word to decompose.
    pub word: Option<String>,
    /// Print the full decomposition as JSON.
    pub verbose: bool,
    /// Model provider.
    pub model_provider: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Model API URL.
    pub api_url: Option<String>,
    /// Model API version.
    pub api_version: Option<String>,
    /// Maximum number of tokens that will be generated.
    pub max_tokens: Option<i64>,
    /// Level of randomization when choosing tokens.
    pub temperature: Option<f64>,
    /// Only the tokens comprising the top_p probability mass will be considered.
    pub top_p: Option<f64>,
    /// Only k tokens with the most probability will be considered.
    pub top_k: Option<i64>,
    /// Penalize new tokens based on their existing frequency.
    pub frequency_penalty: Option<f64>,
    /// Penalize new tokens based on whether they appear in the text so far.
    pub presence_penalty: Option<f64>,
    /// Maximum number of decomposition attempts.
    pub max_attempts: Option<i64>,
    /// Request timeout in seconds.
    pub timeout: Option<i64>,
    /// Custom instructions to add to the etymology ruleset.
    pub rules: Option<String>,
}


macro_rules! check_and_set_float_arg {
    ($arg:literal, $m:ident, $option:expr) => {
        if let Some(x) = $m.get_one::<String>($arg) {
            if let Ok(val) = f64::from_str(x) {
                $option.replace(val);
            } else {
                return Err(AppError::InvalidArgError(concat!($arg, " must be floating point number")));
            }
        }
    }
}

macro_rules! check_and_set_positive_int_arg {
    ($arg:literal, $m:ident, $option:expr) => {
        if let Some(x) = $m.get_one::<String>($arg) {
            if let Ok(val) = x.parse::<i64>() {
                if val <= 0 { return Err(AppError::InvalidArgError(concat!($arg, " must be greater than zero"))) };
                $option.replace(val);
            } else {
                return Err(AppError::InvalidArgError(concat!($arg, " must be integer")));
            }
        }
    }
}

impl Options {

    /// Create new unfilled options.
    pub fn new() -> Self {
        Options {
            word: None,
            verbose: false,
            model_provider: None,
            model: None,
            api_key: None,
            api_url: None,
            api_version: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            max_attempts: None,
            timeout: None,
            rules: None,
        }
    }

    fn argument_parser<T>(args: impl IntoIterator<Item = T>) -> ArgMatches where T: Into<OsString> + Clone {
        let bold_underline = Style::new().underline().bold();
        let bold = Style::new().bold();

        Command::new("Etymon")
            .about("Etymon asks a language model to deconstruct a word into its etymological parts and validates the answer.")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::new("word")
                .long("word")
                .help("The word to deconstruct")
                .short('w')
                .env("ETYMON_WORD")
                .required(false)
            ).arg(
                Arg::new("verbose")
                .long("verbose")
                .help("Show the full decomposition as JSON")
                .short('v')
                .action(ArgAction::SetTrue)
                .required(false)
            ).arg(
                Arg::new("model")
                .long("model")
                .help("Inference model name")
                .short('m')
                .env("ETYMON_MODEL")
                .required(false)
            ).arg(
                Arg::new("model-provider")
                .long("model-provider")
                .help("Model provider, one of: openai, anthropic, gcp")
                .short('p')
                .env("ETYMON_MODEL_PROVIDER")
                .required(false)
            ).arg(
                Arg::new("api-key")
                .long("api-key")
                .help("LLM model API key")
                .short('k')
                .env("ETYMON_API_KEY")
                .required(false)
            ).arg(
                Arg::new("api-url")
                .long("api-url")
                .help("Model API URL")
                .short('u')
                .env("ETYMON_API_URL")
                .required(false)
            ).arg(
                Arg::new("config")
                .long("config")
                .help("Config file path")
                .short('c')
                .env("ETYMON_CONFIG")
                .required(false)
            ).arg(
                Arg::new("api-version")
                .long("api-version")
                .help("Model API version")
                .env("ETYMON_API_VERSION")
                .required(false)
            ).arg(
                Arg::new("max-tokens")
                .long("max-tokens")
                .help("Maximum number of tokens that will be generated")
                .env("ETYMON_MAX_TOKENS")
                .required(false)
            ).arg(
                Arg::new("temperature")
                .long("temperature")
                .help("Level of randomization when LLM choose tokens")
                .env("ETYMON_TEMPERATURE")
                .required(false)
            ).arg(
                Arg::new("top-p")
                .long("top-p")
                .help("Only the tokens comprising the top_p probability mass will be considered")
                .env("ETYMON_TOP_P")
                .required(false)
            ).arg(
                Arg::new("top-k")
                .long("top-k")
                .help("Only k tokens with the most probability will be considered")
                .env("ETYMON_TOP_K")
                .required(false)
            ).arg(
                Arg::new("frequency-penalty")
                .long("frequency-penalty")
                .help("Penalize new tokens based on their existing frequency")
                .env("ETYMON_FREQUENCY_PENALTY")
                .required(false)
            ).arg(
                Arg::new("presence-penalty")
                .long("presence-penalty")
                .help("Penalize new tokens based on whether they appear in the text so far")
                .env("ETYMON_PRESENCE_PENALTY")
                .required(false)
            ).arg(
                Arg::new("max-attempts")
                .long("max-attempts")
                .help("How many times to retry a rejected decomposition, feeding the issues back to the model")
                .env("ETYMON_MAX_ATTEMPTS")
                .required(false)
            ).arg(
                Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds, unlimited by default")
                .env("ETYMON_TIMEOUT")
                .required(false)
            ).arg(
                Arg::new("rules")
                .long("rules")
                .help("Custom instructions added to the etymology ruleset")
                .env("ETYMON_RULES")
                .required(false)
            )
            .after_help(format!("{bold_underline}Example:{bold_underline:#} {bold}

    etymon --word=unhappiness --model=gpt-4o --model-provider=openai --api-key=<your-key>{bold:#}

To start using the application you need to specify at least the word (--word), API provider (--model-provider), model name (--model), and API key (--api-key).
Etymon uses the configuration file .etymon.toml from user's home directory, or the one specified with -c option (see the sample_config.toml for the reference).
If it finds the configuration file it uses configuration options from the file.
The configuration options can be overridden with the command line arguments or environment variables."))
            .get_matches_from(args)
    }

    fn load_config_file(path: Option<&str>) -> Result<Option<String>, std::io::Error> {
        Ok(if let Some(p) = path {
            Some(std::fs::read_to_string(p)?)
        } else if let Some(mut p) = home_dir() {
            p.push(".etymon.toml");
            if std::fs::exists(p.as_path())? {
                Some(std::fs::read_to_string(p.as_path())?)
            } else {
                None
            }
        } else {
            None
        })
    }

    fn validate_mandatory_options(options: &Options) -> Result<(), AppError> {
        if options.word.is_none() {
            return Err(AppError::MissingArgError("word is not specified."));
        }
        if options.model.is_none() {
            return Err(AppError::MissingArgError("inference model is not specified."));
        }
        if options.model_provider.is_none() {
            return Err(AppError::MissingArgError("model provider is not specified."));
        }
        if options.api_key.is_none() {
            return Err(AppError::MissingArgError("API key is not specified."));
        }
        if let Some(word) = &options.word {
            if word.trim().is_empty() {
                return Err(AppError::InvalidArgError("word must be non-empty."));
            }
        }

        Ok(())
    }

    /// Load and validate options from env, command line arguments, config file.
    pub fn load<T>(args: impl IntoIterator<Item = T>) -> Result<Self, AppError>
        where T: Into<OsString> + Clone
    {
        let m = Self::argument_parser(args);

        let mut options = Options::new();

        let config_path = m.get_one("config").map(|s: &String| s.as_ref());

        if let Some(content) = Self::load_config_file(config_path)
            .map_err(|err| AppError::Error(format!("Error loading config file: {}", err)))?
        {
            parse_toml_config(&content, &mut options)?;
        }

        if let Some(x) = m.get_one::<String>("word") {
            options.word.replace(x.clone());
        }
        options.verbose = options.verbose || m.get_flag("verbose");
        if let Some(x) = m.get_one::<String>("model") {
            options.model.replace(x.clone());
        }
        if let Some(x) = m.get_one::<String>("model-provider") {
            options.model_provider.replace(x.clone());
        }
        if let Some(x) = m.get_one::<String>("api-key") {
            options.api_key.replace(x.clone());
        }
        if let Some(x) = m.get_one::<String>("api-url") {
            options.api_url.replace(x.clone());
        }
        if let Some(x) = m.get_one::<String>("api-version") {
            options.api_version.replace(x.clone());
        }
        if let Some(x) = m.get_one::<String>("max-tokens") {
            if let Ok(val) = x.parse::<i64>() {
                if val < 0 { return Err(AppError::InvalidArgError("max-tokens must be non-negative")) };
                options.max_tokens.replace(val);
            } else {
                return Err(AppError::InvalidArgError("max-tokens must be integer"));
            }
        }

        check_and_set_positive_int_arg!("top-k", m, options.top_k);
        check_and_set_positive_int_arg!("max-attempts", m, options.max_attempts);
        check_and_set_positive_int_arg!("timeout", m, options.timeout);

        check_and_set_float_arg!("temperature", m, options.temperature);
        check_and_set_float_arg!("top-p", m, options.top_p);
        check_and_set_float_arg!("frequency-penalty", m, options.frequency_penalty);
        check_and_set_float_arg!("presence-penalty", m, options.presence_penalty);

        if let Some(x) = m.get_one::<String>("rules") {
            options.rules.replace(x.clone());
        }

        Self::validate_mandatory_options(&options)?;

        Ok(options)
    }
}
