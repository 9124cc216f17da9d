use toml::Table;
use toml::Value;
use crate::options::Options;
use crate::error::AppError;

fn get_str_val<'a>(val: &'a Value, err: &'static str) -> Result<&'a str, AppError> {
    if !val.is_str() {
        return Err(AppError::ConfigParseError(err));
    }
    val.as_str().ok_or(AppError::Unknown)
}

fn get_int_val(val: &Value, err: &'static str) -> Result<i64, AppError> {
    if !val.is_integer() {
        return Err(AppError::ConfigParseError(err));
    }
    val.as_integer().ok_or(AppError::Unknown)
}

fn get_float_val(val: &Value, err: &'static str) -> Result<f64, AppError> {
    if !val.is_float() {
        return Err(AppError::ConfigParseError(err));
    }
    val.as_float().ok_or(AppError::Unknown)
}

fn get_bool_val(val: &Value, err: &'static str) -> Result<bool, AppError> {
    if !val.is_bool() {
        return Err(AppError::ConfigParseError(err));
    }
    val.as_bool().ok_or(AppError::Unknown)
}

pub fn parse_toml_config(content: &str, options: &mut Options) -> Result<(), AppError> {

    let toml_config: Table = toml::from_str(content)?;

    if let Some(default_context) = toml_config.get("default_context") {

        let context_name = get_str_val(default_context, "default_context must be a string value")?;

        let context_value = toml_config.get(context_name)
            .ok_or(AppError::ConfigParseError("configuration for the default context is not specified"))?;

        let ct = context_value.as_table().ok_or(AppError::Unknown)?;

        if let Some(val) = ct.get("model") {
            options.model.replace(get_str_val(val,"model must be a string value")?.to_owned());
        }

        if let Some(val) = ct.get("model_provider") {
            options.model_provider.replace(get_str_val(val, "model_provider must be a string value")?.to_owned());
        }

        if let Some(val) = ct.get("api_key") {
            options.api_key.replace(get_str_val(val,"api_key must be a string value")?.to_owned());
        }

        if let Some(val) = ct.get("api_url") {
            options.api_url.replace(get_str_val(val,"api_url must be a string value")?.to_owned());
        }

        if let Some(val) = ct.get("api_version") {
            options.api_version.replace(get_str_val(val,"api_version must be a string value")?.to_owned());
        }

        if let Some(val) = ct.get("max_tokens") {
            options.max_tokens.replace(get_int_val(val,"max_tokens must be an integer value")?);
        }

        if let Some(val) = ct.get("temperature") {
            options.temperature.replace(get_float_val(val,"temperature must be a float value")?);
        }

        if let Some(val) = ct.get("top_p") {
            options.top_p.replace(get_float_val(val,"top_p must be a float value")?);
        }

        if let Some(val) = ct.get("top_k") {
            options.top_k.replace(get_int_val(val,"top_k must be an integer value")?);
        }

        if let Some(val) = ct.get("frequency_penalty") {
            options.frequency_penalty.replace(get_float_val(val,"frequency_penalty must be a float value")?);
        }

        if let Some(val) = ct.get("presence_penalty") {
            options.presence_penalty.replace(get_float_val(val,"presence_penalty must be a float value")?);
        }

        if let Some(val) = ct.get("max_attempts") {
            options.max_attempts.replace(get_int_val(val,"max_attempts must be an integer value")?);
        }

        if let Some(val) = ct.get("timeout") {
            options.timeout.replace(get_int_val(val,"timeout must be an integer value")?);
        }

        if let Some(val) = ct.get("rules") {
            options.rules.replace(get_str_val(val, "rules must be a string value")?.to_owned());
        }
    }

    if let Some(settings_section) = toml_config.get("settings") {
        if let Some(settings) = settings_section.as_table() {
            if let Some(verbose) = settings.get("verbose") {
                options.verbose = get_bool_val(verbose, "verbose must be a boolean value")?;
            }
        }
    }

    Ok(())
}
