use serde_json::{Number, Value};
use crate::config::ModelProvider;
use crate::error::Error;
use crate::model::output_schema;

/// Interpret value as str
#[macro_export(local_inner_macros)]
macro_rules! val_as_str {
    ($val:expr, $element:literal) => {
        $val
            .as_str()
            .ok_or(Error::LLMResponseError(std::concat!("can't extract ", $element, " from LLM API response.")))?
    }
}

pub fn set_i64_param(payload: &mut Value, key: &str, val: &Option<i64>) {
    if let Some(v) = val {
        payload[key] = Value::Number(Number::from_i128(*v as i128).unwrap());
    }
}

pub fn set_f64_param(payload: &mut Value, key: &str, val: &Option<f64>) {
    if let Some(v) = val {
        if v.is_finite() {
            payload[key] = Value::Number(Number::from_f64(*v).unwrap());
        }
    }
}

/// Output schema in the flavor the provider accepts.
///
/// Gemini's `responseSchema` is an OpenAPI subset that rejects
/// `additionalProperties`, so those markers are stripped for GCP.
pub fn response_schema(provider: ModelProvider) -> Value {
    let mut schema = output_schema();

    match provider {
        ModelProvider::OpenAI | ModelProvider::Anthropic => {}
        ModelProvider::GCP => strip_additional_properties(&mut schema),
    }

    schema
}

fn strip_additional_properties(schema: &mut Value) {
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("additionalProperties");
        for (_, v) in obj.iter_mut() {
            strip_additional_properties(v);
        }
    }
}

/// Check for a provider-reported error in the response body.
pub fn check_for_error(response: &Value) -> Result<(), Error> {
    if let Some(error) = response.get("error") {
        let errmes = val_as_str!(error["message"], "error message").to_owned();
        return Err(Error::LLMErrorMessage(errmes));
    }
    Ok(())
}
