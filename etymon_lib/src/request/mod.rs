//! API transport.
mod reqwest;

#[cfg(test)]
pub mod stub;

use std::time::Duration;
use serde_json::Value;
use crate::error::Error;
use self::reqwest::ReqwestClient;

/// Request client.
pub trait Client {
    /// Post a JSON payload and receive the JSON response.
    fn post_json(&self, url: &str, payload: Value, headers: &[(&str, &str)], params: &[(&str, &str)]) -> Result<Value, Error>;
}

/// Create reqwest-backed client with an optional request timeout.
pub fn get_reqwest_client(timeout: Option<Duration>) -> Result<Box<dyn Client>, Error> {
    Ok(Box::new(ReqwestClient::new(timeout)?))
}
