use std::time::Duration;
use reqwest::blocking::Client as BlockingClient;
use serde_json::Value;
use tracing::debug;
use crate::error::Error;
use crate::request::Client;

pub struct ReqwestClient {
    client: BlockingClient,
}

impl ReqwestClient {

    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = BlockingClient::builder();

        // reqwest applies a default timeout; None means wait indefinitely,
        // which matches the original behavior when no budget is configured.
        builder = builder.timeout(timeout);

        Ok(ReqwestClient {
            client: builder.build()?,
        })
    }
}

impl Client for ReqwestClient {

    fn post_json(&self, url: &str, payload: Value, headers: &[(&str, &str)], params: &[(&str, &str)]) -> Result<Value, Error> {

        debug!(url, "posting request");

        let mut request = self.client
            .post(url)
            .query(params)
            .json(&payload);

        for (k, v) in headers {
            request = request.header(*k, *v);
        }

        let response = request.send()?;

        let ret = response.json()?;
        Ok(ret)
    }
}
