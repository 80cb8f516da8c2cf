use std::time::Duration;

use bytes::Bytes;
use http::{Request, Response};
use localml_core::HttpTransport;

/// [`HttpTransport`] backed by a blocking `reqwest` client.
///
/// Requests wait for as long as the server takes unless the caller passes a
/// timeout; generation on a local model can run for minutes.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds a transport whose client has no overall request timeout.
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self { client })
    }
}

impl From<reqwest::blocking::Client> for ReqwestTransport {
    fn from(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Response<Bytes>> {
        let (parts, body) = request.into_parts();

        let mut builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.bytes()?;

        Ok(Response::builder().status(status).body(body)?)
    }
}
