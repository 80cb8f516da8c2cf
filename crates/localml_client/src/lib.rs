use http::{Method, Request, header};
use localml_core::{ChatError, ClientConfig, Dialect, Endpoints, HttpTransport};
use secrecy::ExposeSecret;
use serde_json::Value;

mod chat;
mod detect;
mod list_models;
mod transport;

pub use detect::{PROBE_TIMEOUT, detect};
pub use transport::ReqwestTransport;

/// Persona used by [`LocalClient::send_prompt`] when no system prompt is given.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a senior application security engineer.";

/// Chat client for a local OpenWebUI or Ollama server.
///
/// The backend dialect is probed once when the client is built and the
/// resulting endpoints are kept for the client's lifetime.
pub struct LocalClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    config: ClientConfig,
    dialect: Dialect,
    endpoints: Endpoints,
}

impl LocalClient<ReqwestTransport> {
    /// Builds a client over a fresh [`ReqwestTransport`], probing the backend.
    ///
    /// Fails only when the HTTP client itself cannot be set up.
    pub fn connect(config: ClientConfig) -> Result<Self, ChatError> {
        let transport = ReqwestTransport::new().map_err(ChatError::RequestBuildFailed)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: HttpTransport> LocalClient<T> {
    /// Probes `config`'s base URL to decide the dialect. Never fails: an
    /// unreachable backend is classified as [`Dialect::Unknown`].
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let dialect = detect(&transport, config.get_base_url(), config.get_token());
        Self::with_dialect(transport, config, dialect)
    }

    /// Builds a client for a backend whose dialect is already known.
    pub fn with_dialect(transport: T, config: ClientConfig, dialect: Dialect) -> Self {
        let endpoints = dialect.endpoints(config.get_base_url());
        Self {
            transport,
            config,
            dialect,
            endpoints,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends an authorized request and parses a successful body as JSON.
    fn execute_json(&self, method: Method, url: &str, body: Vec<u8>) -> Result<Value, ChatError> {
        let request = authorized(method, url, self.config.get_token().expose_secret())
            .body(body)
            .map_err(|this| ChatError::RequestBuildFailed(anyhow::Error::new(this)))?;

        let response = self
            .transport
            .execute(request, None)
            .map_err(ChatError::ResponseFetchFailed)?;

        if !response.status().is_success() {
            return Err(ChatError::RequestError {
                status: response.status(),
                body: String::from_utf8_lossy(response.body()).into_owned(),
            });
        }

        serde_json::from_slice(response.body())
            .map_err(|this| ChatError::ParseError(anyhow::Error::new(this)))
    }
}

/// Logs a failure the way the convenience methods report it, then drops it.
fn report(err: ChatError) {
    match err {
        ChatError::UnexpectedResponse { body } => tracing::error!("Unexpected response: {body}"),
        err => tracing::error!("Request failed: {err}"),
    }
}

fn authorized(method: Method, url: &str, token: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(url)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
}
