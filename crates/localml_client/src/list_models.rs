use http::Method;
use localml_core::HttpTransport;
use serde_json::Value;

use crate::{LocalClient, report};

impl<T: HttpTransport> LocalClient<T> {
    /// Fetches the model list from the dialect's models endpoint.
    ///
    /// The body is returned untouched: OpenWebUI answers with a `data` array,
    /// Ollama with a `models` array. Failures are logged and turned into
    /// `None`.
    pub fn list_models(&self) -> Option<Value> {
        self.execute_json(Method::GET, &self.endpoints.models, Vec::new())
            .map_err(report)
            .ok()
    }
}
