use http::Method;
use localml_core::{ChatError, ChatOptions, ChatProvider, HttpTransport, Message};

use crate::{DEFAULT_SYSTEM_PROMPT, LocalClient, report};

impl<T: HttpTransport> LocalClient<T> {
    /// Sends a single prompt under `system_prompt` (or the default persona).
    ///
    /// Failures are logged and turned into `None`.
    pub fn send_prompt(&self, prompt: &str, system_prompt: Option<&str>) -> Option<String> {
        let messages = [
            Message::system(system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT)),
            Message::user(prompt),
        ];

        self.send_conversation(&messages).map_err(report).ok()
    }

    /// Sends `messages` exactly as given and extracts the reply text.
    ///
    /// Unlike [`send_prompt`](Self::send_prompt), every failure is returned to
    /// the caller.
    #[tracing::instrument(level = "debug", skip_all, fields(dialect = %self.dialect, messages = messages.len()))]
    pub fn send_conversation(&self, messages: &[Message]) -> Result<String, ChatError> {
        let body = ChatOptions::new(self.config.get_model())
            .messages(messages)
            .temperature(self.config.get_temperature())
            .to_json()
            .map_err(|this| ChatError::RequestBuildFailed(anyhow::Error::new(this)))?;

        let response = self.execute_json(Method::POST, &self.endpoints.chat, body)?;

        self.dialect
            .extract_reply(&response)
            .ok_or_else(|| ChatError::UnexpectedResponse {
                body: response.to_string(),
            })
    }
}

impl<T: HttpTransport> ChatProvider for LocalClient<T> {
    fn chat(&self, messages: &[Message]) -> Result<String, ChatError> {
        self.send_conversation(messages)
    }
}
