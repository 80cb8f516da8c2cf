use enum_kinds::EnumKind;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::models::Message;

/// Something that can answer an ordered list of messages.
pub trait ChatProvider: Send + Sync {
    /// Sends `messages` as given and returns the reply text.
    ///
    /// Implementations must surface every failure to the caller.
    fn chat(&self, messages: &[Message]) -> Result<String, ChatError>;
}

impl<T: ChatProvider + ?Sized> ChatProvider for &T {
    fn chat(&self, messages: &[Message]) -> Result<String, ChatError> {
        (**self).chat(messages)
    }
}

impl<T: ChatProvider + ?Sized> ChatProvider for Box<T> {
    fn chat(&self, messages: &[Message]) -> Result<String, ChatError> {
        (**self).chat(messages)
    }
}

/// Body of a non-streaming chat request.
#[derive(Serialize, Clone, Debug)]
pub struct ChatOptions<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    stream: bool,
}

impl<'a> ChatOptions<'a> {
    pub fn new(model: &'a str) -> Self {
        Self {
            model,
            messages: &[],
            temperature: crate::config::DEFAULT_TEMPERATURE,
            stream: false,
        }
    }

    /// Sets the messages to be used for the chat query.
    pub fn messages(mut self, messages: &'a [Message]) -> Self {
        self.messages = messages;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[derive(Debug, Error, EnumKind)]
#[enum_kind(ChatErrorKind, derive(Hash))]
pub enum ChatError {
    #[error("Failed to build the request: {0}.")]
    RequestBuildFailed(#[source] anyhow::Error),

    #[error("Failed to retrieve the response: {0}.")]
    ResponseFetchFailed(#[source] anyhow::Error),

    #[error("The request failed with status {status}: {body}.")]
    RequestError { status: StatusCode, body: String },

    #[error("Failed to parse response: {0}.")]
    ParseError(#[source] anyhow::Error),

    #[error("Unexpected response: {body}")]
    UnexpectedResponse { body: String },
}

impl ChatError {
    pub fn kind(&self) -> ChatErrorKind {
        ChatErrorKind::from(self)
    }

    /// `true` for failures that happened before a well-formed response was
    /// in hand: network errors, bad statuses and unparseable bodies.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::UnexpectedResponse { .. })
    }
}
