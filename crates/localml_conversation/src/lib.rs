//! Multi-turn conversations on top of a [`ChatProvider`].
//!
//! A [`Conversation`] owns the transcript. Each turn picks a [`ContextMode`]
//! deciding which part of the transcript accompanies the new user message;
//! the full exchange is always recorded.

use std::path::Path;

use localml_client::LocalClient;
use localml_core::{ChatError, ChatProvider, ClientConfig, Message, MessageRole};

mod transcript;

pub use transcript::TranscriptError;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful and knowledgeable AI assistant. \
     Provide clear, concise, and accurate responses. \
     When appropriate, ask clarifying questions or provide examples.";

/// Which slice of the transcript is sent along with a new user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextMode {
    /// Only the system prompt. Earlier turns are ignored.
    #[default]
    Default,
    /// The whole transcript.
    Full,
    /// The system prompt and every earlier assistant reply.
    Summary,
}

pub struct Conversation<P: ChatProvider = LocalClient> {
    provider: P,
    messages: Vec<Message>,
}

impl Conversation<LocalClient> {
    /// Connects to the backend described by `config` (probing its dialect)
    /// and starts a conversation on it.
    pub fn connect(config: ClientConfig, system_prompt: Option<&str>) -> Result<Self, ChatError> {
        Ok(Self::new(LocalClient::connect(config)?, system_prompt))
    }
}

impl<P: ChatProvider> Conversation<P> {
    pub fn new(provider: P, system_prompt: Option<&str>) -> Self {
        Self {
            provider,
            messages: vec![Message::system(
                system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT),
            )],
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The content of the first transcript entry.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages.first().map(|this| this.content.as_str())
    }

    /// Builds the message list `send` would post for `content` under `mode`.
    pub fn compose(&self, content: &str, mode: ContextMode) -> Vec<Message> {
        let mut prompt = match mode {
            ContextMode::Default => self
                .system_prompt()
                .map(Message::system)
                .into_iter()
                .collect(),
            ContextMode::Full => self.messages.clone(),
            ContextMode::Summary => {
                let mut prompt: Vec<Message> = self.messages.first().cloned().into_iter().collect();
                prompt.extend(
                    self.messages
                        .iter()
                        .filter(|this| this.role == MessageRole::Assistant)
                        .cloned(),
                );
                prompt
            }
        };

        prompt.push(Message::user(content));
        prompt
    }

    /// Sends `content` with the context chosen by `mode` and records the turn.
    ///
    /// On failure the transcript is left as it was.
    #[tracing::instrument(level = "debug", skip(self, content))]
    pub fn send(&mut self, content: &str, mode: ContextMode) -> Result<String, ChatError> {
        let prompt = self.compose(content, mode);
        tracing::debug!(messages = prompt.len(), "sending turn");

        let reply = self.provider.chat(&prompt)?;

        self.messages.push(Message::user(content));
        self.messages.push(Message::assistant(reply.as_str()));

        Ok(reply)
    }

    pub fn send_default(&mut self, content: &str) -> Result<String, ChatError> {
        self.send(content, ContextMode::Default)
    }

    pub fn send_with_full_context(&mut self, content: &str) -> Result<String, ChatError> {
        self.send(content, ContextMode::Full)
    }

    pub fn send_with_summary_context(&mut self, content: &str) -> Result<String, ChatError> {
        self.send(content, ContextMode::Summary)
    }

    /// Drops every turn, keeping only the first transcript entry.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
    }

    /// Appends an entry without contacting the provider.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn save_transcript(&self, path: impl AsRef<Path>) -> Result<(), TranscriptError> {
        transcript::save(path.as_ref(), &self.messages)
    }

    /// Replaces the transcript with the one stored at `path`.
    pub fn load_transcript(&mut self, path: impl AsRef<Path>) -> Result<(), TranscriptError> {
        self.messages = transcript::load(path.as_ref())?;
        tracing::info!(
            path = %path.as_ref().display(),
            messages = self.messages.len(),
            "loaded transcript"
        );
        Ok(())
    }
}
