pub mod chat;

pub use chat::{ChatError, ChatErrorKind, ChatOptions, ChatProvider};
