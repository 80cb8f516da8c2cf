pub mod config;
pub mod models;
pub mod providers;
pub mod transport;

#[cfg(feature = "mock")]
pub mod mock;

pub use config::ClientConfig;
pub use models::{Dialect, Endpoints, Message, MessageRole};
pub use providers::{ChatError, ChatErrorKind, ChatOptions, ChatProvider};
pub use transport::HttpTransport;
