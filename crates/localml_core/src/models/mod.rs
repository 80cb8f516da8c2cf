pub mod dialect;
pub mod message;

pub use dialect::{Dialect, Endpoints};
pub use message::{Message, MessageRole};
