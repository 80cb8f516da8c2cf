pub use localml_core::*;

pub use localml_client::{
    DEFAULT_SYSTEM_PROMPT, LocalClient, PROBE_TIMEOUT, ReqwestTransport, detect,
};

pub use localml_conversation::{ContextMode, Conversation, TranscriptError};
