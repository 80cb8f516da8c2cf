use std::fmt;

use serde_json::Value;

/// The API dialect a backend speaks.
///
/// Decided once when a client is built and never re-evaluated. The dialect
/// drives both the endpoint layout and how the reply text is pulled out of a
/// chat response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// OpenWebUI, which fronts an OpenAI-style `chat/completions` API.
    OpenWebUi,
    /// A bare Ollama server.
    Ollama,
    /// Neither probe matched. Uses the OpenWebUI endpoint layout.
    Unknown,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenWebUi => "openwebui",
            Self::Ollama => "ollama",
            Self::Unknown => "unknown",
        }
    }

    /// Resolves the endpoint set for a backend rooted at `base_url`.
    pub fn endpoints(&self, base_url: &str) -> Endpoints {
        match self {
            Self::Ollama => Endpoints::ollama(base_url),
            Self::OpenWebUi | Self::Unknown => Endpoints::openwebui(base_url),
        }
    }

    /// Pulls the reply text out of a chat response body.
    ///
    /// Returns `None` when the keys this dialect expects are absent. A `null`
    /// content yields an empty string.
    pub fn extract_reply(&self, response: &Value) -> Option<String> {
        match self {
            Self::OpenWebUi => completions_content(response),
            Self::Ollama => content_of(response.get("message")?),
            Self::Unknown => {
                if response.get("choices").is_some() {
                    completions_content(response)
                } else {
                    Some(
                        response
                            .get("message")
                            .and_then(content_of)
                            .unwrap_or_default(),
                    )
                }
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn completions_content(response: &Value) -> Option<String> {
    content_of(response.get("choices")?.get(0)?.get("message")?)
}

fn content_of(message: &Value) -> Option<String> {
    match message.get("content")? {
        Value::String(content) => Some(content.clone()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Absolute URLs of the two endpoints a client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub models: String,
    pub chat: String,
}

impl Endpoints {
    pub fn openwebui(base_url: &str) -> Self {
        Self {
            models: format!("{base_url}/api/models"),
            chat: format!("{base_url}/api/chat/completions"),
        }
    }

    pub fn ollama(base_url: &str) -> Self {
        Self {
            models: format!("{base_url}/api/tags"),
            chat: format!("{base_url}/api/chat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://localhost:3000";

    #[test]
    fn test_endpoints_per_dialect() {
        assert_eq!(
            Dialect::OpenWebUi.endpoints(BASE).chat,
            "http://localhost:3000/api/chat/completions"
        );
        assert_eq!(
            Dialect::Ollama.endpoints(BASE),
            Endpoints {
                models: "http://localhost:3000/api/tags".into(),
                chat: "http://localhost:3000/api/chat".into(),
            }
        );
        assert_eq!(Dialect::Unknown.endpoints(BASE), Endpoints::openwebui(BASE));
    }

    #[test]
    fn test_extract_openwebui() {
        let response = json!({"choices": [{"message": {"content": "X"}}]});
        assert_eq!(Dialect::OpenWebUi.extract_reply(&response).as_deref(), Some("X"));
        assert_eq!(Dialect::Ollama.extract_reply(&response), None);
    }

    #[test]
    fn test_extract_ollama() {
        let response = json!({"message": {"role": "assistant", "content": "X"}});
        assert_eq!(Dialect::Ollama.extract_reply(&response).as_deref(), Some("X"));
        assert_eq!(Dialect::OpenWebUi.extract_reply(&response), None);
    }

    #[test]
    fn test_extract_missing_keys() {
        assert_eq!(Dialect::OpenWebUi.extract_reply(&json!({"choices": []})), None);
        assert_eq!(Dialect::Ollama.extract_reply(&json!({"message": {}})), None);
    }

    #[test]
    fn test_extract_null_content() {
        let response = json!({"message": {"content": null}});
        assert_eq!(Dialect::Ollama.extract_reply(&response).as_deref(), Some(""));
    }

    #[test]
    fn test_extract_unknown_prefers_choices() {
        let response = json!({
            "choices": [{"message": {"content": "from choices"}}],
            "message": {"content": "from message"},
        });
        assert_eq!(
            Dialect::Unknown.extract_reply(&response).as_deref(),
            Some("from choices")
        );

        let response = json!({"message": {"content": "from message"}});
        assert_eq!(
            Dialect::Unknown.extract_reply(&response).as_deref(),
            Some("from message")
        );

        assert_eq!(Dialect::Unknown.extract_reply(&json!({})).as_deref(), Some(""));
    }
}
