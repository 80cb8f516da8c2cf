use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single entry of a chat transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Message {
    pub fn new(content: impl Into<String>, role: MessageRole) -> Self {
        Self {
            content: content.into(),
            role,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, MessageRole::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, MessageRole::Assistant)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(content, MessageRole::System)
    }
}

impl<T> From<T> for Message
where
    T: Into<String>,
{
    fn from(value: T) -> Self {
        Message::user(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn from_str(str: &str) -> Option<Self> {
        match str {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

impl Serialize for MessageRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MessageRole::from_str(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(&s, &["system", "user", "assistant"])
        })
    }
}

// A reply-less turn is stored as `null` by older transcripts.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_role_first() {
        let json = serde_json::to_string(&Message::system("Be brief.")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"Be brief."}"#);
    }

    #[test]
    fn test_null_content_becomes_empty() {
        let message: Message =
            serde_json::from_str(r#"{"role":"assistant","content":null}"#).unwrap();
        assert_eq!(message, Message::assistant(""));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = serde_json::from_str::<Message>(r#"{"role":"tool","content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_is_user() {
        let message: Message = "Hi".into();
        assert_eq!(message.role, MessageRole::User);
    }
}
