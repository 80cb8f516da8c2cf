use std::borrow::Cow;

use secrecy::SecretString;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_MODEL: &str = "gemma3";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Environment variable holding the fallback bearer token.
pub const TOKEN_ENV_VAR: &str = "LLM_API_TOKEN";

/// Connection settings for a local chat client.
///
/// Fixed once a client is built from it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Cow<'static, str>,
    token: SecretString,
    model: String,
    temperature: f32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<Cow<'static, str>>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            token: SecretString::from(""),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<Cow<'static, str>>) -> Self {
        self.base_url = trim_base_url(base_url.into());
        self
    }

    pub fn token(mut self, token: impl Into<SecretString>) -> Self {
        self.token = token.into();
        self
    }

    /// Takes the token from `LLM_API_TOKEN`, leaving the current one in place
    /// when the variable is unset or empty.
    pub fn token_from_env(self) -> Self {
        match env_token() {
            Some(token) => self.token(token),
            None => self,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the sampling temperature. Zero or NaN falls back to the default.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = if temperature == 0.0 || temperature.is_nan() {
            DEFAULT_TEMPERATURE
        } else {
            temperature
        };
        self
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get_token(&self) -> &SecretString {
        &self.token
    }

    pub fn get_model(&self) -> &str {
        &self.model
    }

    pub fn get_temperature(&self) -> f32 {
        self.temperature
    }
}

/// Reads `LLM_API_TOKEN`. An empty value counts as unset.
pub fn env_token() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|token| !token.is_empty())
}

fn trim_base_url(base_url: Cow<'static, str>) -> Cow<'static, str> {
    if base_url.ends_with('/') {
        Cow::Owned(base_url.trim_end_matches('/').to_string())
    } else {
        base_url
    }
}
