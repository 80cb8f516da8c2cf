use std::time::Duration;

use http::{Method, StatusCode};
use localml_core::{Dialect, HttpTransport};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::authorized;

/// Upper bound on each detection probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Classifies the backend at `base_url`.
///
/// Probes `/api/models` first: a 200 with a JSON object carrying `data` or
/// `choices` means OpenWebUI. Otherwise a 200 from `/api/tags` means Ollama.
/// Anything else, including every transport failure, ends in
/// [`Dialect::Unknown`].
#[tracing::instrument(level = "debug", skip(transport, token))]
pub fn detect<T: HttpTransport + ?Sized>(
    transport: &T,
    base_url: &str,
    token: &SecretString,
) -> Dialect {
    let token = token.expose_secret();

    let dialect = if probe_openwebui(transport, base_url, token) {
        Dialect::OpenWebUi
    } else if probe_ollama(transport, base_url, token) {
        Dialect::Ollama
    } else {
        Dialect::Unknown
    };

    tracing::info!(%base_url, %dialect, "detected api dialect");
    dialect
}

fn probe_openwebui<T: HttpTransport + ?Sized>(transport: &T, base_url: &str, token: &str) -> bool {
    let Some((status, body)) = probe(transport, &format!("{base_url}/api/models"), token) else {
        return false;
    };
    if status != StatusCode::OK {
        return false;
    }

    match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) => map.contains_key("data") || map.contains_key("choices"),
        Ok(_) => false,
        Err(err) => {
            tracing::debug!("openwebui probe returned malformed json: {err}");
            false
        }
    }
}

fn probe_ollama<T: HttpTransport + ?Sized>(transport: &T, base_url: &str, token: &str) -> bool {
    probe(transport, &format!("{base_url}/api/tags"), token)
        .is_some_and(|(status, _)| status == StatusCode::OK)
}

/// Issues a bounded GET, swallowing any failure.
fn probe<T: HttpTransport + ?Sized>(
    transport: &T,
    url: &str,
    token: &str,
) -> Option<(StatusCode, bytes::Bytes)> {
    let request = match authorized(Method::GET, url, token).body(Vec::new()) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(%url, "probe request could not be built: {err}");
            return None;
        }
    };

    match transport.execute(request, Some(PROBE_TIMEOUT)) {
        Ok(response) => {
            let status = response.status();
            tracing::debug!(%url, %status, "probe answered");
            Some((status, response.into_body()))
        }
        Err(err) => {
            tracing::debug!(%url, "probe failed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use localml_core::mock::{MockResponse, MockTransport};

    const BASE: &str = "http://localhost:3000";

    fn token() -> SecretString {
        SecretString::from("fake-token")
    }

    #[test]
    fn test_detect_openwebui_data() {
        let transport = MockTransport::new()
            .with_response(MockResponse::new(StatusCode::OK).body(r#"{"data":[]}"#));

        assert_eq!(detect(&transport, BASE, &token()), Dialect::OpenWebUi);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].uri, "http://localhost:3000/api/models");
        assert_eq!(requests[0].timeout, Some(PROBE_TIMEOUT));
        assert_eq!(requests[0].headers["authorization"], "Bearer fake-token");
    }

    #[test]
    fn test_detect_openwebui_choices() {
        let transport = MockTransport::new()
            .with_response(MockResponse::new(StatusCode::OK).body(r#"{"choices":null}"#));

        assert_eq!(detect(&transport, BASE, &token()), Dialect::OpenWebUi);
    }

    #[test]
    fn test_detect_ollama_when_models_missing() {
        let transport = MockTransport::new()
            .with_response(MockResponse::new(StatusCode::NOT_FOUND).body("404 page not found"))
            .with_response(MockResponse::new(StatusCode::OK).body(r#"{"models":[]}"#));

        assert_eq!(detect(&transport, BASE, &token()), Dialect::Ollama);

        let request = transport.last_request().unwrap();
        assert_eq!(request.uri, "http://localhost:3000/api/tags");
        assert_eq!(request.timeout, Some(PROBE_TIMEOUT));
    }

    #[test]
    fn test_detect_ollama_when_models_shape_differs() {
        let transport = MockTransport::new()
            .with_response(MockResponse::new(StatusCode::OK).body(r#"["not","an","object"]"#))
            .with_response(MockResponse::new(StatusCode::OK).body("whatever"));

        assert_eq!(detect(&transport, BASE, &token()), Dialect::Ollama);
    }

    #[test]
    fn test_detect_ollama_after_malformed_json() {
        let transport = MockTransport::new()
            .with_response(MockResponse::new(StatusCode::OK).body("<html>"))
            .with_response(MockResponse::new(StatusCode::OK).body(r#"{"models":[]}"#));

        assert_eq!(detect(&transport, BASE, &token()), Dialect::Ollama);
    }

    #[test]
    fn test_detect_unknown_when_nothing_matches() {
        let transport = MockTransport::new()
            .with_response(MockResponse::new(StatusCode::OK).body(r#"{"models":[]}"#))
            .with_response(MockResponse::new(StatusCode::UNAUTHORIZED).body("nope"));

        assert_eq!(detect(&transport, BASE, &token()), Dialect::Unknown);
    }

    #[test]
    fn test_detect_swallows_transport_failures() {
        let transport = MockTransport::new()
            .with_failure("connection refused")
            .with_failure("timed out");

        assert_eq!(detect(&transport, BASE, &token()), Dialect::Unknown);
        assert_eq!(transport.requests().len(), 2);
    }
}
