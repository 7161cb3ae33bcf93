//! HTTP transport for the storefront API.
//!
//! Credentials are resolved from the session store before any I/O: bearer
//! calls without a stored token fail immediately, and cart-scoped calls
//! without a token fall back to the guest cart session id. Non-2xx
//! responses are reduced to one human-readable message extracted from the
//! error body.

use std::future::Future;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::ApiError;
use crate::session::SessionStore;

/// How a request authenticates against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthMode {
    /// No credentials attached.
    Public,
    /// Requires a stored token; fails fast without one.
    Bearer,
    /// Bearer when a token exists, otherwise the guest cart session id.
    CartScoped,
}

enum Credentials {
    None,
    Bearer(SecretString),
    Guest(String),
}

/// Thin wrapper around `reqwest::Client` bound to one API origin.
pub(crate) struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub(crate) fn new(base_url: &Url, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            session,
        }
    }

    /// Issue a JSON request and return the parsed response body.
    ///
    /// An empty 2xx body maps to `Value::Null` (delete endpoints reply with
    /// no content).
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        auth: AuthMode,
    ) -> Result<Value, ApiError> {
        let credentials = self.resolve_credentials(auth)?;

        // Guest cart identity rides in the body, except for requests that
        // have none (GET, and DELETE without a payload) where it becomes a
        // query parameter
        let mut payload = body;
        let mut guest_query: Option<String> = None;
        if let Credentials::Guest(session_id) = &credentials {
            if method == Method::GET || (method == Method::DELETE && payload.is_none()) {
                guest_query = Some(session_id.clone());
            } else {
                let mut object = match payload.take() {
                    Some(Value::Object(map)) => map,
                    _ => serde_json::Map::new(),
                };
                object.insert("session_id".to_owned(), Value::String(session_id.clone()));
                payload = Some(Value::Object(object));
            }
        }

        let mut builder = self
            .http
            .request(method, format!("{}{path}", self.base_url));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(session_id) = &guest_query {
            builder = builder.query(&[("session_id", session_id.as_str())]);
        }
        if let Credentials::Bearer(token) = &credentials {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(payload) = &payload {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &text);
            warn!(
                status = %status,
                path,
                body = %text.chars().take(200).collect::<String>(),
                "storefront API returned non-success status"
            );
            if status == StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound(message));
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn resolve_credentials(&self, auth: AuthMode) -> Result<Credentials, ApiError> {
        match auth {
            AuthMode::Public => Ok(Credentials::None),
            AuthMode::Bearer => self
                .session
                .token()
                .map(Credentials::Bearer)
                .ok_or(ApiError::Unauthenticated),
            AuthMode::CartScoped => Ok(self.session.token().map_or_else(
                || Credentials::Guest(self.session.ensure_cart_session_id()),
                Credentials::Bearer,
            )),
        }
    }
}

/// Run `op`, retrying once when the failure is a transport error or a 5xx.
///
/// Client errors and local precondition failures are never retried, and
/// callers must not wrap mutations.
pub(crate) async fn with_retry<T, F, Fut>(op: F) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match op().await {
        Err(err) if err.is_retryable() => {
            debug!(error = %err, "retrying failed request once");
            op().await
        }
        result => result,
    }
}

/// Reduce an error body to a single human-readable message.
///
/// Tries `message`, then `error`, then the first value of an `errors` map
/// (which may itself be a list of messages), before falling back to a
/// generic status line.
pub(crate) fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| body_message(&value))
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

fn body_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .and_then(non_blank)
        .or_else(|| value.get("error").and_then(Value::as_str).and_then(non_blank))
        .or_else(|| first_errors_entry(value))
}

fn first_errors_entry(value: &Value) -> Option<String> {
    let errors = value.get("errors")?.as_object()?;
    let (_, first) = errors.iter().next()?;
    let candidate = match first {
        Value::Array(items) => items.first()?,
        other => other,
    };
    candidate.as_str().and_then(non_blank)
}

fn non_blank(message: &str) -> Option<String> {
    let trimmed = message.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_error_message_prefers_message_key() {
        let body = r#"{"message": "Out of stock", "error": "ignored"}"#;
        assert_eq!(extract_error_message(422, body), "Out of stock");
    }

    #[test]
    fn test_error_message_falls_back_to_error_key() {
        let body = r#"{"error": "Invalid credentials"}"#;
        assert_eq!(extract_error_message(401, body), "Invalid credentials");
    }

    #[test]
    fn test_error_message_reads_errors_map() {
        let body = r#"{"errors": {"email": "The email field is required."}}"#;
        assert_eq!(
            extract_error_message(422, body),
            "The email field is required."
        );
    }

    #[test]
    fn test_error_message_reads_errors_map_with_list_values() {
        let body = r#"{"errors": {"phone": ["The phone format is invalid.", "second"]}}"#;
        assert_eq!(
            extract_error_message(422, body),
            "The phone format is invalid."
        );
    }

    #[test]
    fn test_error_message_generic_fallbacks() {
        assert_eq!(
            extract_error_message(500, "<html>Server Error</html>"),
            "Request failed with status 500"
        );
        assert_eq!(extract_error_message(502, ""), "Request failed with status 502");
        // Blank messages do not count
        assert_eq!(
            extract_error_message(400, r#"{"message": "   "}"#),
            "Request failed with status 400"
        );
    }

    #[tokio::test]
    async fn test_with_retry_retries_server_errors_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ApiError> = with_retry(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(ApiError::Status {
                    status: 500,
                    message: "Request failed with status 500".to_string(),
                })
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_retry_does_not_retry_client_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ApiError> = with_retry(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(ApiError::Status {
                    status: 404,
                    message: "Request failed with status 404".to_string(),
                })
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_recovers_on_second_attempt() {
        let calls = AtomicU32::new(0);
        let result = with_retry(|| {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(ApiError::Status {
                        status: 503,
                        message: "Request failed with status 503".to_string(),
                    })
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_retry_passes_through_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, ApiError>("done") }
        })
        .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
