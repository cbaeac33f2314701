//! Authentication gateway.
//!
//! The remote endpoints are opaque: `POST {base}/register` and
//! `POST {base}/login` take the form fields as JSON and answer with a
//! `success` flag plus either a `user` object or a `message`. The only
//! validation done locally is the password-confirmation check on registration.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when the endpoint cannot be reached or answers with something other than JSON.
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Shown when registration passwords differ. No request is sent.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub date_of_birth: String,
    pub country_code: String,
    pub mobile_number: String,
}

impl RegisterPayload {
    /// Exact string comparison of the two password fields.
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}

/// The `user` object as the endpoint returns it. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    /// String or number, depending on the backend.
    pub id: Option<serde_json::Value>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub mobile_number: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<RemoteUser>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn ok(user: Option<RemoteUser>) -> Self {
        Self {
            success: true,
            user,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            message: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unreadable response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("request cancelled")]
    Cancelled,
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Something that can register and log in users.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, AuthError>;

    async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, AuthError>;
}

/// JSON-over-HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<AuthResponse, AuthError> {
        let url = self.endpoint(path);
        debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("POST {url} -> {status}");
        // Rejections usually arrive as 4xx with a JSON body, so the status is not checked.
        serde_json::from_slice(&bytes).map_err(|source| AuthError::Decode {
            status: status.as_u16(),
            source,
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, AuthError> {
        self.post("register", payload).await
    }

    async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, AuthError> {
        self.post("login", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_payload_camel_case() {
        let payload = RegisterPayload {
            first_name: "Ada".into(),
            confirm_password: "x".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["confirmPassword"], "x");
        assert!(json.get("dateOfBirth").is_some());
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_passwords_match_exact() {
        let mut p = RegisterPayload {
            password: "Secret1!".into(),
            confirm_password: "Secret1!".into(),
            ..Default::default()
        };
        assert!(p.passwords_match());
        p.confirm_password = "secret1!".into();
        assert!(!p.passwords_match());
        p.confirm_password = "Secret1! ".into();
        assert!(!p.passwords_match());
    }

    #[test]
    fn test_response_with_message() {
        let r: AuthResponse =
            serde_json::from_str(r#"{"success": false, "message": "Invalid credentials"}"#)
                .unwrap();
        assert!(!r.success);
        assert_eq!(r.message.as_deref(), Some("Invalid credentials"));
        assert!(r.user.is_none());
    }

    #[test]
    fn test_response_missing_success_is_failure() {
        let r: AuthResponse = serde_json::from_str("{}").unwrap();
        assert!(!r.success);
    }

    #[test]
    fn test_response_with_user() {
        let r: AuthResponse = serde_json::from_str(
            r#"{"success": true, "user": {"id": 7, "firstName": "Ada", "extra": 1}}"#,
        )
        .unwrap();
        assert!(r.success);
        let user = r.user.unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.id, Some(serde_json::json!(7)));
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let g = HttpAuthGateway::new("http://localhost:3000/").unwrap();
        assert_eq!(g.endpoint("login"), "http://localhost:3000/login");
        let g = HttpAuthGateway::new("http://localhost:3000/api").unwrap();
        assert_eq!(g.endpoint("register"), "http://localhost:3000/api/register");
    }
}
