//! In-memory session and the signed-in user record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{RegisterPayload, RemoteUser};

/// The signed-in user. Lives only as long as the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub mobile_number: String,
    /// Mobile number prefixed with its country code, e.g. `+15551234567`.
    pub phone: String,
}

impl User {
    /// Build from the registration form.
    pub fn from_registration(form: &RegisterPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            date_of_birth: form.date_of_birth.clone(),
            mobile_number: form.mobile_number.clone(),
            phone: prefixed_phone(&form.country_code, &form.mobile_number),
        }
    }

    /// Build from the login form, which only carries an email.
    pub fn from_login(email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    /// Build from the endpoint's `user` object. Missing fields fall back to `fallback`.
    pub fn from_remote(remote: RemoteUser, fallback: &User) -> Self {
        let mobile = remote
            .mobile_number
            .unwrap_or_else(|| fallback.mobile_number.clone());
        let phone = match (remote.phone, remote.country_code) {
            (Some(phone), _) => phone,
            (None, Some(code)) => prefixed_phone(&code, &mobile),
            (None, None) => fallback.phone.clone(),
        };
        Self {
            id: remote
                .id
                .and_then(id_to_string)
                .unwrap_or_else(|| fallback.id.clone()),
            first_name: remote.first_name.unwrap_or_else(|| fallback.first_name.clone()),
            last_name: remote.last_name.unwrap_or_else(|| fallback.last_name.clone()),
            email: remote.email.unwrap_or_else(|| fallback.email.clone()),
            date_of_birth: remote
                .date_of_birth
                .unwrap_or_else(|| fallback.date_of_birth.clone()),
            mobile_number: mobile,
            phone,
        }
    }

    /// First name, or the email when the name is unknown.
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.email
        } else {
            &self.first_name
        }
    }
}

fn id_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `"+1"`, `"555 123 4567"` → `"+15551234567"`.
pub fn prefixed_phone(country_code: &str, mobile: &str) -> String {
    let digits: String = mobile.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    let code = country_code.trim();
    if code.is_empty() {
        digits
    } else if code.starts_with('+') {
        format!("{code}{digits}")
    } else {
        format!("+{code}{digits}")
    }
}

/// Authenticated user, or nobody.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) -> Option<User> {
        self.user.take()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
