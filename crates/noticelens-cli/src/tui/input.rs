//! Form fields and single-line text editing.

use crossterm::event::KeyCode;
use noticelens_core::{LoginPayload, RegisterPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    DateOfBirth,
    CountryCode,
    MobileNumber,
}

pub const LOGIN_FIELDS: &[FormField] = &[FormField::Email, FormField::Password];

pub const REGISTER_FIELDS: &[FormField] = &[
    FormField::FirstName,
    FormField::LastName,
    FormField::Email,
    FormField::Password,
    FormField::ConfirmPassword,
    FormField::DateOfBirth,
    FormField::CountryCode,
    FormField::MobileNumber,
];

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
            Self::DateOfBirth => "Date of birth",
            Self::CountryCode => "Country code",
            Self::MobileNumber => "Mobile number",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Email => "you@example.com",
            Self::DateOfBirth => "YYYY-MM-DD",
            Self::CountryCode => "+1",
            Self::MobileNumber => "5551234567",
            _ => "",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }

    /// The login form only has email and password.
    pub fn login_value(self, form: &LoginPayload) -> &str {
        match self {
            Self::Email => &form.email,
            Self::Password => &form.password,
            _ => "",
        }
    }

    pub fn login_value_mut(self, form: &mut LoginPayload) -> Option<&mut String> {
        match self {
            Self::Email => Some(&mut form.email),
            Self::Password => Some(&mut form.password),
            _ => None,
        }
    }

    pub fn register_value(self, form: &RegisterPayload) -> &str {
        match self {
            Self::FirstName => &form.first_name,
            Self::LastName => &form.last_name,
            Self::Email => &form.email,
            Self::Password => &form.password,
            Self::ConfirmPassword => &form.confirm_password,
            Self::DateOfBirth => &form.date_of_birth,
            Self::CountryCode => &form.country_code,
            Self::MobileNumber => &form.mobile_number,
        }
    }

    pub fn register_value_mut(self, form: &mut RegisterPayload) -> &mut String {
        match self {
            Self::FirstName => &mut form.first_name,
            Self::LastName => &mut form.last_name,
            Self::Email => &mut form.email,
            Self::Password => &mut form.password,
            Self::ConfirmPassword => &mut form.confirm_password,
            Self::DateOfBirth => &mut form.date_of_birth,
            Self::CountryCode => &mut form.country_code,
            Self::MobileNumber => &mut form.mobile_number,
        }
    }
}

/// Apply a typing key to `buf`. Returns true if the key was consumed.
pub fn edit(buf: &mut String, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => {
            buf.push(c);
            true
        }
        KeyCode::Backspace => {
            buf.pop();
            true
        }
        _ => false,
    }
}

/// One bullet per character.
pub fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

/// Next index in a ring of `len` entries.
pub fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
