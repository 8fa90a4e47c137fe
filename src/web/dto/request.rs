//! Request DTOs.
//!
//! Every request body is `application/x-www-form-urlencoded`, matching what a
//! plain HTML form submits.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use super::validation::no_control_chars;

/// Registration form.
///
/// Text fields default to empty so that a missing field fails validation
/// like an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Login email.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        custom(function = "no_control_chars")
    )]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Password confirmation; must equal `password`.
    #[serde(default)]
    pub confirm_password: String,
}

/// Login form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    /// Login email.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Room creation form.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChatForm {
    /// Room name.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Chat name is required"),
        custom(function = "no_control_chars")
    )]
    pub chat_name: String,
    /// Checkbox: private when present.
    #[serde(default, deserialize_with = "checkbox")]
    pub is_private: bool,
}

/// Join-by-code form.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinChatForm {
    /// Join code.
    #[serde(default)]
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Message form.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageForm {
    /// Target room.
    #[serde(default)]
    #[validate(required(message = "Chat id is required"))]
    pub chat_id: Option<i64>,
    /// Message text. Blank text is accepted and ignored.
    #[serde(default)]
    pub content: String,
}

/// HTML checkbox semantics: a missing field is false, and a present field
/// is true unless it spells out a false value.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value {
        None => false,
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "false" | "0" | "off"
        ),
    })
}
