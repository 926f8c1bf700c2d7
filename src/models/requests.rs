//! Request DTOs for the gateway API
//!
//! Defines the structure of incoming HTTP request bodies and their validation.

use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a comment author name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a comment body, in characters
pub const MAX_CONTENT_LENGTH: usize = 500;

/// Request body for POST /api/comments
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "ipaddress", alias = "IPAddress")]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub browser_info: Option<String>,
    /// Submission time; defaults to now when omitted. Kept to microseconds.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A comment that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub name: String,
    pub content: String,
    pub ip_address: String,
    pub browser_info: String,
    pub created_at: DateTime<Utc>,
}

/// Field-level validation messages keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl CreateCommentRequest {
    /// Validates the request data.
    ///
    /// All failing fields are collected before returning, so a client sees
    /// every problem at once.
    pub fn validate(self) -> Result<NewComment, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", "Name", self.name, Some(MAX_NAME_LENGTH));
        let content = required(
            &mut errors,
            "content",
            "Content",
            self.content,
            Some(MAX_CONTENT_LENGTH),
        );
        let ip_address = required(&mut errors, "ipAddress", "IPAddress", self.ip_address, None);
        let browser_info = required(
            &mut errors,
            "browserInfo",
            "BrowserInfo",
            self.browser_info,
            None,
        );

        match (name, content, ip_address, browser_info) {
            (Some(name), Some(content), Some(ip_address), Some(browser_info)) => Ok(NewComment {
                name,
                content,
                ip_address,
                browser_info,
                created_at: self.created_at.unwrap_or_else(Utc::now).trunc_subsecs(6),
            }),
            _ => Err(errors),
        }
    }
}

/// Checks one required string field, recording any failure under `field`.
fn required(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<String>,
    max_len: Option<usize>,
) -> Option<String> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.add(field, format!("The {} field is required.", label));
            return None;
        }
    };

    if let Some(max) = max_len {
        if value.chars().count() > max {
            errors.add(
                field,
                format!(
                    "The field {} must be a string with a maximum length of {}.",
                    label, max
                ),
            );
            return None;
        }
    }

    Some(value)
}
