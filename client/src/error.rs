//! Error handling for the Rice Mill client
//!
//! Every failure carries a short code and a generic message in English and
//! Bengali that the presentation layer can show as-is.

use serde::Serialize;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Session errors
    #[error("Not signed in or session expired")]
    Unauthorized,

    #[error("Insufficient permissions: {0}")]
    Forbidden(String),

    // Request errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    // Transport and decoding errors
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Message shown to the user for a failed action
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserMessage {
    pub code: &'static str,
    pub message_en: String,
    pub message_bn: String,
}

impl ClientError {
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Unauthorized => "UNAUTHORIZED",
            ClientError::Forbidden(_) => "INSUFFICIENT_PERMISSIONS",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Status { .. } => "BACKEND_ERROR",
            ClientError::Transport(_) => "NETWORK_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// User-facing message for a failed `action` such as "load stock"
    pub fn user_message(&self, action: &str) -> UserMessage {
        let (message_en, message_bn) = match self {
            ClientError::Unauthorized => (
                "Your session has expired. Please sign in again.".to_string(),
                "আপনার সেশনের মেয়াদ শেষ। আবার লগইন করুন।".to_string(),
            ),
            ClientError::Forbidden(_) => (
                "You do not have permission to perform this action".to_string(),
                "এই কাজটি করার অনুমতি আপনার নেই".to_string(),
            ),
            ClientError::Validation(msg) => (
                msg.clone(),
                format!("তথ্য সঠিক নয়: {}", msg),
            ),
            ClientError::NotFound(resource) => (
                format!("{} not found", resource),
                format!("{} পাওয়া যায়নি", resource),
            ),
            ClientError::Status { .. }
            | ClientError::Transport(_)
            | ClientError::Decode(_)
            | ClientError::Configuration(_) => (
                format!("Failed to {}", action),
                format!("{} করা যায়নি", action),
            ),
        };

        UserMessage {
            code: self.code(),
            message_en,
            message_bn,
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        ClientError::Validation(format!("Invalid fields: {}", fields.join(", ")))
    }
}

impl From<&'static str> for ClientError {
    fn from(message: &'static str) -> Self {
        ClientError::Validation(message.to_string())
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(e: config::ConfigError) -> Self {
        ClientError::Configuration(e.to_string())
    }
}

/// Result type alias for client calls
pub type ClientResult<T> = Result<T, ClientError>;
