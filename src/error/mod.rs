//! Error types for the Flotilla SDK.

use std::sync::Arc;

use thiserror::Error;

use crate::store::StoreError;

/// Primary error type for all Flotilla operations.
#[derive(Error, Debug)]
pub enum FlotillaError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-2xx response from the backend. `message` carries the server's
    /// `detail` field when the body had one.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Terminal outcome of a refresh wave, shared by every request that
    /// joined it. Credentials are already cleared when this is observed.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(Arc<FlotillaError>),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Coarse classification used to pick user-message behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Request,
    Server,
    Network,
    Timeout,
    Store,
    Configuration,
    Serialization,
    Unknown,
}

impl FlotillaError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RefreshFailed(_) => ErrorCategory::Authentication,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                400..=499 => ErrorCategory::Request,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Unknown,
            },
            Self::Network(err) if err.is_timeout() => ErrorCategory::Timeout,
            Self::Network(_) => ErrorCategory::Network,
            Self::Store(_) => ErrorCategory::Store,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::InvalidArgument(_) => ErrorCategory::Request,
        }
    }

    /// User-facing message for this error, in the product's language.
    ///
    /// Request errors surface the backend's `detail` text when present;
    /// everything else maps to a fixed message per category.
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Request => match self {
                Self::Api { message, .. } if !message.is_empty() => message.clone(),
                _ => "Ocurrió un error en la solicitud. Por favor, intenta de nuevo.".to_string(),
            },
            ErrorCategory::Authentication => {
                "Tu sesión ha expirado. Por favor, inicia sesión de nuevo.".to_string()
            }
            ErrorCategory::Server => "Error del servidor. Por favor, intenta más tarde.".to_string(),
            ErrorCategory::Network | ErrorCategory::Timeout => {
                "No se pudo conectar al servidor. Revisa tu conexión de red.".to_string()
            }
            _ => "Error en la configuración de la solicitud. Contacta al soporte técnico."
                .to_string(),
        }
    }

    /// Whether the caller should route the user back to the login flow.
    pub fn requires_reauthentication(&self) -> bool {
        self.category() == ErrorCategory::Authentication
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FlotillaError>;
