use crate::error::*;
use std::time::Duration;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn retry_after(&self) -> Option<Duration>;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::FlickrApi(e) => {
                error!("Flickr API error details: {:?}", e);
            }
            CoreError::Database(e) => {
                error!("Database error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::FlickrApi(e) => e.is_retryable(),
            CoreError::Network(_) => true,
            CoreError::Timeout { .. } => true,
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            CoreError::FlickrApi(FlickrApiError::RateLimitExceeded { retry_after }) => {
                Some(Duration::from_secs(*retry_after))
            }
            CoreError::Timeout { seconds } => Some(Duration::from_secs(*seconds)),
            _ if self.is_retryable() => Some(Duration::from_secs(5)),
            _ => None,
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::FlickrApi(_) => "FLICKR_API".to_string(),
            CoreError::Database(_) => "DATABASE".to_string(),
            CoreError::Notify(_) => "NOTIFY".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::Timeout { .. } => "TIMEOUT".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for FlickrApiError {
    fn log_error(&self) -> &Self {
        error!("FlickrApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("FlickrApiError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            FlickrApiError::RateLimitExceeded { .. } => true,
            FlickrApiError::RequestTimeout => true,
            FlickrApiError::ServerError { status_code } => *status_code >= 500,
            // Flickr occasionally serves truncated bodies under load
            FlickrApiError::InvalidResponse { .. } => true,
            FlickrApiError::ApiFailure { .. } => false,
            FlickrApiError::InvalidApiKey => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            FlickrApiError::RateLimitExceeded { retry_after } => {
                Some(Duration::from_secs(*retry_after))
            }
            _ if self.is_retryable() => Some(Duration::from_secs(30)),
            _ => None,
        }
    }

    fn error_code(&self) -> String {
        match self {
            FlickrApiError::ApiFailure { .. } => "API_FAILURE".to_string(),
            FlickrApiError::InvalidApiKey => "INVALID_API_KEY".to_string(),
            FlickrApiError::RateLimitExceeded { .. } => "RATE_LIMITED".to_string(),
            FlickrApiError::RequestTimeout => "TIMEOUT".to_string(),
            FlickrApiError::InvalidResponse { .. } => "INVALID_RESPONSE".to_string(),
            FlickrApiError::ServerError { .. } => "SERVER_ERROR".to_string(),
        }
    }
}
