use photowatch_core::{
    ConfigError, CoreError, DatabaseError, ErrorExt, FlickrApiError, NotifyError,
};
use std::time::Duration;

#[test]
fn test_error_codes() {
    let api_error = CoreError::FlickrApi(FlickrApiError::InvalidApiKey);
    assert_eq!(api_error.error_code(), "FLICKR_API");

    let db_error = CoreError::Database(DatabaseError::ConnectionFailed {
        reason: "file locked".to_string(),
    });
    assert_eq!(db_error.error_code(), "DATABASE");

    let notify_error = CoreError::Notify(NotifyError::SendFailed {
        reason: "no session bus".to_string(),
    });
    assert_eq!(notify_error.error_code(), "NOTIFY");

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "flickr_api_key".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");
}

#[test]
fn test_retryable_errors() {
    let retryable_error =
        CoreError::FlickrApi(FlickrApiError::RateLimitExceeded { retry_after: 60 });
    assert!(retryable_error.is_retryable());

    let server_error = CoreError::FlickrApi(FlickrApiError::ServerError { status_code: 503 });
    assert!(server_error.is_retryable());

    let non_retryable_error = CoreError::Config(ConfigError::MissingField {
        field: "flickr_api_key".to_string(),
    });
    assert!(!non_retryable_error.is_retryable());

    let api_key_error = CoreError::FlickrApi(FlickrApiError::InvalidApiKey);
    assert!(!api_key_error.is_retryable());
}

#[test]
fn test_retry_after() {
    let rate_limit_error =
        CoreError::FlickrApi(FlickrApiError::RateLimitExceeded { retry_after: 60 });
    assert_eq!(
        rate_limit_error.retry_after(),
        Some(Duration::from_secs(60))
    );

    let timeout_error = CoreError::Timeout { seconds: 30 };
    assert_eq!(timeout_error.retry_after(), Some(Duration::from_secs(30)));

    let permanent_error = CoreError::FlickrApi(FlickrApiError::ApiFailure {
        code: 100,
        message: "Invalid API Key".to_string(),
    });
    assert_eq!(permanent_error.retry_after(), None);
}

#[test]
fn test_error_conversion() {
    let api_error = FlickrApiError::RequestTimeout;
    let core_error: CoreError = api_error.into();
    assert!(matches!(
        core_error,
        CoreError::FlickrApi(FlickrApiError::RequestTimeout)
    ));

    let config_error = ConfigError::MissingEnvironmentVariable {
        var_name: "FLICKR_API_KEY".to_string(),
    };
    let core_error: CoreError = config_error.into();
    assert_eq!(core_error.error_code(), "CONFIG");
}
