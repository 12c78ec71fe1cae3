/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use doctrans::errors::{AppError, ConfigError, ProviderError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 500,
        message: "model not loaded".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("500"));
    assert!(display.contains("model not loaded"));
}

#[test]
fn test_providerError_parseError_shouldDisplayCorrectly() {
    let error = ProviderError::ParseError("expected value".to_string());
    assert!(error.to_string().contains("Failed to parse API response"));
}

#[test]
fn test_configError_missing_shouldMentionPath() {
    let error = ConfigError::Missing(PathBuf::from("/srv/config.json"));
    assert!(error.to_string().contains("/srv/config.json"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let error: AppError = io_error.into();

    assert!(matches!(error, AppError::File(ref message) if message.contains("read-only")));
}

#[test]
fn test_appError_fromProviderError_shouldWrap() {
    let error: AppError = ProviderError::ConnectionError("refused".to_string()).into();

    assert!(matches!(error, AppError::Provider(_)));
    assert!(error.to_string().contains("refused"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();

    assert!(matches!(error, AppError::Unknown(ref message) if message == "something odd"));
}
