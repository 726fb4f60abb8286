//! Unit tests for domain error types

use mlc_domain::Error;

#[test]
fn test_unavailable_error() {
    let error = Error::unavailable("Redis GET timed out");
    assert!(error.is_unavailable());
    assert!(!error.is_caller_error());
    assert!(format!("{error}").contains("Redis GET timed out"));
}

#[test]
fn test_unavailable_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::unavailable_with_source("connect failed", io);
    match error {
        Error::Unavailable { message, source } => {
            assert_eq!(message, "connect failed");
            assert!(source.is_some());
        }
        _ => panic!("Expected Unavailable error"),
    }
}

#[test]
fn test_missing_parameter_error() {
    let error = Error::missing_parameter("user:{id}", "id");
    assert!(error.is_caller_error());
    match error {
        Error::MissingParameter {
            template,
            parameter,
        } => {
            assert_eq!(template, "user:{id}");
            assert_eq!(parameter, "id");
        }
        _ => panic!("Expected MissingParameter error"),
    }
}

#[test]
fn test_corrupt_error_display() {
    let error = Error::corrupt("user:1", "expected value at line 1");
    let display = format!("{error}");
    assert!(display.contains("user:1"));
    assert!(!error.is_unavailable());
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_err.into();
    assert!(matches!(error, Error::Json { .. }));
}

#[test]
fn test_pattern_errors_are_caller_errors() {
    assert!(Error::unknown_pattern("user_profile").is_caller_error());
    assert!(Error::invalid_pattern("user:{", "unclosed placeholder").is_caller_error());
    assert!(!Error::configuration("bad").is_caller_error());
}
