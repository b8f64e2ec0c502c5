use super::*;

// =============================================================================
// from_status
// =============================================================================

#[test]
fn from_status_401_and_403_are_auth() {
    assert!(matches!(ClientError::from_status(401, "x"), ClientError::Auth(_)));
    assert!(matches!(ClientError::from_status(403, "x"), ClientError::Auth(_)));
}

#[test]
fn from_status_404_is_not_found() {
    assert!(matches!(ClientError::from_status(404, "x"), ClientError::NotFound(_)));
}

#[test]
fn from_status_5xx_is_server() {
    for status in [500, 502, 503, 599] {
        assert!(
            matches!(ClientError::from_status(status, "x"), ClientError::Server(_)),
            "expected server error for {status}"
        );
    }
}

#[test]
fn from_status_other_4xx_is_validation() {
    for status in [400, 409, 418, 422] {
        assert!(
            matches!(ClientError::from_status(status, "x"), ClientError::Validation(_)),
            "expected validation error for {status}"
        );
    }
}

// =============================================================================
// Display / message / error_code
// =============================================================================

#[test]
fn display_is_the_bare_message() {
    let err = ClientError::Auth("Authentication failed".into());
    assert_eq!(err.to_string(), "Authentication failed");
    assert_eq!(err.message(), "Authentication failed");
}

#[test]
fn error_codes_are_distinct() {
    let errors = [
        ClientError::Validation(String::new()),
        ClientError::Auth(String::new()),
        ClientError::NotFound(String::new()),
        ClientError::Server(String::new()),
        ClientError::Network(String::new()),
        ClientError::EmptyResponse(String::new()),
    ];
    let mut codes: Vec<&str> = errors.iter().map(ClientError::error_code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn network_error_code() {
    assert_eq!(ClientError::Network("Network error: refused".into()).error_code(), "E_NETWORK");
}
