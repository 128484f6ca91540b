//! Assertions on the response envelopes

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert a failure envelope with `status` and `message`; returns the body.
pub fn assert_failure(response: &TestResponse, status: StatusCode, message: &str) -> Value {
    assert_eq!(response.status_code(), status, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["success"], Value::Bool(false), "{}", body);
    assert_eq!(body["message"], message, "{}", body);
    body
}

/// Assert a 200/201 success envelope; returns the body.
pub fn assert_success(response: &TestResponse, status: StatusCode) -> Value {
    assert_eq!(response.status_code(), status, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["success"], Value::Bool(true), "{}", body);
    body
}

/// Field names reported in a validation failure, in order.
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
