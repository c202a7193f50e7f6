//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;
use serde_json::Value;

pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

pub fn invalid_request() -> impl Predicate<str> {
    predicates::str::contains("Invalid request")
}

/// Parse the JSON a command printed on stdout
pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// Keys of a JSON object, in the order they were printed
pub fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}
