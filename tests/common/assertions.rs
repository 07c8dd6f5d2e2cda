//! Common assertion helpers for test output validation
//!
//! Provides predicates for the messages kotobaten prints on stdout.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the missing-cache notification
pub fn no_words_loaded() -> impl Predicate<str> {
    predicates::str::contains("No practice words loaded. Open menu bar to load.")
}

/// Creates a predicate that checks for the missing-login error
pub fn auth_required() -> impl Predicate<str> {
    predicates::str::contains("Authentication required")
}

/// Creates a predicate that checks for a transport failure against the API
pub fn request_failed() -> impl Predicate<str> {
    predicates::str::contains("Request failed")
}

/// Creates a predicate that checks for a `"<position>/<total>: <word>"` summary
pub fn position(position: usize, total: usize, word: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{position}/{total}: {word}"))
}
