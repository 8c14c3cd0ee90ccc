//! Test utilities for Filmshelf
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, in-memory application contexts and
//! assertion helpers.

use crate::app::AppContext;
use crate::error::Result;
use crate::storage::MemoryStorage;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// In-memory application with user `ana` signed up and logged in
pub fn logged_in_app() -> AppContext<MemoryStorage> {
    let mut app = AppContext::with_backend(MemoryStorage::new()).expect("Failed to open app");
    app.session
        .signup("ana", "pw")
        .expect("Failed to sign up test user");
    app
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T: std::fmt::Debug>(result: Result<T>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error containing '{}', got Ok({:?})", expected, value),
        Err(e) => {
            let message = e.to_string();
            assert!(
                message.contains(expected),
                "Expected error containing '{}', got '{}'",
                expected,
                message
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "films.csv", "Title,Director,ID");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Title,Director,ID");
    }

    #[test]
    fn test_logged_in_app() {
        let app = logged_in_app();
        assert!(app.session.is_authenticated());
        assert!(app.library.is_empty());
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_panics_on_ok() {
        assert_error_contains(Ok(1), "anything");
    }
}
