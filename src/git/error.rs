//! Git error handling
//!
//! Turns libgit2 errors into short messages for fetch failures.

use git2::{Error, ErrorClass};

/// Message fragments that identify a failure category, checked in order
const CATEGORIES: &[(&[&str], &str)] = &[
    (
        &["not found", "404", "too many redirects", "authentication replays"],
        "Repository not found",
    ),
    (&["authentication", "credentials"], "Authentication failed"),
    (&["permission denied", "access denied"], "Permission denied"),
    (
        &["connection", "network", "timeout", "timed out", "resolve host"],
        "Network error",
    ),
];

/// Interpret a git2 error and provide a more user-friendly message
pub fn interpret_git_error(err: &Error) -> String {
    let message = err.message().to_lowercase();

    for (needles, summary) in CATEGORIES {
        if needles.iter().any(|needle| message.contains(needle)) {
            return (*summary).to_string();
        }
    }

    match err.class() {
        ErrorClass::Http if message.contains("certificate") => "Certificate error".to_string(),
        ErrorClass::Http if message.contains("ssl") => "SSL error".to_string(),
        ErrorClass::Http => format!("HTTP error: {}", err.message()),
        ErrorClass::Ssh => format!("SSH error: {}", err.message()),
        _ => err.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::ErrorCode;

    fn error(class: ErrorClass, message: &str) -> Error {
        Error::new(ErrorCode::GenericError, class, message)
    }

    #[test]
    fn test_not_found() {
        let err = error(ErrorClass::Http, "unexpected http status code: 404");
        assert_eq!(interpret_git_error(&err), "Repository not found");
    }

    #[test]
    fn test_authentication() {
        let err = error(ErrorClass::Ssh, "Authentication failed for user git");
        assert_eq!(interpret_git_error(&err), "Authentication failed");
    }

    #[test]
    fn test_certificate() {
        let err = error(ErrorClass::Http, "the SSL certificate is invalid");
        assert_eq!(interpret_git_error(&err), "Certificate error");
    }

    #[test]
    fn test_other_ssh_error_keeps_message() {
        let err = error(ErrorClass::Ssh, "key exchange failed");
        assert_eq!(interpret_git_error(&err), "SSH error: key exchange failed");
    }

    #[test]
    fn test_fallback_keeps_message() {
        let err = error(ErrorClass::Odb, "object missing");
        assert_eq!(interpret_git_error(&err), "object missing");
    }
}
