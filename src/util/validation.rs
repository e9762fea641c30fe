//! Form and file validation

use regex::Regex;
use std::sync::OnceLock;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Message shown when a password is shorter than [`MIN_PASSWORD_LEN`]
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";

/// Extensions accepted by the document upload pipeline
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "csv"];

/// Extensions accepted for profile pictures
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Check that a string looks like `local@domain.tld`
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Check the minimum password length
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Lowercased text after the last `.` of a file name, `None` without a dot
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

/// Check a file name against an extension allow-list (case-insensitive).
///
/// The name must contain a `.`, so a bare `"pdf"` is not a PDF.
pub fn validate_file(filename: &str, allowed_extensions: &[&str]) -> bool {
    match file_extension(filename) {
        Some(extension) => allowed_extensions.iter().any(|allowed| *allowed == extension),
        None => false,
    }
}
