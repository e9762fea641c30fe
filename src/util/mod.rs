//! Shared Utilities
//!
//! Stateless helpers used by both the auth handlers and the dashboard:
//! - Form validation (email, password, file extension allow-lists)
//! - Display formatting (file sizes, upload dates, file icons)

mod format;
mod validation;

pub use format::{file_icon, format_date, format_file_size};
pub use validation::{
    file_extension, validate_email, validate_file, validate_password, DOCUMENT_EXTENSIONS,
    IMAGE_EXTENSIONS, MIN_PASSWORD_LEN, PASSWORD_TOO_SHORT,
};
