//! Error codes for the backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear in HTTP
//! responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No route matches the request
    NotFound,
    /// Configuration error
    ConfigError,
    /// Internal server error
    InternalError,
    /// Store not connected or unreachable
    DbUnavailable,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::NotFound,
        ErrorCode::ConfigError,
        ErrorCode::InternalError,
        ErrorCode::DbUnavailable,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
