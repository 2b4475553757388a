//! Error codes for the backend API.

pub mod error_code;

pub use error_code::ErrorCode;
