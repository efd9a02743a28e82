pub mod checksum;
pub mod error;
pub mod validator;

pub use checksum::{ChecksumResult, expected_digit, verify};
pub use error::ValidateError;
pub use validator::Validator;
