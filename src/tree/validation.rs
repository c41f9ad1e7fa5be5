//! Name validation
//!
//! Client-supplied names become path segments and on-disk download names,
//! so anything that could break either is refused.

use crate::error::TreeError;

pub const MAX_NAME_LENGTH: usize = 255;

/// Validate a folder or file name supplied by a client
pub fn validate_name(name: &str) -> Result<(), TreeError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.len() > MAX_NAME_LENGTH
        || name.contains(['/', '\\', '\0', '\r', '\n']);

    if invalid {
        Err(TreeError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}
