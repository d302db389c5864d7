//! Name rules shared by every record type.

use crate::error::CoreError;

/// Validate a record name.
///
/// Names are required text: empty and whitespace-only values are rejected.
/// `entity` is only used to build the error message (e.g. `"Course"`).
pub fn validate_name(entity: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{entity} name must not be empty"
        )));
    }
    Ok(())
}
