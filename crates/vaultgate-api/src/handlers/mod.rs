pub mod notes;
pub mod patch;
pub mod search;

use crate::error::{ApiError, ErrorCode};

/// Content-changing methods only make sense against files; an empty path or
/// one with a trailing `/` names a directory.
pub(crate) fn ensure_file_path(path: &str) -> Result<(), ApiError> {
    if path.is_empty() || path.ends_with('/') {
        return Err(ApiError::from_code(ErrorCode::RequestMethodValidOnlyForFiles));
    }
    Ok(())
}
