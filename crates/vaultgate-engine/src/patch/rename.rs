use relative_path::{RelativePath, RelativePathBuf};

use crate::patch::{PatchError, PatchOperation};
use crate::vault::Vault;

/// Result of a successful file rename/move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOpOutcome {
    pub old_path: RelativePathBuf,
    pub new_path: RelativePathBuf,
}

/// Rename or move a file in the vault.
///
/// For `rename` the target header must be exactly `name` and the body names
/// the new final path segment (directory unchanged); for `move` the target
/// must be exactly `path` and the body is the new vault path verbatim. All
/// validation happens before any filesystem side effect: a mismatched
/// target/operation pair, a destination naming a directory, or an existing
/// destination leave the vault untouched. A move creates the destination's
/// parent directory when missing, then hands off to the vault's (link-aware)
/// rename primitive.
pub fn rename_or_move(
    vault: &dyn Vault,
    source: &RelativePath,
    operation: PatchOperation,
    target: &str,
    new_value: &str,
) -> Result<FileOpOutcome, PatchError> {
    let new_value = new_value.trim();

    let expected_target = match operation {
        PatchOperation::Rename => "name",
        PatchOperation::Move => "path",
        other => {
            return Err(PatchError::InvalidOperation(other.to_string()));
        }
    };
    if target != expected_target {
        return Err(PatchError::InvalidTarget(format!(
            "target must be '{expected_target}' for {operation}, got '{target}'"
        )));
    }
    if new_value.is_empty() {
        return Err(PatchError::InvalidTarget(
            "request body must contain the new value".to_string(),
        ));
    }
    if new_value.ends_with('/') {
        return Err(PatchError::InvalidTarget(
            "destination must name a file, not a directory".to_string(),
        ));
    }

    let destination = match operation {
        PatchOperation::Rename => {
            if new_value.contains('/') {
                return Err(PatchError::InvalidTarget(
                    "new name must not contain path separators".to_string(),
                ));
            }
            match source.parent() {
                Some(parent) if !parent.as_str().is_empty() => parent.join(new_value),
                _ => RelativePathBuf::from(new_value),
            }
        }
        PatchOperation::Move => RelativePathBuf::from(new_value),
        _ => unreachable!("validated above"),
    };

    if !vault.exists(source)? {
        return Err(PatchError::SourceNotFound(source.to_relative_path_buf()));
    }
    if vault.exists(&destination)? {
        return Err(PatchError::DestinationExists(destination));
    }

    if operation == PatchOperation::Move
        && let Some(parent) = destination.parent()
        && !parent.as_str().is_empty()
    {
        vault.create_dir_all(parent)?;
    }

    vault.rename(source, &destination)?;

    Ok(FileOpOutcome {
        old_path: source.to_relative_path_buf(),
        new_path: destination,
    })
}
