use relative_path::RelativePath;
use serde::Serialize;

use vaultgate_engine::{
    PatchError, PatchOperation, StructuredPatcher, TargetType, Vault, apply_legacy_splice,
    apply_structured_patch, heading_index, rename_or_move,
};

use crate::error::{ApiError, ErrorCode};
use crate::handlers::ensure_file_path;
use crate::request::{PatchHeaders, PatchRequest};

/// Successful patch outcome. Document edits return the full new text;
/// `deprecated` marks the legacy heading-splice path so the transport can
/// attach its deprecation signal. File rename/move returns a small JSON body
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchResponse {
    Document { content: String, deprecated: bool },
    FileMoved(FileMovedBody),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMovedBody {
    pub message: String,
    #[serde(rename = "oldPath")]
    pub old_path: String,
    #[serde(rename = "newPath")]
    pub new_path: String,
}

/// Apply a PATCH request to the note at `path`.
///
/// The full edit is computed in memory before anything is written back, so a
/// failure at any stage leaves the vault untouched.
pub fn patch_note(
    vault: &dyn Vault,
    patcher: &dyn StructuredPatcher,
    path: &str,
    headers: &PatchHeaders,
    body: &str,
) -> Result<PatchResponse, ApiError> {
    ensure_file_path(path)?;
    let request = PatchRequest::parse(headers, body)?;
    let note = RelativePath::new(path);

    match request {
        PatchRequest::Legacy {
            heading_path,
            position,
        } => {
            let text = vault.read(note)?;
            let headings = heading_index(&text);
            let patched = apply_legacy_splice(&text, &heading_path, position, body, &headings)
                .map_err(|err| match err {
                    // Historical behavior: an unmatched heading is a 400-class
                    // heading-header error, not a plain 404.
                    PatchError::HeadingNotFound => {
                        ApiError::from_code(ErrorCode::InvalidHeadingHeader)
                    }
                    other => other.into(),
                })?;
            vault.write(note, &patched)?;
            Ok(PatchResponse::Document {
                content: patched,
                deprecated: true,
            })
        }
        PatchRequest::Structured(instruction) => {
            if instruction.target_type == TargetType::File {
                let outcome = rename_or_move(
                    vault,
                    note,
                    instruction.operation,
                    &instruction.target,
                    &instruction.content,
                )?;
                let verb = if instruction.operation == PatchOperation::Move {
                    "moved"
                } else {
                    "renamed"
                };
                Ok(PatchResponse::FileMoved(FileMovedBody {
                    message: format!("File {verb} successfully."),
                    old_path: outcome.old_path.to_string(),
                    new_path: outcome.new_path.to_string(),
                }))
            } else {
                let text = vault.read(note)?;
                let headings = heading_index(&text);
                let patched = apply_structured_patch(&text, &instruction, &headings, patcher)?;
                vault.write(note, &patched)?;
                Ok(PatchResponse::Document {
                    content: patched,
                    deprecated: false,
                })
            }
        }
    }
}
