//! Patch instruction model and execution.
//!
//! Two strategies co-exist behind one dispatcher:
//!
//! - the **legacy** line-splice path, addressed by a raw heading path plus an
//!   insertion position, kept byte-identical to its historical behavior; and
//! - the **structured** path, addressed by an explicit target type and
//!   operation, which validates the instruction, pre-resolves heading targets,
//!   and delegates the edit itself to a [`StructuredPatcher`].
//!
//! The two strategies are independent pure functions over the same document
//! text; which one runs is decided by the caller from the shape of the
//! request (legacy headers vs. structured headers).

mod executor;
mod rename;

pub use executor::{apply_legacy_splice, apply_structured_patch, validate_instruction};
pub use rename::{FileOpOutcome, rename_or_move};

use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::vault::VaultError;

/// The edit to perform at the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    Append,
    Prepend,
    Replace,
    Rename,
    Move,
}

impl PatchOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            PatchOperation::Append => "append",
            PatchOperation::Prepend => "prepend",
            PatchOperation::Replace => "replace",
            PatchOperation::Rename => "rename",
            PatchOperation::Move => "move",
        }
    }
}

impl FromStr for PatchOperation {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append" => Ok(PatchOperation::Append),
            "prepend" => Ok(PatchOperation::Prepend),
            "replace" => Ok(PatchOperation::Replace),
            "rename" => Ok(PatchOperation::Rename),
            "move" => Ok(PatchOperation::Move),
            other => Err(PatchError::InvalidOperation(other.to_string())),
        }
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of thing the target string addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Heading,
    Block,
    Frontmatter,
    File,
}

impl TargetType {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Heading => "heading",
            TargetType::Block => "block",
            TargetType::Frontmatter => "frontmatter",
            TargetType::File => "file",
        }
    }
}

impl FromStr for TargetType {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heading" => Ok(TargetType::Heading),
            "block" => Ok(TargetType::Block),
            "frontmatter" => Ok(TargetType::Frontmatter),
            "file" => Ok(TargetType::File),
            other => Err(PatchError::InvalidTargetType(other.to_string())),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy insertion position, from the `Content-Insertion-Position` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionPosition {
    Beginning,
    #[default]
    End,
}

impl FromStr for InsertionPosition {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginning" => Ok(InsertionPosition::Beginning),
            "end" => Ok(InsertionPosition::End),
            other => Err(PatchError::InvalidInsertionPosition(other.to_string())),
        }
    }
}

/// Body content type of a structured patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Markdown,
    Json,
}

/// One structured patch, built per request and consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchInstruction {
    pub operation: PatchOperation,
    pub target_type: TargetType,
    pub target: String,
    /// Delimiter splitting a heading target into path elements. `::` unless a
    /// client overrides it.
    pub target_delimiter: String,
    pub content_type: ContentType,
    pub content: String,
    pub apply_if_content_preexists: bool,
    pub trim_target_whitespace: bool,
    pub create_target_if_missing: bool,
}

impl PatchInstruction {
    /// Split the target into a heading path using the instruction's
    /// delimiter, dropping empty elements.
    pub fn heading_path(&self) -> Vec<String> {
        self.target
            .split(self.target_delimiter.as_str())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The structured-patch primitive owning block/frontmatter edit semantics.
///
/// The engine validates the instruction and pre-resolves heading targets
/// before this is invoked; everything past that point belongs to the
/// implementation.
pub trait StructuredPatcher {
    fn apply_patch(&self, text: &str, instruction: &PatchInstruction)
    -> Result<String, PatchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("no heading found matching the requested heading path")]
    HeadingNotFound,
    #[error("invalid insertion position '{0}'")]
    InvalidInsertionPosition(String),
    #[error("invalid operation '{0}'")]
    InvalidOperation(String),
    #[error("invalid target type '{0}'")]
    InvalidTargetType(String),
    #[error("operation '{operation}' is not valid for target type '{target_type}'")]
    IncompatibleOperation {
        operation: PatchOperation,
        target_type: TargetType,
    },
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("source file not found: {0}")]
    SourceNotFound(RelativePathBuf),
    #[error("destination already exists: {0}")]
    DestinationExists(RelativePathBuf),
    #[error("patch could not be applied: {0}")]
    PatchFailed(String),
    #[error(transparent)]
    Vault(#[from] VaultError),
}
