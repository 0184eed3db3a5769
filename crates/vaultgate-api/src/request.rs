use vaultgate_engine::{
    ContentType, InsertionPosition, PatchInstruction, PatchOperation, TargetType,
};

use crate::error::{ApiError, ErrorCode};

const DEFAULT_HEADING_DELIMITER: &str = "::";

/// Raw patch-relevant header values as received; the transport layer fills
/// whichever headers the client sent and leaves the rest `None`.
#[derive(Debug, Clone, Default)]
pub struct PatchHeaders {
    pub heading: Option<String>,
    pub heading_boundary: Option<String>,
    pub content_insertion_position: Option<String>,
    pub target_type: Option<String>,
    pub target: Option<String>,
    pub target_delimiter: Option<String>,
    pub operation: Option<String>,
    pub content_type: Option<String>,
    pub apply_if_content_preexists: Option<String>,
    pub trim_target_whitespace: Option<String>,
    pub create_target_if_missing: Option<String>,
}

/// A validated patch request: either the deprecated heading-splice form or a
/// structured instruction. Which form applies is decided by one predicate
/// (the presence of structured headers), never by falling through from one
/// parse to the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchRequest {
    Legacy {
        heading_path: Vec<String>,
        position: InsertionPosition,
    },
    Structured(PatchInstruction),
}

impl PatchRequest {
    pub fn parse(headers: &PatchHeaders, body: &str) -> Result<Self, ApiError> {
        let structured = headers.target_type.is_some() || headers.operation.is_some();
        if structured {
            Self::parse_structured(headers, body)
        } else {
            Self::parse_legacy(headers)
        }
    }

    fn parse_legacy(headers: &PatchHeaders) -> Result<Self, ApiError> {
        let position = match headers.content_insertion_position.as_deref() {
            None => InsertionPosition::End,
            Some(raw) => raw.parse().map_err(|_| {
                ApiError::from_code(ErrorCode::InvalidContentInsertionPositionValue)
            })?,
        };

        let delimiter = headers
            .heading_boundary
            .as_deref()
            .unwrap_or(DEFAULT_HEADING_DELIMITER);
        let heading_path: Vec<String> = headers
            .heading
            .as_deref()
            .unwrap_or_default()
            .split(delimiter)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        if heading_path.is_empty() {
            return Err(ApiError::from_code(ErrorCode::MissingHeadingHeader));
        }

        Ok(PatchRequest::Legacy {
            heading_path,
            position,
        })
    }

    fn parse_structured(headers: &PatchHeaders, body: &str) -> Result<Self, ApiError> {
        let target_type: TargetType = headers
            .target_type
            .as_deref()
            .ok_or_else(|| ApiError::from_code(ErrorCode::MissingTargetTypeHeader))?
            .parse()
            .map_err(|_| ApiError::from_code(ErrorCode::InvalidTargetTypeHeader))?;

        let operation: PatchOperation = headers
            .operation
            .as_deref()
            .ok_or_else(|| ApiError::from_code(ErrorCode::MissingOperation))?
            .parse()
            .map_err(|_| ApiError::from_code(ErrorCode::InvalidOperation))?;

        let target = headers
            .target
            .as_deref()
            .ok_or_else(|| ApiError::from_code(ErrorCode::MissingTargetHeader))?
            .to_string();

        let content_type = match headers.content_type.as_deref() {
            Some("application/json") => ContentType::Json,
            _ => ContentType::Markdown,
        };

        Ok(PatchRequest::Structured(PatchInstruction {
            operation,
            target_type,
            target,
            target_delimiter: headers
                .target_delimiter
                .clone()
                .unwrap_or_else(|| DEFAULT_HEADING_DELIMITER.to_string()),
            content_type,
            content: body.to_string(),
            apply_if_content_preexists: flag(&headers.apply_if_content_preexists),
            trim_target_whitespace: flag(&headers.trim_target_whitespace),
            create_target_if_missing: flag(&headers.create_target_if_missing),
        }))
    }
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
