use serde::Serialize;

use vaultgate_engine::{PatchError, SearchError, VaultError};

/// Stable machine-readable error codes, five digits: the leading three are
/// the HTTP status, the trailing two disambiguate within it. Plain
/// status-only failures use `status * 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    TextContentEncodingRequired = 40010,
    InvalidContentInsertionPositionValue = 40050,
    MissingHeadingHeader = 40051,
    InvalidHeadingHeader = 40052,
    MissingTargetTypeHeader = 40053,
    InvalidTargetTypeHeader = 40054,
    MissingTargetHeader = 40055,
    MissingOperation = 40056,
    InvalidOperation = 40057,
    PatchFailed = 40058,
    MissingQueryParameter = 40080,
    RequestMethodValidOnlyForFiles = 40510,
}

impl ErrorCode {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn status(self) -> u16 {
        (self as u32 / 100) as u16
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::TextContentEncodingRequired => {
                "Incoming content must be text data and have an appropriate text/* Content-Type header set (e.g. text/markdown)."
            }
            ErrorCode::InvalidContentInsertionPositionValue => {
                "Invalid 'Content-Insertion-Position' header value."
            }
            ErrorCode::MissingHeadingHeader => {
                "'Heading' header is required for identifying where to insert content."
            }
            ErrorCode::InvalidHeadingHeader => {
                "No heading in specified file could be found matching the heading specified in 'Heading' header."
            }
            ErrorCode::MissingTargetTypeHeader => "No 'Target-Type' header was provided.",
            ErrorCode::InvalidTargetTypeHeader => {
                "The 'Target-Type' header you provided was invalid."
            }
            ErrorCode::MissingTargetHeader => "No 'Target' header was provided.",
            ErrorCode::MissingOperation => "No 'Operation' header was provided.",
            ErrorCode::InvalidOperation => "The 'Operation' header you provided was invalid.",
            ErrorCode::PatchFailed => "The patch could not be applied to the target.",
            ErrorCode::MissingQueryParameter => "The 'query' parameter is required.",
            ErrorCode::RequestMethodValidOnlyForFiles => {
                "Request method is valid only for file paths, not directories."
            }
        }
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "Error",
    }
}

/// An API failure ready to serialize as `{message, errorCode}` with an HTTP
/// status attached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({error_code})")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub error_code: u32,
}

impl ApiError {
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            status: code.status(),
            message: code.message().to_string(),
            error_code: code.code(),
        }
    }

    /// A plain status-only failure; the error code is `status * 100`.
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            message: status_text(status).to_string(),
            error_code: u32::from(status) * 100,
        }
    }

    /// Append a human-readable detail line under the canned message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = format!("{}\n{}", self.message, message.into());
        self
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.message.clone(),
            error_code: self.error_code,
        }
    }
}

/// The wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "errorCode")]
    pub error_code: u32,
}

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::NotFound(_) => ApiError::from_status(404),
            other => ApiError::from_status(500).with_message(other.to_string()),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidPattern(_) | SearchError::InvalidPath { .. } => {
                ApiError::from_status(400).with_message(err.to_string())
            }
            SearchError::Vault(vault) => vault.into(),
        }
    }
}

/// Mapping for the structured patch path. The legacy path maps
/// `HeadingNotFound` differently (to its historical 400-class heading code),
/// so it does its own translation instead of using this.
impl From<PatchError> for ApiError {
    fn from(err: PatchError) -> Self {
        match err {
            PatchError::HeadingNotFound | PatchError::SourceNotFound(_) => {
                ApiError::from_status(404)
            }
            PatchError::DestinationExists(path) => {
                ApiError::from_status(409).with_message(format!("destination already exists: {path}"))
            }
            PatchError::InvalidInsertionPosition(_) => {
                ApiError::from_code(ErrorCode::InvalidContentInsertionPositionValue)
            }
            PatchError::InvalidOperation(_) | PatchError::IncompatibleOperation { .. } => {
                ApiError::from_code(ErrorCode::InvalidOperation).with_message(err.to_string())
            }
            PatchError::InvalidTargetType(_) => {
                ApiError::from_code(ErrorCode::InvalidTargetTypeHeader)
            }
            PatchError::InvalidTarget(_) => {
                ApiError::from_status(400).with_message(err.to_string())
            }
            PatchError::PatchFailed(reason) => {
                ApiError::from_code(ErrorCode::PatchFailed).with_message(reason)
            }
            PatchError::Vault(vault) => vault.into(),
        }
    }
}
