//! Request/response surface over the vaultgate engine.
//!
//! This crate owns everything at the HTTP interface boundary except the
//! transport itself: typed request descriptors parsed from header and query
//! values, the stable error-code scheme, and handler functions that combine
//! the engine's patch and search primitives with vault I/O. A server binds
//! these handlers to routes; nothing in here knows about sockets.

pub mod error;
pub mod handlers;
pub mod request;

pub use error::{ApiError, ErrorBody, ErrorCode};
pub use handlers::notes::{NoteContent, append_note, delete_note, get_note, put_note};
pub use handlers::patch::{FileMovedBody, PatchResponse, patch_note};
pub use handlers::search::{
    FullTextResultItem, FullTextSearchRequest, SimpleSearchResultItem, search_fulltext,
    search_simple,
};
pub use request::{PatchHeaders, PatchRequest};
