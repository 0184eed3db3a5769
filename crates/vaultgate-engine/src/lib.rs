pub mod headings;
pub mod index;
pub mod patch;
pub mod search;
pub mod splice;
pub mod vault;

// Re-export key types for easier usage
pub use headings::{HeadingBoundary, HeadingEntry, Loc, resolve_heading_boundary};
pub use index::heading_index;
pub use patch::{
    ContentType, FileOpOutcome, InsertionPosition, PatchError, PatchInstruction, PatchOperation,
    StructuredPatcher, TargetType, apply_legacy_splice, apply_structured_patch, rename_or_move,
    validate_instruction,
};
pub use search::{
    FILENAME_SEPARATOR, FileMatches, LineMatch, MatchSource, MatchSpan, ScanOptions, SearchError,
    SearchQuery, SimpleSearch, SimpleSearchHit, compile_query, scan_lines, scan_vault,
    simple_match, validate_scope_path,
};
pub use splice::{splice_lines, splice_position};
pub use vault::{FsVault, Vault, VaultError};
