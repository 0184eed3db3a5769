use relative_path::RelativePathBuf;

use crate::search::{LineMatch, SearchError, SearchQuery, compile_query, scan_lines};
use crate::vault::Vault;

/// File-set filters for a full-text scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Keep only files under this vault path prefix. A trailing `/` is
    /// implied, so `notes` matches `notes/x.md` but not `notesOther/x.md`.
    pub path: Option<String>,
    /// `.*` (or unset) scans every file, `md`/`.md` the markdown subset,
    /// anything else is a case-sensitive suffix match on the dot-normalized
    /// extension.
    pub file_extension: Option<String>,
}

/// All matches found in one file, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatches {
    pub path: RelativePathBuf,
    pub matches: Vec<LineMatch>,
}

/// Reject scope paths that would escape the vault.
pub fn validate_scope_path(path: &str) -> Result<(), SearchError> {
    if path.starts_with('/') {
        return Err(SearchError::InvalidPath {
            path: path.to_string(),
            reason: "path must be relative to the vault root",
        });
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err(SearchError::InvalidPath {
            path: path.to_string(),
            reason: "path must not contain '..'",
        });
    }
    Ok(())
}

/// Scan the vault for `query`, file by file in listing order.
///
/// Each candidate is read and scanned sequentially; only files with at least
/// one match appear in the result, and result order is scan order (full-text
/// results are never score-sorted). An empty candidate set is an empty
/// result, not an error.
pub fn scan_vault(
    vault: &dyn Vault,
    query: &SearchQuery,
    options: &ScanOptions,
) -> Result<Vec<FileMatches>, SearchError> {
    if let Some(path) = options.path.as_deref() {
        validate_scope_path(path)?;
    }
    let pattern = compile_query(query)?;

    let mut files = match options.file_extension.as_deref() {
        None | Some(".*") => vault.list_files()?,
        Some("md") | Some(".md") => vault.list_markdown_files()?,
        Some(extension) => {
            let suffix = if extension.starts_with('.') {
                extension.to_string()
            } else {
                format!(".{extension}")
            };
            vault
                .list_files()?
                .into_iter()
                .filter(|file| file.as_str().ends_with(&suffix))
                .collect()
        }
    };

    if let Some(path) = options.path.as_deref().filter(|p| !p.is_empty()) {
        let prefix = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        };
        files.retain(|file| file.as_str().starts_with(&prefix));
    }

    let mut results = Vec::new();
    for file in files {
        let content = vault.read(&file)?;
        let matches = scan_lines(&content, &pattern, query.context_length);
        if !matches.is_empty() {
            results.push(FileMatches {
                path: file,
                matches,
            });
        }
    }
    Ok(results)
}
