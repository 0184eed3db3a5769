use std::collections::BTreeSet;

use relative_path::RelativePath;

use vaultgate_engine::Vault;

use crate::error::ApiError;
use crate::handlers::ensure_file_path;

/// What a GET against a vault path yields: a note's raw content, or the
/// sorted immediate children of a directory prefix (subdirectories carry a
/// trailing `/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteContent {
    Note(String),
    Folder(Vec<String>),
}

pub fn get_note(vault: &dyn Vault, path: &str) -> Result<NoteContent, ApiError> {
    if path.is_empty() || path.ends_with('/') {
        let mut children = BTreeSet::new();
        for file in vault.list_files()? {
            let name = file.as_str();
            if let Some(sub_path) = name.strip_prefix(path) {
                match sub_path.find('/') {
                    Some(slash) => children.insert(sub_path[..=slash].to_string()),
                    None => children.insert(sub_path.to_string()),
                };
            }
        }
        if children.is_empty() {
            return Err(ApiError::from_status(404));
        }
        Ok(NoteContent::Folder(children.into_iter().collect()))
    } else {
        Ok(NoteContent::Note(vault.read(RelativePath::new(path))?))
    }
}

pub fn put_note(vault: &dyn Vault, path: &str, body: &str) -> Result<(), ApiError> {
    ensure_file_path(path)?;
    vault.write(RelativePath::new(path), body)?;
    Ok(())
}

/// Append to a note, inserting a separating newline when the existing content
/// lacks a trailing one. Appending to a missing note creates it.
pub fn append_note(vault: &dyn Vault, path: &str, body: &str) -> Result<(), ApiError> {
    ensure_file_path(path)?;
    let note = RelativePath::new(path);

    let mut content = if vault.exists(note)? {
        let existing = vault.read(note)?;
        if existing.is_empty() || existing.ends_with('\n') {
            existing
        } else {
            format!("{existing}\n")
        }
    } else {
        String::new()
    };
    content.push_str(body);

    vault.write(note, &content)?;
    Ok(())
}

pub fn delete_note(vault: &dyn Vault, path: &str) -> Result<(), ApiError> {
    ensure_file_path(path)?;
    let note = RelativePath::new(path);
    if !vault.exists(note)? {
        return Err(ApiError::from_status(404));
    }
    vault.remove(note)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use vaultgate_engine::FsVault;

    fn vault_with(files: &[(&str, &str)]) -> (TempDir, FsVault) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        let vault = FsVault::new(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn test_get_note_returns_content() {
        let (_dir, vault) = vault_with(&[("hello.md", "# Hello")]);
        assert_eq!(
            get_note(&vault, "hello.md").unwrap(),
            NoteContent::Note("# Hello".to_string())
        );
    }

    #[test]
    fn test_get_missing_note_is_404() {
        let (_dir, vault) = vault_with(&[]);
        let err = get_note(&vault, "missing.md").unwrap_err();
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_get_folder_lists_immediate_children() {
        let (_dir, vault) = vault_with(&[
            ("notes/a.md", ""),
            ("notes/sub/b.md", ""),
            ("notes/sub/c.md", ""),
            ("other.md", ""),
        ]);

        assert_eq!(
            get_note(&vault, "notes/").unwrap(),
            NoteContent::Folder(vec!["a.md".to_string(), "sub/".to_string()])
        );
    }

    #[test]
    fn test_get_root_lists_vault_root() {
        let (_dir, vault) = vault_with(&[("a.md", ""), ("dir/b.md", "")]);
        assert_eq!(
            get_note(&vault, "").unwrap(),
            NoteContent::Folder(vec!["a.md".to_string(), "dir/".to_string()])
        );
    }

    #[test]
    fn test_get_empty_folder_is_404() {
        let (_dir, vault) = vault_with(&[("a.md", "")]);
        let err = get_note(&vault, "ghost/").unwrap_err();
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_put_to_directory_path_rejected() {
        let (_dir, vault) = vault_with(&[]);
        let err = put_note(&vault, "notes/", "content").unwrap_err();
        assert_eq!(err.status, 405);
    }

    #[test]
    fn test_append_inserts_separating_newline() {
        let (_dir, vault) = vault_with(&[("log.md", "existing entry")]);

        append_note(&vault, "log.md", "new entry").unwrap();

        assert_eq!(
            get_note(&vault, "log.md").unwrap(),
            NoteContent::Note("existing entry\nnew entry".to_string())
        );
    }

    #[test]
    fn test_append_does_not_double_newline() {
        let (_dir, vault) = vault_with(&[("log.md", "existing entry\n")]);

        append_note(&vault, "log.md", "new entry").unwrap();

        assert_eq!(
            get_note(&vault, "log.md").unwrap(),
            NoteContent::Note("existing entry\nnew entry".to_string())
        );
    }

    #[test]
    fn test_append_to_missing_note_creates_it() {
        let (_dir, vault) = vault_with(&[]);
        append_note(&vault, "fresh.md", "first line").unwrap();
        assert_eq!(
            get_note(&vault, "fresh.md").unwrap(),
            NoteContent::Note("first line".to_string())
        );
    }

    #[test]
    fn test_delete_missing_note_is_404() {
        let (_dir, vault) = vault_with(&[]);
        let err = delete_note(&vault, "missing.md").unwrap_err();
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_delete_removes_note() {
        let (_dir, vault) = vault_with(&[("gone.md", "x")]);
        delete_note(&vault, "gone.md").unwrap();
        assert_eq!(get_note(&vault, "gone.md").unwrap_err().status, 404);
    }
}
