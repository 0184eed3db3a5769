use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("File not found: {0}")]
    NotFound(RelativePathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault root: {0}")]
    InvalidRoot(String),
}

/// Vault I/O collaborator: everything the engine needs from the note store.
///
/// `rename` is expected to be link-aware in real hosts (updating references to
/// the moved note); the filesystem implementation below just renames.
pub trait Vault {
    fn read(&self, path: &RelativePath) -> Result<String, VaultError>;
    fn write(&self, path: &RelativePath, content: &str) -> Result<(), VaultError>;
    fn remove(&self, path: &RelativePath) -> Result<(), VaultError>;
    fn exists(&self, path: &RelativePath) -> Result<bool, VaultError>;
    fn rename(&self, from: &RelativePath, to: &RelativePath) -> Result<(), VaultError>;
    fn create_dir_all(&self, path: &RelativePath) -> Result<(), VaultError>;
    /// Every file in the vault, sorted by path.
    fn list_files(&self) -> Result<Vec<RelativePathBuf>, VaultError>;
    /// The markdown subset, sorted by path. Kept separate because hosts
    /// usually maintain a dedicated (cheaper) index of markdown files.
    fn list_markdown_files(&self) -> Result<Vec<RelativePathBuf>, VaultError>;
}

/// Filesystem-backed vault rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let root = root.into();
        if !root.exists() || !root.is_dir() {
            return Err(VaultError::InvalidRoot(
                "vault directory not found".to_string(),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &RelativePath) -> PathBuf {
        path.to_path(&self.root)
    }

    fn scan(&self, filter_markdown: bool) -> Result<Vec<RelativePathBuf>, VaultError> {
        let mut files = Vec::new();
        scan_directory_recursive(&self.root, &self.root, filter_markdown, &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn scan_directory_recursive(
    root: &Path,
    dir: &Path,
    filter_markdown: bool,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), VaultError> {
    let entries = fs::read_dir(dir).map_err(VaultError::Io)?;

    for entry in entries {
        let entry = entry.map_err(VaultError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(root, &path, filter_markdown, files)?;
        } else if !filter_markdown || path.extension().is_some_and(|ext| ext == "md") {
            let relative = path
                .strip_prefix(root)
                .map_err(|_| VaultError::InvalidRoot("file escapes vault root".to_string()))?;
            files.push(RelativePathBuf::from_path(relative).map_err(|_| {
                VaultError::InvalidRoot("non-relative path in vault".to_string())
            })?);
        }
    }

    Ok(())
}

impl Vault for FsVault {
    fn read(&self, path: &RelativePath) -> Result<String, VaultError> {
        let absolute = self.absolute(path);
        if !absolute.exists() {
            return Err(VaultError::NotFound(path.to_relative_path_buf()));
        }
        fs::read_to_string(&absolute).map_err(VaultError::Io)
    }

    fn write(&self, path: &RelativePath, content: &str) -> Result<(), VaultError> {
        let absolute = self.absolute(path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).map_err(VaultError::Io)?;
        }
        fs::write(&absolute, content).map_err(VaultError::Io)
    }

    fn remove(&self, path: &RelativePath) -> Result<(), VaultError> {
        let absolute = self.absolute(path);
        if !absolute.exists() {
            return Err(VaultError::NotFound(path.to_relative_path_buf()));
        }
        fs::remove_file(&absolute).map_err(VaultError::Io)
    }

    fn exists(&self, path: &RelativePath) -> Result<bool, VaultError> {
        Ok(self.absolute(path).exists())
    }

    fn rename(&self, from: &RelativePath, to: &RelativePath) -> Result<(), VaultError> {
        let source = self.absolute(from);
        if !source.exists() {
            return Err(VaultError::NotFound(from.to_relative_path_buf()));
        }
        fs::rename(source, self.absolute(to)).map_err(VaultError::Io)
    }

    fn create_dir_all(&self, path: &RelativePath) -> Result<(), VaultError> {
        fs::create_dir_all(self.absolute(path)).map_err(VaultError::Io)
    }

    fn list_files(&self) -> Result<Vec<RelativePathBuf>, VaultError> {
        self.scan(false)
    }

    fn list_markdown_files(&self) -> Result<Vec<RelativePathBuf>, VaultError> {
        self.scan(true)
    }
}
