use std::cell::RefCell;
use std::collections::BTreeMap;

use relative_path::{RelativePath, RelativePathBuf};
use vaultgate_engine::{
    PatchError, PatchInstruction, SimpleSearch, SimpleSearchHit, StructuredPatcher, Vault,
    VaultError,
};

/// In-memory vault that counts mutating calls, so tests can assert that a
/// failed request produced no side effects.
#[derive(Debug, Default)]
pub struct MemoryVault {
    files: RefCell<BTreeMap<RelativePathBuf, String>>,
    pub writes: RefCell<usize>,
    pub renames: RefCell<usize>,
    pub dirs_created: RefCell<Vec<RelativePathBuf>>,
}

impl MemoryVault {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let vault = Self::default();
        for (path, content) in files {
            vault
                .files
                .borrow_mut()
                .insert(RelativePathBuf::from(*path), content.to_string());
        }
        vault
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.borrow().get(RelativePath::new(path)).cloned()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.borrow() + *self.renames.borrow()
    }
}

impl Vault for MemoryVault {
    fn read(&self, path: &RelativePath) -> Result<String, VaultError> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(path.to_relative_path_buf()))
    }

    fn write(&self, path: &RelativePath, content: &str) -> Result<(), VaultError> {
        *self.writes.borrow_mut() += 1;
        self.files
            .borrow_mut()
            .insert(path.to_relative_path_buf(), content.to_string());
        Ok(())
    }

    fn remove(&self, path: &RelativePath) -> Result<(), VaultError> {
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| VaultError::NotFound(path.to_relative_path_buf()))
    }

    fn exists(&self, path: &RelativePath) -> Result<bool, VaultError> {
        Ok(self.files.borrow().contains_key(path))
    }

    fn rename(&self, from: &RelativePath, to: &RelativePath) -> Result<(), VaultError> {
        let content = self
            .files
            .borrow_mut()
            .remove(from)
            .ok_or_else(|| VaultError::NotFound(from.to_relative_path_buf()))?;
        *self.renames.borrow_mut() += 1;
        self.files
            .borrow_mut()
            .insert(to.to_relative_path_buf(), content);
        Ok(())
    }

    fn create_dir_all(&self, path: &RelativePath) -> Result<(), VaultError> {
        self.dirs_created
            .borrow_mut()
            .push(path.to_relative_path_buf());
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<RelativePathBuf>, VaultError> {
        Ok(self.files.borrow().keys().cloned().collect())
    }

    fn list_markdown_files(&self) -> Result<Vec<RelativePathBuf>, VaultError> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| path.extension() == Some("md"))
            .cloned()
            .collect())
    }
}

/// Structured patcher that appends the instruction content at the end of the
/// document, enough to observe dispatch and write behavior.
pub struct AppendingPatcher;

impl StructuredPatcher for AppendingPatcher {
    fn apply_patch(
        &self,
        text: &str,
        instruction: &PatchInstruction,
    ) -> Result<String, PatchError> {
        Ok(format!("{text}\n{}", instruction.content))
    }
}

/// Structured patcher that always fails with a structural reason.
pub struct FailingPatcher;

impl StructuredPatcher for FailingPatcher {
    fn apply_patch(
        &self,
        _text: &str,
        _instruction: &PatchInstruction,
    ) -> Result<String, PatchError> {
        Err(PatchError::PatchFailed("target block not found".to_string()))
    }
}

/// Case-sensitive substring matcher standing in for the host's fuzzy search.
/// Scores lower (better) the more occurrences are found, mirroring the
/// ascending result sort.
pub struct SubstringSearch;

impl SimpleSearch for SubstringSearch {
    fn prepare<'a>(&'a self, query: &str) -> Box<dyn Fn(&str) -> Option<SimpleSearchHit> + 'a> {
        let query = query.to_string();
        Box::new(move |text: &str| {
            let matches: Vec<(usize, usize)> = text
                .match_indices(&query)
                .map(|(start, _)| (start, start + query.len()))
                .collect();
            if matches.is_empty() {
                None
            } else {
                Some(SimpleSearchHit {
                    score: -(matches.len() as f64),
                    matches,
                })
            }
        })
    }
}
