//! Transient model files.

use std::path::{Path, PathBuf};

use pathforge_fzn::{FznError, FznModel};
use tempfile::TempPath;

const MODEL_FILE_PREFIX: &str = "DataPathModel.";
const MODEL_FILE_SUFFIX: &str = ".fzn";

/// A dumped model that is removed when dropped.
#[derive(Debug)]
pub struct ModelFile {
    path: TempPath,
}

impl ModelFile {
    /// Dumps `model` to a fresh `DataPathModel.*.fzn` file in `dir`.
    pub fn create(dir: &Path, model: &FznModel) -> Result<Self, FznError> {
        let file = tempfile::Builder::new()
            .prefix(MODEL_FILE_PREFIX)
            .suffix(MODEL_FILE_SUFFIX)
            .tempfile_in(dir)?;
        let path = file.into_temp_path();
        model.dump(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keeps the file on disk and returns its path.
    pub fn keep(self) -> std::io::Result<PathBuf> {
        self.path.keep().map_err(|e| e.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathforge_fzn::{FznType, SolveGoal};

    fn small_model() -> FznModel {
        let mut model = FznModel::new();
        model.add_variable_array("x", FznType::range(0, 1), 1, false, true);
        model.set_solve_target(SolveGoal::Satisfy, "", Vec::new());
        model
    }

    #[test]
    fn test_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = ModelFile::create(dir.path(), &small_model()).unwrap();
        let path = file.path().to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(MODEL_FILE_PREFIX));
        assert!(name.ends_with(MODEL_FILE_SUFFIX));
        assert!(std::fs::read_to_string(&path).unwrap().contains("solve satisfy;"));

        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn test_keep() {
        let dir = tempfile::tempdir().unwrap();
        let file = ModelFile::create(dir.path(), &small_model()).unwrap();
        let kept = file.keep().unwrap();
        assert!(kept.exists());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelFile::create(&dir.path().join("missing"), &small_model()).unwrap_err();
        assert!(matches!(err, FznError::Io(_)));
    }
}
