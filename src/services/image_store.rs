//! Image Store
//!
//! Filesystem persistence for recipe images. Files live under
//! `<work_dir>/uploads/recipe/<uuid>.<ext>`; the database stores the
//! path relative to the work dir. File writes are not coupled to the
//! row update transactionally.

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::utils::AppError;

/// Subdirectory for recipe images, relative to the work dir
const RECIPE_IMAGE_DIR: &str = "uploads/recipe";

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: work_dir.into(),
        }
    }

    /// Store image bytes under a fresh random name, returning the
    /// relative path to record on the recipe row.
    ///
    /// The caller is responsible for having validated that the bytes
    /// decode as an image; this only persists them.
    pub fn save_recipe_image(&self, data: &[u8], ext: &str) -> Result<String, AppError> {
        let dir = self.root.join(RECIPE_IMAGE_DIR);
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Failed to create image directory: {e}")))?;

        let filename = format!("{}.{}", Uuid::new_v4(), ext.to_lowercase());
        let path = dir.join(&filename);
        fs::write(&path, data)
            .map_err(|e| AppError::internal(format!("Failed to write image file: {e}")))?;

        Ok(format!("{RECIPE_IMAGE_DIR}/{filename}"))
    }

    /// Remove a previously stored image. Missing files are ignored; a
    /// dangling database reference must not make deletes fail.
    pub fn remove(&self, relative_path: &str) {
        let path = self.root.join(relative_path);
        if let Err(e) = fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove image file");
        }
    }

    /// Absolute path of a stored image (used by tests and static serving setup)
    pub fn resolve(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Root directory served under `/uploads`
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }
}
