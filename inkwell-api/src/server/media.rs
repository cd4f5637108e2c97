use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Directory below the media root that post images are written to.
const POST_IMAGE_DIR: &str = "posts";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Could not create media directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write media file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not remove media file {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The uploaded file is not a valid image")]
pub struct InvalidImageError;

/// An upload that decoded successfully as an image.
#[derive(Clone, PartialEq, Debug)]
pub struct ValidImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl ValidImage {
    pub fn new(bytes: Vec<u8>) -> Result<Self, InvalidImageError> {
        let format = image::guess_format(&bytes).map_err(|_| InvalidImageError)?;
        image::load_from_memory_with_format(&bytes, format).map_err(|_| InvalidImageError)?;

        Ok(Self { bytes, format })
    }

    #[must_use]
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `image` under a fresh name and returns its path relative to
    /// the media root.
    pub async fn save_post_image(&self, image: &ValidImage) -> Result<String, MediaError> {
        let dir = self.root.join(POST_IMAGE_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| MediaError::CreateDir {
                path: dir.clone(),
                source,
            })?;

        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension());
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|source| MediaError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), bytes = image.bytes.len(), "Stored post image");
        Ok(format!("{POST_IMAGE_DIR}/{file_name}"))
    }

    /// Deletes a file previously returned by [`Self::save_post_image`].
    pub async fn remove(&self, image: &str) -> Result<(), MediaError> {
        let path = self.root.join(image);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|source| MediaError::Remove {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "Removed post image");
        Ok(())
    }
}
