//! Filesystem-backed media store and the preview re-encoder.
//!
//! Assets are stored as plain files named by the decimal string of the
//! template id, inside a root directory that plays the role of the storage
//! container: it is created on first store, and transport-level failures
//! surface as `ApiError::Storage`. Preview renditions are produced on the
//! fly and never cached.

use image::imageops::FilterType;
use image::ImageFormat;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::ApiError;

pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl AsRef<Path>) -> MediaStore {
        MediaStore {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn asset_path(&self, template_id: i64) -> PathBuf {
        self.root.join(template_id.to_string())
    }

    /// Writes the asset for a template, creating the container directory on
    /// first use. Overwrites any previous asset with the same id.
    pub fn store(&self, template_id: i64, bytes: &[u8]) -> Result<(), ApiError> {
        fs::create_dir_all(&self.root).map_err(|e| ApiError::Storage(e.to_string()))?;
        fs::write(self.asset_path(template_id), bytes)
            .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Reads the stored bytes back, unmodified.
    pub fn retrieve(&self, template_id: i64) -> Result<Vec<u8>, ApiError> {
        fs::read(self.asset_path(template_id)).map_err(|e| ApiError::Storage(e.to_string()))
    }

    pub fn exists(&self, template_id: i64) -> bool {
        self.asset_path(template_id).is_file()
    }
}

/// Re-encodes an image to a PNG no wider than `max_width`, preserving the
/// aspect ratio. Images already within the bound keep their dimensions but
/// are still re-encoded. Any decode or encode failure is fatal for the
/// request; there is no fallback to the original bytes.
pub fn render_preview(bytes: &[u8], max_width: u32) -> Result<Vec<u8>, ApiError> {
    let original = image::load_from_memory(bytes).map_err(|e| ApiError::Codec(e.to_string()))?;

    let resized = if original.width() > max_width {
        let height = ((original.height() as u64 * max_width as u64) / original.width() as u64)
            .max(1) as u32;
        original.resize_exact(max_width, height, FilterType::Lanczos3)
    } else {
        original
    };

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ApiError::Codec(e.to_string()))?;
    Ok(out.into_inner())
}
