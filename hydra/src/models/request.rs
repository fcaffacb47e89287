use serde::{Deserialize, Serialize};
use validator::Validate;

use super::FileEntry;
use crate::error::{HydraError, Result};

pub const DEFAULT_JPG_QUALITY: u32 = 85;

/// One recognition result. Its shape is defined by the server.
pub type Row = serde_json::Value;

/// Per-call recognition flags. The boolean flags are forwarded to the server as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RecognizeOptions {
    /// Trade accuracy for speed.
    pub do_faster: bool,
    pub return_transformed_images: bool,
    pub return_jpgs: bool,
    #[validate(range(min = 1, max = 100))]
    pub jpg_quality: u32,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            do_faster: false,
            return_transformed_images: false,
            return_jpgs: false,
            jpg_quality: DEFAULT_JPG_QUALITY,
        }
    }
}

impl RecognizeOptions {
    pub(crate) fn ensure_valid(&self) -> Result<()> {
        self.validate().map_err(|_| {
            HydraError::Validation(format!(
                "jpgQuality must be an integer between 1 and 100 inclusive, got {}",
                self.jpg_quality
            ))
        })
    }
}

/// Request body for `POST hydra/{data_source_id}/`.
///
/// Wire format:
/// `{ "files": [...], "doFaster": false, "returnTransformedImages": false, "returnJpgs": false, "jpgQuality": 85 }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizeRequest {
    /// Result rows come back in the same order as these entries.
    pub files: Vec<FileEntry>,
    #[serde(flatten)]
    pub options: RecognizeOptions,
}

impl RecognizeRequest {
    pub fn new(files: Vec<FileEntry>, options: RecognizeOptions) -> Self {
        Self { files, options }
    }
}
