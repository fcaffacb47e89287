use serde::{Deserialize, Serialize};
use std::path::Path;

/// The file types the Hydra API accepts.
///
/// Wire format: the MIME string, e.g. `"application/pdf"`. Note that `.jpeg`
/// and `.jpg` files map to two distinct values, `image/jpeg` and `image/jpg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "image/bmp")]
    Bmp,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/jpg")]
    Jpg,
    #[serde(rename = "image/png")]
    Png,
}

/// File name suffixes, matched case-insensitively.
const EXTENSIONS: &[(&str, MimeType)] = &[
    (".pdf", MimeType::Pdf),
    (".bmp", MimeType::Bmp),
    (".gif", MimeType::Gif),
    (".jpeg", MimeType::Jpeg),
    (".jpg", MimeType::Jpg),
    (".png", MimeType::Png),
];

impl MimeType {
    pub const ALL: [MimeType; 6] = [
        MimeType::Pdf,
        MimeType::Bmp,
        MimeType::Gif,
        MimeType::Jpeg,
        MimeType::Jpg,
        MimeType::Png,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Jpg => "image/jpg",
            Self::Png => "image/png",
        }
    }

    /// Infer the MIME type from the suffix of the path's file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(suffix, _)| file_name.ends_with(suffix))
            .map(|(_, mime_type)| *mime_type)
    }

    /// Human-readable list of accepted suffixes, for error messages.
    pub(crate) fn accepted_extensions() -> String {
        let quoted: Vec<String> = EXTENSIONS
            .iter()
            .map(|(suffix, _)| format!("\"{suffix}\""))
            .collect();
        quoted.join(", ")
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mime_type| mime_type.as_str() == s)
            .ok_or_else(|| {
                let accepted: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                format!(
                    "unrecognized mimeType \"{s}\"; it must be one of {}",
                    accepted.join(", ")
                )
            })
    }
}
