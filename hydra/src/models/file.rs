use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use super::MimeType;
use crate::error::{HydraError, Result};

const MIME_TYPE_FIELD: &str = "mimeType";
const BASE64_FILE_FIELD: &str = "base64File";

/// One file to recognize.
///
/// Wire format: `{ "mimeType": "image/png", "base64File": "<standard base64>" }`.
/// The base64 content is never decoded or checked by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileEntry {
    pub mime_type: MimeType,
    pub base64_file: String,
}

impl FileEntry {
    pub fn new(mime_type: MimeType, base64_file: impl Into<String>) -> Self {
        Self {
            mime_type,
            base64_file: base64_file.into(),
        }
    }

    pub fn from_bytes(mime_type: MimeType, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Read a local file, inferring its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = resolve_mime_type(path)?;
        Self::read(path, mime_type).await
    }

    pub(crate) async fn read(path: &Path, mime_type: MimeType) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(mime_type, &bytes))
    }

    /// Validate untyped JSON entries, keeping their order.
    ///
    /// Each value must be an object holding exactly `mimeType` (one of the
    /// accepted MIME strings) and `base64File` (a string). The first invalid
    /// entry fails the whole batch with an error naming its index.
    pub fn from_json_entries(values: &[Value]) -> Result<Vec<Self>> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| Self::from_json_entry(index, value))
            .collect()
    }

    fn from_json_entry(index: usize, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            entry_error(
                index,
                format!("must be a JSON object, got {}", json_type_name(value)),
            )
        })?;

        if let Some(extra) = object
            .keys()
            .find(|key| key.as_str() != MIME_TYPE_FIELD && key.as_str() != BASE64_FILE_FIELD)
        {
            return Err(entry_error(
                index,
                format!(
                    "has unexpected field \"{extra}\"; only \"{MIME_TYPE_FIELD}\" and \"{BASE64_FILE_FIELD}\" are allowed"
                ),
            ));
        }

        let mime_type = string_field(index, object, MIME_TYPE_FIELD)?
            .parse::<MimeType>()
            .map_err(|reason| entry_error(index, format!("has {reason}")))?;
        let base64_file = string_field(index, object, BASE64_FILE_FIELD)?;

        Ok(Self::new(mime_type, base64_file))
    }
}

fn string_field<'a>(index: usize, object: &'a Map<String, Value>, name: &str) -> Result<&'a str> {
    match object.get(name) {
        None => Err(entry_error(
            index,
            format!("is missing required field \"{name}\""),
        )),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(entry_error(
            index,
            format!(
                "field \"{name}\" must be a string, got {}",
                json_type_name(other)
            ),
        )),
    }
}

fn entry_error(index: usize, reason: String) -> HydraError {
    HydraError::Validation(format!("file entry {index} {reason}"))
}

/// Resolve a path's MIME type, failing with a message that names the path.
pub(crate) fn resolve_mime_type(path: &Path) -> Result<MimeType> {
    MimeType::from_path(path).ok_or_else(|| {
        HydraError::Validation(format!(
            "{} does not have a valid extension; it must be one of {}",
            path.display(),
            MimeType::accepted_extensions()
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(result: Result<Vec<FileEntry>>) -> String {
        match result {
            Err(HydraError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_bytes_uses_standard_padded_base64() {
        let entry = FileEntry::from_bytes(MimeType::Jpeg, &[0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(entry.base64_file, "/9j/4A==");
        assert_eq!(FileEntry::from_bytes(MimeType::Png, b"A").base64_file, "QQ==");
    }

    #[test]
    fn test_serializes_with_wire_field_names() {
        let entry = FileEntry::new(MimeType::Png, "QQ==");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"mimeType": "image/png", "base64File": "QQ=="})
        );
    }

    #[test]
    fn test_from_json_entries_passes_values_through() {
        let values = vec![
            json!({"mimeType": "image/png", "base64File": "QQ=="}),
            json!({"base64File": "Qg==", "mimeType": "application/pdf"}),
        ];

        let entries = FileEntry::from_json_entries(&values).unwrap();
        assert_eq!(
            entries,
            vec![
                FileEntry::new(MimeType::Png, "QQ=="),
                FileEntry::new(MimeType::Pdf, "Qg=="),
            ]
        );
    }

    #[test]
    fn test_from_json_entries_accepts_empty_list() {
        assert!(FileEntry::from_json_entries(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_entries_rejects_non_object() {
        let values = vec![json!({"mimeType": "image/png", "base64File": "QQ=="}), json!("scan.png")];
        let msg = validation_message(FileEntry::from_json_entries(&values));
        assert!(msg.starts_with("file entry 1 "), "{msg}");
        assert!(msg.contains("JSON object"), "{msg}");
        assert!(msg.contains("a string"), "{msg}");
    }

    #[test]
    fn test_from_json_entries_rejects_missing_field() {
        let values = vec![json!({"mimeType": "image/png"})];
        let msg = validation_message(FileEntry::from_json_entries(&values));
        assert!(msg.contains("file entry 0"), "{msg}");
        assert!(msg.contains("missing required field \"base64File\""), "{msg}");
    }

    #[test]
    fn test_from_json_entries_rejects_wrong_field_type() {
        let values = vec![json!({"mimeType": "image/png", "base64File": 42})];
        let msg = validation_message(FileEntry::from_json_entries(&values));
        assert!(msg.contains("\"base64File\" must be a string"), "{msg}");
        assert!(msg.contains("a number"), "{msg}");
    }

    #[test]
    fn test_from_json_entries_rejects_unexpected_field() {
        let values = vec![json!({"mimeType": "image/png", "base64File": "QQ==", "name": "a.png"})];
        let msg = validation_message(FileEntry::from_json_entries(&values));
        assert!(msg.contains("unexpected field \"name\""), "{msg}");
    }

    #[test]
    fn test_from_json_entries_rejects_unknown_mime_type() {
        let values = vec![
            json!({"mimeType": "image/png", "base64File": "QQ=="}),
            json!({"mimeType": "image/png", "base64File": "QQ=="}),
            json!({"mimeType": "image/tiff", "base64File": "QQ=="}),
        ];
        let msg = validation_message(FileEntry::from_json_entries(&values));
        assert!(msg.contains("file entry 2"), "{msg}");
        assert!(msg.contains("unrecognized mimeType \"image/tiff\""), "{msg}");
    }

    #[test]
    fn test_resolve_mime_type_names_offending_path() {
        let err = resolve_mime_type(Path::new("notes/todo.txt")).unwrap_err();
        assert!(matches!(err, HydraError::Validation(_)));
        let msg = err.to_string();
        assert!(msg.contains("notes/todo.txt"), "{msg}");
        assert!(msg.contains("\".png\""), "{msg}");
    }

    #[tokio::test]
    async fn test_from_path_reads_and_encodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.PNG");
        std::fs::write(&path, b"A").unwrap();

        let entry = FileEntry::from_path(&path).await.unwrap();
        assert_eq!(entry, FileEntry::new(MimeType::Png, "QQ=="));
    }

    #[tokio::test]
    async fn test_from_path_propagates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileEntry::from_path(dir.path().join("missing.pdf"))
            .await
            .unwrap_err();
        match err {
            HydraError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
