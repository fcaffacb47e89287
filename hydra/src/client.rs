use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{HydraError, Result};
use crate::models::{resolve_mime_type, FileEntry, RecognizeOptions, RecognizeRequest, Row};

const CLIENT_USER_AGENT: &str = concat!("hydra-ocr/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(rename = "Rows")]
    rows: Option<Vec<Row>>,
}

/// Client for the Hydra OCR API.
///
/// Holds only the API key and transport settings; every call is one
/// independent request, so a single client can be cloned and shared freely.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Recognize local files, returning one row per file in input order.
    ///
    /// Options and every file extension are checked before any file is read,
    /// so a bad argument never results in partial work or a request.
    pub async fn recognize<P: AsRef<Path>>(
        &self,
        data_source_id: &str,
        file_paths: &[P],
        options: &RecognizeOptions,
    ) -> Result<Vec<Row>> {
        options.ensure_valid()?;

        let mime_types = file_paths
            .iter()
            .map(|path| resolve_mime_type(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut files = Vec::with_capacity(file_paths.len());
        for (path, mime_type) in file_paths.iter().zip(mime_types) {
            files.push(FileEntry::read(path.as_ref(), mime_type).await?);
        }

        debug!(data_source_id, files = files.len(), "Encoded files for recognition");

        let request = RecognizeRequest::new(files, *options);
        self.recognize_payload(data_source_id, &request).await
    }

    /// Recognize files the caller has already base64-encoded.
    pub async fn recognize_base64(
        &self,
        data_source_id: &str,
        entries: &[FileEntry],
        options: &RecognizeOptions,
    ) -> Result<Vec<Row>> {
        options.ensure_valid()?;

        let request = RecognizeRequest::new(entries.to_vec(), *options);
        self.recognize_payload(data_source_id, &request).await
    }

    /// Send a pre-built payload and unwrap the `Rows` field of the response.
    ///
    /// Any non-success status fails with [`HydraError::Http`] without reading
    /// the body. A success status without a `Rows` array is a
    /// [`HydraError::ProtocolViolation`].
    pub async fn recognize_payload<T>(&self, data_source_id: &str, payload: &T) -> Result<Vec<Row>>
    where
        T: Serialize + ?Sized,
    {
        let url = self.endpoint(data_source_id)?;
        let authorization = self.authorization()?;

        debug!(data_source_id, url = %url, "Sending recognition request");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, authorization)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        debug!(data_source_id, %status, "Recognition response received");

        let body = response.error_for_status()?.bytes().await?;

        let parsed: RecognizeResponse = serde_json::from_slice(&body).map_err(|e| {
            HydraError::ProtocolViolation(format!(
                "Got successful HTTP status code ({status}) but the body was not the JSON we were expecting: {e}"
            ))
        })?;

        parsed.rows.ok_or_else(|| {
            HydraError::ProtocolViolation(format!(
                "Got successful HTTP status code ({status}) but the body has no \"Rows\" field"
            ))
        })
    }

    fn endpoint(&self, data_source_id: &str) -> Result<Url> {
        if matches!(data_source_id, "" | "." | "..") {
            return Err(HydraError::Validation(format!(
                "data source id \"{data_source_id}\" cannot be used as a URL path segment"
            )));
        }

        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                HydraError::Validation(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["hydra", data_source_id, ""]);

        Ok(url)
    }

    /// `Basic <key>`: the raw key, not a base64 user:password pair.
    fn authorization(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Basic {}", self.api_key)).map_err(|e| {
            HydraError::Validation(format!("API key is not a valid header value: {e}"))
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}
