//! Client for the Siftrics Hydra OCR API.
//!
//! Hydra recognizes text in PDFs and images. This crate packages local files
//! (or content that is already base64-encoded) into a single JSON request,
//! posts it to `https://siftrics.com/api/hydra/{data_source_id}/` and returns
//! the `Rows` of the response, one per input file and in input order.
//!
//! # Usage
//!
//! ```rust,no_run
//! use hydra::{Client, RecognizeOptions};
//!
//! #[tokio::main]
//! async fn main() -> hydra::Result<()> {
//!     let client = Client::new("your-api-key");
//!
//!     let rows = client
//!         .recognize(
//!             "my-data-source",
//!             &["invoice.pdf", "receipt.jpg"],
//!             &RecognizeOptions {
//!                 do_faster: true,
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!
//!     for row in rows {
//!         println!("{row}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call either sends exactly one request or fails before sending
//! anything. [`HydraError`] separates bad input (`Validation`, `Io`) from
//! transport failures (`Http`) and from a server that answered successfully
//! with an unexpected body (`ProtocolViolation`).

mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{HydraError, Result};
pub use models::{FileEntry, MimeType, RecognizeOptions, RecognizeRequest, Row};
