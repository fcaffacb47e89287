mod file;
mod mime;
mod request;

pub use file::FileEntry;
pub(crate) use file::resolve_mime_type;
pub use mime::MimeType;
pub use request::{RecognizeOptions, RecognizeRequest, Row, DEFAULT_JPG_QUALITY};
