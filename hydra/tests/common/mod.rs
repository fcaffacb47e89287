// Common test utilities for integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;

use hydra::{Client, ClientConfig};
use wiremock::MockServer;

static INIT: Once = Once::new();

pub const TEST_API_KEY: &str = "test-api-key";
pub const DATA_SOURCE_ID: &str = "ds-test";

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Path the client posts to for [`DATA_SOURCE_ID`]
pub fn endpoint_path() -> String {
    format!("/api/hydra/{DATA_SOURCE_ID}/")
}

/// Client pointed at the mock server's `/api/` root
pub fn client_for(server: &MockServer) -> Client {
    init_test_logger();
    let config = ClientConfig::default().with_base_url(format!("{}/api/", server.uri()));
    Client::with_config(TEST_API_KEY, config).expect("Failed to build test client")
}

/// Write a fixture file into `dir` and return its path
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("Failed to write fixture '{name}': {e}"));
    path
}

// Re-export commonly used crates for convenience
pub use tempfile;
pub use wiremock;
