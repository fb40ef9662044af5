//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port with its own catalog
//! payload files and user database.

use super::fixtures::{create_test_catalog, create_test_db_with_users};
use sonara_server::catalog::load_catalog_dir;
use sonara_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use sonara_server::user::UserStore;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with isolated catalog and database
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// User store for direct database access in tests
    pub user_store: Arc<dyn UserStore>,

    // Keep temp resources alive until drop
    _temp_catalog_dir: TempDir,
    _temp_db_dir: TempDir,
}

impl TestServer {
    /// Spawns a new test server on a random port and waits until it
    /// responds.
    ///
    /// # Panics
    ///
    /// Panics if fixtures, port binding, or server startup fail.
    pub async fn spawn() -> Self {
        let (temp_catalog_dir, catalog_dir) =
            create_test_catalog().expect("Failed to create test catalog");
        let (temp_db_dir, user_store) =
            create_test_db_with_users().expect("Failed to create test database");

        let catalog =
            Arc::new(load_catalog_dir(&catalog_dir).expect("Failed to load test catalog"));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to read local addr")
            .port();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            frontend_dir_path: None,
        };
        let app = make_app(config, catalog, user_store.clone()).expect("Failed to build app");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server crashed");
        });

        let base_url = format!("http://127.0.0.1:{}", port);

        // Wait for the server to accept requests.
        let probe = reqwest::Client::new();
        for _ in 0..50 {
            if probe.get(&base_url).send().await.is_ok() {
                return TestServer {
                    base_url,
                    user_store,
                    _temp_catalog_dir: temp_catalog_dir,
                    _temp_db_dir: temp_db_dir,
                };
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Test server did not become ready");
    }
}
