//! HTTP client for end-to-end tests
//!
//! High-level wrapper over reqwest with cookie-based session management.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a new unauthenticated client
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle session cookies
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client pre-authenticated as the standard test user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        let client = Self::new(base_url);

        let response = client.login(TEST_USER, TEST_PASS).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Test user authentication failed"
        );

        client
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /v1/auth/login
    pub async fn login(&self, handle: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/v1/auth/login", self.base_url))
            .json(&serde_json::json!({
                "user_handle": handle,
                "password": password,
            }))
            .send()
            .await
            .expect("login request failed")
    }

    /// GET /v1/auth/logout
    pub async fn logout(&self) -> Response {
        self.client
            .get(format!("{}/v1/auth/logout", self.base_url))
            .send()
            .await
            .expect("logout request failed")
    }

    // ========================================================================
    // Catalog Endpoints
    // ========================================================================

    /// GET /v1/catalog/{kind}
    pub async fn list(&self, kind: &str) -> Response {
        self.client
            .get(format!("{}/v1/catalog/{}", self.base_url, kind))
            .send()
            .await
            .expect("list request failed")
    }

    /// GET /v1/catalog/{kind}/{id}
    pub async fn get_item(&self, kind: &str, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/catalog/{}/{}", self.base_url, kind, id))
            .send()
            .await
            .expect("get item request failed")
    }

    /// GET /v1/catalog/{kind}/facets
    pub async fn get_facets(&self, kind: &str) -> Response {
        self.client
            .get(format!("{}/v1/catalog/{}/facets", self.base_url, kind))
            .send()
            .await
            .expect("facets request failed")
    }

    /// POST /v1/catalog/{kind}/browse
    pub async fn browse(&self, kind: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}/v1/catalog/{}/browse", self.base_url, kind))
            .json(body)
            .send()
            .await
            .expect("browse request failed")
    }

    // ========================================================================
    // User Endpoints
    // ========================================================================

    /// GET /v1/user/theme
    pub async fn get_theme(&self) -> Response {
        self.client
            .get(format!("{}/v1/user/theme", self.base_url))
            .send()
            .await
            .expect("get theme request failed")
    }

    /// PUT /v1/user/theme
    pub async fn put_theme(&self, theme: &str) -> Response {
        self.client
            .put(format!("{}/v1/user/theme", self.base_url))
            .json(&serde_json::json!({ "theme": theme }))
            .send()
            .await
            .expect("put theme request failed")
    }
}
