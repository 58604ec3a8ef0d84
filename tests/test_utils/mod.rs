//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use ftchat::api::AppState;
use ftchat::api::app;
use ftchat::core::AppConfig;

/// Creates a test application router pointed at a mock completion API.
///
/// Config is constructed directly instead of from the environment so tests
/// can run in parallel, and the typewriter tick is shortened so streaming
/// responses finish quickly.
pub fn test_app(api_hostname: &str) -> Router {
    let app_config = AppConfig {
        openai_api_hostname: api_hostname.to_string(),
        openai_api_key: String::from("test-api-key"),
        openai_model: String::from("davinci:ft-wcc-2023-06-21-01-13-35"),
        typewriter_tick_ms: 1,
    };
    let app_state = AppState::new(app_config);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
