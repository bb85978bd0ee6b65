//! Shared test infrastructure for the HTTP API tests.
//!
//! Each test gets its own in-memory SQLite database and its own stand-in
//! metadata service listening on an ephemeral port.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_test::TestServer;
use serde_json::{Value, json};

use songbook_persistence::backends::sqlite::SqliteBackend;
use songbook_rest::{HttpMetadataClient, ServerConfig, create_app_with_config};

/// Song whose lookup answers 500.
pub const FAILING_SONG: &str = "Broken Record";

/// Song whose lookup answers with an ISO date instead of DD.MM.YYYY.
pub const BAD_DATE_SONG: &str = "Wrong Calendar";

/// Lyrics returned for every other song.
pub const LYRICS: &str = "They will not force us\n\nThey will stop degrading us\n\nWe will be victorious";

async fn info(Query(params): Query<HashMap<String, String>>) -> Response {
    let song = params.get("song").map(String::as_str).unwrap_or_default();
    match song {
        FAILING_SONG => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        BAD_DATE_SONG => Json(json!({
            "releaseDate": "2023-09-23",
            "text": LYRICS,
            "link": "https://youtu.be/bad-date",
        }))
        .into_response(),
        _ => Json(json!({
            "releaseDate": "07.09.2009",
            "text": LYRICS,
            "link": format!("https://youtu.be/{}", song.to_lowercase().replace(' ', "-")),
        }))
        .into_response(),
    }
}

/// Starts the stand-in metadata service and returns its lookup URL.
async fn spawn_metadata_service() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind metadata service");
    let addr = listener.local_addr().expect("Failed to read metadata address");

    let app = Router::new().route("/info", get(info));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Metadata service failed");
    });

    format!("http://{}/info", addr)
}

/// Creates a test server backed by a fresh in-memory database.
///
/// The server uses [`ServerConfig::for_testing`], so the page ceiling is 5.
pub async fn test_server() -> TestServer {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");

    let mut config = ServerConfig::for_testing();
    config.info_service_url = spawn_metadata_service().await;

    let metadata = HttpMetadataClient::new(&config.info_service_url, Duration::from_secs(5))
        .expect("Failed to create metadata client");

    let app = create_app_with_config(backend, Arc::new(metadata), config);
    TestServer::new(app).expect("Failed to create test server")
}

/// Creates an audio through the API and returns its uuid.
pub async fn create_audio(server: &TestServer, group: &str, song: &str) -> String {
    let response = server
        .post("/api/v1/audios")
        .json(&json!({ "group": group, "song": song }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    body["data"]["uuid"]
        .as_str()
        .expect("uuid in create response")
        .to_string()
}
