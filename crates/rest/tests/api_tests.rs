//! HTTP API tests against an in-memory SQLite catalog.
//!
//! Run with: `cargo test -p songbook-rest --test api_tests`

#![cfg(feature = "sqlite")]

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{BAD_DATE_SONG, FAILING_SONG, create_audio, test_server};

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_stores_looked_up_metadata() {
    let server = test_server().await;

    let uuid = create_audio(&server, "Muse", "Uprising").await;

    let response = server
        .get(&format!("/api/v1/audios/{}", uuid))
        .add_query_param("full", "true")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "audio got correctly");
    assert_eq!(body["data"]["uuid"], uuid);
    assert_eq!(body["data"]["group"], "Muse");
    assert_eq!(body["data"]["release_date"], "2009-09-07");
    assert_eq!(body["data"]["link"], "https://youtu.be/uprising");

    let lyrics = body["data"]["lyrics"].as_array().unwrap();
    assert_eq!(lyrics.len(), 3);
    assert_eq!(lyrics[0]["order"], 0);
    assert_eq!(lyrics[0]["text"], "They will not force us");
    assert_eq!(lyrics[2]["order"], 2);
    assert_eq!(lyrics[2]["text"], "We will be victorious");
}

#[tokio::test]
async fn test_create_response_envelope() {
    let server = test_server().await;

    let response = server
        .post("/api/v1/audios")
        .json(&json!({ "group": "Muse", "song": "Uprising" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["message"], "audio created correctly");
    assert!(uuid::Uuid::parse_str(body["data"]["uuid"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let server = test_server().await;

    let response = server
        .post("/api/v1/audios")
        .json(&json!({ "group": "", "song": "Uprising" }))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["message"], "validation err");
    assert_eq!(body["error"], "'group' is required and cannot be empty;");

    let response = server.post("/api/v1/audios").json(&json!({})).await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "'group' is required and cannot be empty;'song' is required and cannot be empty;"
    );
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let server = test_server().await;

    let response = server.post("/api/v1/audios").text("{\"group\": ").await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["message"], "read body err");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_metadata_failure_is_internal() {
    let server = test_server().await;

    let response = server
        .post("/api/v1/audios")
        .json(&json!({ "group": "Muse", "song": FAILING_SONG }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["message"], "create audio err");
    assert_eq!(
        body["error"],
        "got non 200 status: 500 Internal Server Error"
    );

    // Nothing was stored.
    let listing: Value = server.get("/api/v1/audios").await.json();
    assert!(listing["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rejects_unparsable_release_date() {
    let server = test_server().await;

    let response = server
        .post("/api/v1/audios")
        .json(&json!({ "group": "Muse", "song": BAD_DATE_SONG }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("invalid metadata"));
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_find_without_lyrics() {
    let server = test_server().await;
    let uuid = create_audio(&server, "Radiohead", "Creep").await;

    let body: Value = server.get(&format!("/api/v1/audios/{}", uuid)).await.json();
    assert_eq!(body["data"]["song"], "Creep");
    assert!(body["data"].get("lyrics").is_none());

    let body: Value = server
        .get(&format!("/api/v1/audios/{}", uuid))
        .add_query_param("full", "yes")
        .await
        .json();
    assert!(body["data"].get("lyrics").is_none());
}

#[tokio::test]
async fn test_find_unknown_audio_is_empty_success() {
    let server = test_server().await;

    for full in ["false", "true"] {
        let response = server
            .get(&format!("/api/v1/audios/{}", uuid::Uuid::new_v4()))
            .add_query_param("full", full)
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "no rows find", "data": {} }));
    }
}

#[tokio::test]
async fn test_find_rejects_malformed_uuid() {
    let server = test_server().await;

    let response = server.get("/api/v1/audios/not-a-uuid").await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["message"], "invalid uuid in path param");
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_pages_and_next_pagination() {
    let server = test_server().await;
    let first = create_audio(&server, "Muse", "Uprising").await;
    let second = create_audio(&server, "Muse", "Resistance").await;
    let third = create_audio(&server, "Radiohead", "Creep").await;

    let body: Value = server
        .get("/api/v1/audios")
        .add_query_param("limit", "2")
        .await
        .json();
    assert_eq!(body["message"], "audios got correctly");
    assert_eq!(body["next_pagination"], json!({ "offset": 2, "limit": 2 }));
    let mut seen: Vec<String> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["uuid"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(seen.len(), 2);

    let body: Value = server
        .get("/api/v1/audios")
        .add_query_param("limit", "2")
        .add_query_param("offset", "2")
        .await
        .json();
    assert_eq!(body["next_pagination"], json!({ "offset": 4, "limit": 2 }));
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    seen.push(data[0]["uuid"].as_str().unwrap().to_string());

    // Pages are disjoint and together cover every audio.
    seen.sort();
    let mut expected = vec![first, second, third];
    expected.sort();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_list_limit_is_capped_by_server_limit() {
    let server = test_server().await;

    for limit in ["5", "500", "0", "abc"] {
        let body: Value = server
            .get("/api/v1/audios")
            .add_query_param("limit", limit)
            .add_query_param("offset", "-3")
            .await
            .json();
        assert_eq!(body["next_pagination"], json!({ "offset": 5, "limit": 5 }));
        assert!(body["data"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_list_filters() {
    let server = test_server().await;
    create_audio(&server, "Muse", "Uprising").await;
    create_audio(&server, "Muse", "Resistance").await;
    create_audio(&server, "Radiohead", "Creep").await;

    let body: Value = server
        .get("/api/v1/audios")
        .add_query_param("group", "Muse")
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body: Value = server
        .get("/api/v1/audios")
        .add_query_param("song", "creep")
        .await
        .json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["group"], "Radiohead");

    // Every audio matches three lyric segments, but each is listed once.
    let body: Value = server
        .get("/api/v1/audios")
        .add_query_param("lyric", "will")
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let body: Value = server
        .get("/api/v1/audios")
        .add_query_param("after", "2009-09-07")
        .add_query_param("before", "2009-09-07")
        .add_query_param("group", "Radiohead")
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let body: Value = server
        .get("/api/v1/audios")
        .add_query_param("after", "2010-01-01")
        .await
        .json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_rejects_bad_dates() {
    let server = test_server().await;

    let response = server
        .get("/api/v1/audios")
        .add_query_param("after", "07.09.2009")
        .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({
        "message": "validation err",
        "error": "invalid after format, example: 2006-09-25;",
    }));

    let response = server
        .get("/api/v1/audios")
        .add_query_param("after", "2010-01-01")
        .add_query_param("before", "2009-01-01")
        .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({
        "message": "validation err",
        "error": "'after' date cannot be greater than 'before'",
    }));
}

// ============================================================================
// Lyrics
// ============================================================================

#[tokio::test]
async fn test_list_lyrics_pages() {
    let server = test_server().await;
    let uuid = create_audio(&server, "Muse", "Uprising").await;

    let body: Value = server
        .get(&format!("/api/v1/audios/{}/lyrics", uuid))
        .add_query_param("limit", "2")
        .await
        .json();
    assert_eq!(body["message"], "lyrics got correctly");
    assert_eq!(body["next_pagination"], json!({ "offset": 2, "limit": 2 }));
    let texts: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["They will not force us", "They will stop degrading us"]);

    let body: Value = server
        .get(&format!("/api/v1/audios/{}/lyrics", uuid))
        .add_query_param("limit", "2")
        .add_query_param("offset", "2")
        .await
        .json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["order"], 2);
}

#[tokio::test]
async fn test_list_lyrics_past_the_end_is_empty_success() {
    let server = test_server().await;
    let uuid = create_audio(&server, "Muse", "Uprising").await;

    let response = server
        .get(&format!("/api/v1/audios/{}/lyrics", uuid))
        .add_query_param("offset", "10")
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "message": "no rows find",
        "next_pagination": { "offset": 15, "limit": 5 },
        "data": [],
    }));

    let response = server
        .get(&format!("/api/v1/audios/{}/lyrics", uuid::Uuid::new_v4()))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "no rows find");
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_columns() {
    let server = test_server().await;
    let uuid = create_audio(&server, "Muse", "Uprising").await;

    let response = server
        .patch(&format!("/api/v1/audios/{}", uuid))
        .json(&json!({ "song": "Uprising (Live)", "release_date": "2010-06-01" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "audio updated correctly");
    assert_eq!(body["data"]["song"], "Uprising (Live)");
    assert_eq!(body["data"]["release_date"], "2010-06-01");
    assert_eq!(body["data"]["group"], "Muse");

    // Lyrics were not touched.
    let lyrics: Value = server
        .get(&format!("/api/v1/audios/{}/lyrics", uuid))
        .await
        .json();
    assert_eq!(lyrics["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_replaces_lyrics() {
    let server = test_server().await;
    let uuid = create_audio(&server, "Muse", "Uprising").await;

    let response = server
        .patch(&format!("/api/v1/audios/{}", uuid))
        .json(&json!({ "lyrics": "new verse\n\nnew chorus" }))
        .await;
    response.assert_status_ok();

    let body: Value = server
        .get(&format!("/api/v1/audios/{}", uuid))
        .add_query_param("full", "true")
        .await
        .json();
    let texts: Vec<&str> = body["data"]["lyrics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["new verse", "new chorus"]);
}

#[tokio::test]
async fn test_update_validation() {
    let server = test_server().await;
    let uuid = create_audio(&server, "Muse", "Uprising").await;

    let response = server
        .patch(&format!("/api/v1/audios/{}", uuid))
        .json(&json!({}))
        .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({
        "message": "validation error",
        "error": "at least one argument is required",
    }));

    let response = server
        .patch(&format!("/api/v1/audios/{}", uuid))
        .json(&json!({ "group": "", "release_date": "yesterday" }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "group cannot be empty;invalid date format, example: 2006-09-25;"
    );
}

#[tokio::test]
async fn test_update_unknown_audio_is_empty_success() {
    let server = test_server().await;

    let response = server
        .patch(&format!("/api/v1/audios/{}", uuid::Uuid::new_v4()))
        .json(&json!({ "song": "Nothing" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "no rows updated", "data": {} }));
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_removes_audio_and_lyrics() {
    let server = test_server().await;
    let uuid = create_audio(&server, "Muse", "Uprising").await;

    let response = server.delete(&format!("/api/v1/audios/{}", uuid)).await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "message": "audio deleted correctly",
        "data": { "uuid": uuid },
    }));

    let body: Value = server.get(&format!("/api/v1/audios/{}", uuid)).await.json();
    assert_eq!(body["message"], "no rows find");

    let body: Value = server
        .get(&format!("/api/v1/audios/{}/lyrics", uuid))
        .await
        .json();
    assert!(body["data"].as_array().unwrap().is_empty());

    let response = server.delete(&format!("/api/v1/audios/{}", uuid)).await;
    response.assert_json(&json!({ "message": "no rows deleted", "data": {} }));
}

#[tokio::test]
async fn test_delete_rejects_malformed_uuid() {
    let server = test_server().await;

    let response = server.delete("/api/v1/audios/1234").await;
    response.assert_status_bad_request();
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let server = test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "sqlite");
    assert!(body["timestamp"].is_string());
}
