//! SQLite backend integration tests.
//!
//! These tests exercise the audio aggregate end to end against an in-memory
//! database.

use chrono::NaiveDate;
use uuid::Uuid;

use songbook_persistence::backends::sqlite::SqliteBackend;
use songbook_persistence::core::{AudioStorage, Backend, LyricStorage};
use songbook_persistence::error::{ResourceError, StorageError};
use songbook_persistence::types::{
    AudioFilter, AudioFilterRequest, AudioUpdateRequest, NewAudio, NewLyric, Pagination,
    segment_lyrics,
};

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

fn new_audio(group: &str, song: &str, released: &str, lyrics: &str) -> NewAudio {
    NewAudio {
        group: group.to_string(),
        song: song.to_string(),
        release_date: NaiveDate::parse_from_str(released, "%Y-%m-%d").unwrap(),
        link: format!("https://example.com/{}", song.to_lowercase().replace(' ', "-")),
        lyrics: segment_lyrics(lyrics),
    }
}

async fn seed(backend: &SqliteBackend) -> (Uuid, Uuid, Uuid) {
    let a = backend
        .create_with_lyrics(new_audio(
            "Muse",
            "Supermassive Black Hole",
            "2006-06-19",
            "Oh baby don't you know I suffer\n\nGlaciers melting in the dead of night",
        ))
        .await
        .unwrap();
    let b = backend
        .create_with_lyrics(new_audio(
            "Muse",
            "Uprising",
            "2009-09-07",
            "Paranoia is in bloom\n\nThey will not force us",
        ))
        .await
        .unwrap();
    let c = backend
        .create_with_lyrics(new_audio(
            "Radiohead",
            "Creep",
            "1992-09-21",
            "When you were here before\n\nI wish I was special",
        ))
        .await
        .unwrap();
    (a, b, c)
}

fn assert_not_found(err: StorageError) {
    assert!(
        matches!(err, StorageError::Resource(ResourceError::NotFound { .. })),
        "expected NotFound, got {err:?}"
    );
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_stores_every_segment_in_order() {
    let backend = create_backend();

    let id = backend
        .create_with_lyrics(new_audio("Muse", "Uprising", "2009-09-07", "first\n\nsecond"))
        .await
        .unwrap();

    let full = backend.find_with_lyrics(id).await.unwrap();
    assert_eq!(full.audio.uuid, id);
    assert_eq!(full.audio.group, "Muse");
    assert_eq!(full.audio.release_date, NaiveDate::from_ymd_opt(2009, 9, 7).unwrap());
    assert_eq!(full.audio.created_at, full.audio.updated_at);

    let stored: Vec<(i32, &str)> = full
        .lyrics
        .iter()
        .map(|l| (l.order, l.text.as_str()))
        .collect();
    assert_eq!(stored, vec![(0, "first"), (1, "second")]);
    assert!(full.lyrics.iter().all(|l| l.audio_uuid == id));
    assert_ne!(full.lyrics[0].uuid, full.lyrics[1].uuid);
}

#[tokio::test]
async fn test_create_rolls_back_when_lyrics_fail() {
    let backend = create_backend();

    // Two segments at the same position violate the lyrics uniqueness constraint.
    let mut audio = new_audio("Muse", "Uprising", "2009-09-07", "");
    audio.lyrics = vec![NewLyric::new(0, "a"), NewLyric::new(0, "b")];

    let result = backend.create_with_lyrics(audio).await;
    assert!(result.is_err());

    let listed = backend.list(Pagination::first(10)).await.unwrap();
    assert!(listed.is_empty(), "audio row must not survive a failed lyric insert");
}

#[tokio::test]
async fn test_create_without_lyrics() {
    let backend = create_backend();
    let mut audio = new_audio("Muse", "Uprising", "2009-09-07", "");
    audio.lyrics.clear();

    let id = backend.create_with_lyrics(audio).await.unwrap();
    let full = backend.find_with_lyrics(id).await.unwrap();
    assert!(full.lyrics.is_empty());
}

// ============================================================================
// Read Tests
// ============================================================================

#[tokio::test]
async fn test_find_missing_is_not_found() {
    let backend = create_backend();
    assert_not_found(backend.find(Uuid::new_v4()).await.unwrap_err());
    assert_not_found(backend.find_with_lyrics(Uuid::new_v4()).await.unwrap_err());
}

#[tokio::test]
async fn test_list_pages() {
    let backend = create_backend();
    seed(&backend).await;

    let first = backend.list(Pagination::new(0, 2)).await.unwrap();
    assert_eq!(first.len(), 2);

    let second = backend
        .list(Pagination::new(0, 2).next_page())
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert!(first.iter().all(|a| a.uuid != second[0].uuid));

    let beyond = backend.list(Pagination::new(30, 10)).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_list_by_audio_pages_lyrics() {
    let backend = create_backend();
    let id = backend
        .create_with_lyrics(new_audio("Muse", "Uprising", "2009-09-07", "a\n\nb\n\nc"))
        .await
        .unwrap();

    let page = backend.list_by_audio(id, Pagination::new(1, 5)).await.unwrap();
    let texts: Vec<_> = page.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["b", "c"]);

    let empty = backend.list_by_audio(id, Pagination::new(3, 5)).await;
    assert_not_found(empty.unwrap_err());

    let unknown = backend.list_by_audio(Uuid::new_v4(), Pagination::first(5)).await;
    assert_not_found(unknown.unwrap_err());
}

// ============================================================================
// Filter Tests
// ============================================================================

#[tokio::test]
async fn test_filter_by_group() {
    let backend = create_backend();
    seed(&backend).await;

    let filter = AudioFilter {
        group: Some("Muse".to_string()),
        ..Default::default()
    };
    let found = backend
        .list_by_filter(&filter, Pagination::first(10))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|a| a.group == "Muse"));
}

#[tokio::test]
async fn test_filter_by_inclusive_date_range() {
    let backend = create_backend();
    seed(&backend).await;

    let filter = AudioFilterRequest {
        after: Some("2006-06-19".to_string()),
        before: Some("2009-09-07".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap()
    .unwrap();

    let found = backend
        .list_by_filter(&filter, Pagination::first(10))
        .await
        .unwrap();
    let mut songs: Vec<_> = found.iter().map(|a| a.song.as_str()).collect();
    songs.sort();
    assert_eq!(songs, vec!["Supermassive Black Hole", "Uprising"]);
}

#[tokio::test]
async fn test_filter_by_song_phrase() {
    let backend = create_backend();
    seed(&backend).await;

    let filter = AudioFilter {
        song: Some("black hole".to_string()),
        ..Default::default()
    };
    let found = backend
        .list_by_filter(&filter, Pagination::first(10))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].song, "Supermassive Black Hole");
}

#[tokio::test]
async fn test_filter_by_lyric_returns_each_audio_once() {
    let backend = create_backend();
    backend
        .create_with_lyrics(new_audio(
            "Muse",
            "Uprising",
            "2009-09-07",
            "they will not force us\n\nthey will not force us",
        ))
        .await
        .unwrap();
    seed(&backend).await;

    let filter = AudioFilter {
        lyric: Some("will not force".to_string()),
        ..Default::default()
    };
    let found = backend
        .list_by_filter(&filter, Pagination::first(10))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_ne!(found[0].uuid, found[1].uuid);
}

#[tokio::test]
async fn test_filter_combines_predicates() {
    let backend = create_backend();
    seed(&backend).await;

    let filter = AudioFilter {
        group: Some("Muse".to_string()),
        lyric: Some("paranoia".to_string()),
        released_after: NaiveDate::from_ymd_opt(2000, 1, 1),
        ..Default::default()
    };
    let found = backend
        .list_by_filter(&filter, Pagination::first(10))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].song, "Uprising");

    let none = AudioFilter {
        group: Some("Radiohead".to_string()),
        lyric: Some("paranoia".to_string()),
        ..Default::default()
    };
    let found = backend
        .list_by_filter(&none, Pagination::first(10))
        .await
        .unwrap();
    assert!(found.is_empty());
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_replaces_lyrics_as_a_set() {
    let backend = create_backend();
    let id = backend
        .create_with_lyrics(new_audio("Muse", "Uprising", "2009-09-07", "a\n\nb"))
        .await
        .unwrap();

    let update = AudioUpdateRequest {
        lyrics: Some("x\n\ny\n\nz".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();
    let updated = backend.update(id, &update).await.unwrap();
    assert_eq!(updated.song, "Uprising");

    let full = backend.find_with_lyrics(id).await.unwrap();
    let stored: Vec<(i32, &str)> = full
        .lyrics
        .iter()
        .map(|l| (l.order, l.text.as_str()))
        .collect();
    assert_eq!(stored, vec![(0, "x"), (1, "y"), (2, "z")]);
}

#[tokio::test]
async fn test_update_columns_keeps_lyrics() {
    let backend = create_backend();
    let id = backend
        .create_with_lyrics(new_audio("Muse", "Uprising", "2009-09-07", "a\n\nb"))
        .await
        .unwrap();
    let before = backend.find(id).await.unwrap();

    let update = AudioUpdateRequest {
        song: Some("Resistance".to_string()),
        release_date: Some("2009-09-14".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();
    let updated = backend.update(id, &update).await.unwrap();

    assert_eq!(updated.song, "Resistance");
    assert_eq!(updated.group, "Muse");
    assert_eq!(updated.release_date, NaiveDate::from_ymd_opt(2009, 9, 14).unwrap());
    assert_eq!(updated.created_at, before.created_at);
    assert!(updated.updated_at >= before.updated_at);

    let full = backend.find_with_lyrics(id).await.unwrap();
    assert_eq!(full.lyrics.len(), 2);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let backend = create_backend();
    let update = AudioUpdateRequest {
        link: Some("https://example.com".to_string()),
        lyrics: Some("a".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();

    assert_not_found(backend.update(Uuid::new_v4(), &update).await.unwrap_err());
}

#[tokio::test]
async fn test_update_rolls_back_when_lyrics_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("songbook.db");
    let backend = SqliteBackend::open(&path).unwrap();
    backend.init_schema().unwrap();

    let id = backend
        .create_with_lyrics(new_audio("Muse", "Uprising", "2009-09-07", "first\n\nsecond"))
        .await
        .unwrap();
    let before = backend.find_with_lyrics(id).await.unwrap();

    // Reject one specific segment so the replacement fails after the old
    // lyrics were deleted and the audio row was updated.
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_lyric BEFORE INSERT ON lyrics WHEN NEW.text = 'rejected' \
         BEGIN SELECT RAISE(ABORT, 'lyric rejected'); END;",
    )
    .unwrap();

    let update = AudioUpdateRequest {
        song: Some("Resistance".to_string()),
        lyrics: Some("fine\n\nrejected".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();
    assert!(backend.update(id, &update).await.is_err());

    let after = backend.find_with_lyrics(id).await.unwrap();
    assert_eq!(after.audio.song, "Uprising");
    assert_eq!(after.audio.updated_at, before.audio.updated_at);
    let texts: Vec<_> = after.lyrics.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_lyrics_beyond_one_statement_are_batched() {
    let backend = create_backend();
    let text = vec!["x"; 9000].join("\n\n");

    let id = backend
        .create_with_lyrics(new_audio("Muse", "Uprising", "2009-09-07", &text))
        .await
        .unwrap();
    let full = backend.find_with_lyrics(id).await.unwrap();
    assert_eq!(full.lyrics.len(), 9000);

    let update = AudioUpdateRequest {
        lyrics: Some(vec!["y"; 9001].join("\n\n")),
        ..Default::default()
    }
    .validate()
    .unwrap();
    backend.update(id, &update).await.unwrap();

    let full = backend.find_with_lyrics(id).await.unwrap();
    assert_eq!(full.lyrics.len(), 9001);
    let orders: Vec<i32> = full.lyrics.iter().map(|l| l.order).collect();
    assert_eq!(orders, (0..9001).collect::<Vec<i32>>());
    assert!(full.lyrics.iter().all(|l| l.text == "y"));
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_cascades_to_lyrics() {
    let backend = create_backend();
    let (id, _, _) = seed(&backend).await;

    backend.delete(id).await.unwrap();

    assert_not_found(backend.find(id).await.unwrap_err());
    assert_not_found(
        backend
            .list_by_audio(id, Pagination::first(10))
            .await
            .unwrap_err(),
    );
    assert_eq!(backend.list(Pagination::first(10)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let backend = create_backend();
    assert_not_found(backend.delete(Uuid::new_v4()).await.unwrap_err());
}

// ============================================================================
// Backend Tests
// ============================================================================

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("songbook.db");

    let id = {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.initialize().await.unwrap();
        backend
            .create_with_lyrics(new_audio("Muse", "Uprising", "2009-09-07", "a"))
            .await
            .unwrap()
    };

    let backend = SqliteBackend::open(&path).unwrap();
    backend.initialize().await.unwrap();
    let audio = backend.find(id).await.unwrap();
    assert_eq!(audio.song, "Uprising");
    assert!(backend.health_check().await.is_ok());
}
