//! Integration tests for persistence and seeding: restarts against a
//! directory store, seed files and HTTP seeds, and degraded storage.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use taskboard::config::BoardConfig;
use taskboard::seed::{FileSeed, HttpSeed, NoSeed, StaticSeed};
use taskboard::store::{FileStore, InMemoryStore, KeyValueStore};
use taskboard::{Board, BoardManager, Column, FilterState, InitSource, NewTask};
use taskboard_proto::codec;
use url::Url;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn seed_board() -> Board {
    Board::new(
        vec![
            Column::new("todo", "To Do"),
            Column::new("doing", "Doing").with_wip_limit(2),
            Column::new("done", "Done"),
        ],
        vec![
            NewTask::new("Draft release notes", "todo").into_task("s1".into()),
            NewTask::new("Tag the release", "todo").into_task("s2".into()),
        ],
    )
}

async fn serve_seed(board: Board) -> Url {
    let body = codec::encode_board(&board).unwrap();
    let app = Router::new().route("/seed.json", get(move || async move { body }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/seed.json")).unwrap()
}

// ---------------------------------------------------------------------------
// Restarts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn board_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let created = {
        let mut manager = BoardManager::new(FileStore::new(dir.path()));
        assert_eq!(
            manager.initialize(&StaticSeed::new(seed_board())).await,
            InitSource::Seeded
        );
        let id = manager.create_task(NewTask::new("Publish", "doing")).unwrap();
        manager.move_task(&"s2".into(), &"done".into(), None);
        id
    };

    let mut restarted = BoardManager::new(FileStore::new(dir.path()));
    assert_eq!(restarted.initialize(&NoSeed).await, InitSource::Restored);
    let board = restarted.state().board();
    assert_eq!(board.tasks.len(), 3);
    assert_eq!(board.task(&created).unwrap().column_id.as_str(), "doing");
    assert_eq!(board.task(&"s2".into()).unwrap().column_id.as_str(), "done");
}

#[tokio::test]
async fn filters_are_not_persisted() {
    let store = Arc::new(InMemoryStore::new());
    let mut manager = BoardManager::new(Arc::clone(&store));
    manager.initialize(&StaticSeed::new(seed_board())).await;
    manager.update_filters(FilterState::new().with_assignee("alice"));
    manager.create_task(NewTask::new("Anything", "todo"));

    let mut restarted = BoardManager::new(Arc::clone(&store));
    restarted.initialize(&NoSeed).await;
    assert!(restarted.state().filters().is_empty());
    assert_eq!(restarted.state().tasks().len(), 3);
}

#[tokio::test]
async fn cleared_storage_falls_back_to_seed() {
    let store = Arc::new(InMemoryStore::new());
    let mut manager = BoardManager::new(Arc::clone(&store));
    manager.initialize(&StaticSeed::new(seed_board())).await;
    manager.create_task(NewTask::new("Temporary", "todo"));
    assert!(manager.clear_persisted());

    let mut restarted = BoardManager::new(Arc::clone(&store));
    assert_eq!(
        restarted.initialize(&StaticSeed::new(seed_board())).await,
        InitSource::Seeded
    );
    assert_eq!(restarted.state().tasks().len(), 2);
}

#[tokio::test]
async fn corrupt_snapshot_is_treated_as_missing() {
    let store = Arc::new(InMemoryStore::new());
    store.set("board", "{\"columns\": 12}").unwrap();

    let mut manager = BoardManager::new(Arc::clone(&store));
    assert_eq!(
        manager.initialize(&StaticSeed::new(seed_board())).await,
        InitSource::Seeded
    );
    let saved = codec::decode_board(&store.get("board").unwrap().unwrap()).unwrap();
    assert_eq!(saved, seed_board());
}

// ---------------------------------------------------------------------------
// Seeds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seeds_from_http() {
    let url = serve_seed(seed_board()).await;
    let mut manager = BoardManager::new(InMemoryStore::new());
    assert_eq!(
        manager.initialize(&HttpSeed::new(url)).await,
        InitSource::Seeded
    );
    assert_eq!(manager.state().board().as_ref(), &seed_board());
}

#[tokio::test]
async fn http_404_leaves_board_empty() {
    let url = serve_seed(seed_board()).await;
    let mut manager = BoardManager::new(InMemoryStore::new());
    let missing = HttpSeed::new(url.join("elsewhere.json").unwrap());
    assert_eq!(manager.initialize(&missing).await, InitSource::Empty);
    assert!(manager.state().board().is_empty());
}

#[tokio::test]
async fn seeds_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.json");
    std::fs::write(&path, codec::encode_board(&seed_board()).unwrap()).unwrap();

    let mut manager = BoardManager::new(InMemoryStore::new());
    assert_eq!(
        manager.initialize(&FileSeed::new(&path)).await,
        InitSource::Seeded
    );
    assert_eq!(manager.state().columns().len(), 3);
}

#[tokio::test]
async fn configured_board_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    std::fs::write(&seed_path, codec::encode_board(&seed_board()).unwrap()).unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[storage]\ndir = {:?}\nkey = \"release\"\n\n[seed]\npath = {:?}\n",
            dir.path().join("data"),
            seed_path
        ),
    )
    .unwrap();

    let config = BoardConfig::load(Some(config_path.as_path())).unwrap();
    let mut manager = BoardManager::with_key(config.file_store(), config.storage_key.clone());
    assert_eq!(manager.initialize(&config.seed()).await, InitSource::Seeded);
    assert!(dir.path().join("data").join("release.json").exists());
}

// ---------------------------------------------------------------------------
// Degraded storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unavailable_storage_still_runs_in_memory() {
    let store = Arc::new(InMemoryStore::unavailable());
    let mut manager = BoardManager::new(Arc::clone(&store));
    assert_eq!(
        manager.initialize(&StaticSeed::new(seed_board())).await,
        InitSource::Seeded
    );

    let id = manager.create_task(NewTask::new("In memory only", "todo")).unwrap();
    assert!(manager.state().board().task(&id).is_some());
    assert!(store.is_empty());

    store.set_available(true);
    manager.delete_task(&"s1".into());
    let saved = codec::decode_board(&store.get("board").unwrap().unwrap()).unwrap();
    assert_eq!(saved.tasks.len(), 2);
}

#[tokio::test]
async fn blocked_directory_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let mut manager = BoardManager::new(FileStore::new(&blocker));
    assert_eq!(
        manager.initialize(&StaticSeed::new(seed_board())).await,
        InitSource::Seeded
    );
    assert!(manager.create_task(NewTask::new("Still works", "todo")).is_some());
    assert!(!manager.clear_persisted());
}
