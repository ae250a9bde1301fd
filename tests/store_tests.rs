use anidex::db::{AnimeStore, InMemoryStore, Store};
use anidex::models::anime::NewAnime;
use anidex::services::{LookupError, LookupRequest, LookupService};
use std::sync::Arc;

async fn temp_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("anidex-store-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

#[tokio::test]
async fn test_sqlite_store_contract() {
    let store = temp_store().await;

    let first = store.insert(NewAnime::titled("Bleach")).await.unwrap();
    let second = store.insert(NewAnime::titled("bleach")).await.unwrap();
    let third = store.insert(NewAnime::titled("Bleach")).await.unwrap();
    assert!(first.id < second.id && second.id < third.id);

    let exact = store.get_by_title("Bleach").await.unwrap().unwrap();
    assert_eq!(exact.id, first.id);

    let lower = store.get_by_title("bleach").await.unwrap().unwrap();
    assert_eq!(lower.id, second.id);

    assert!(store.get_by_title("BLEACH").await.unwrap().is_none());

    let titles = store.list_all_titles().await.unwrap();
    let ids: Vec<i32> = titles.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);

    assert!(store.get_by_id(9999).await.unwrap().is_none());
    assert_eq!(store.count_anime().await.unwrap(), 3);
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_in_memory_sqlite_url_uses_single_connection() {
    let store = Store::with_pool_options("sqlite::memory:", 5, 1)
        .await
        .expect("failed to open in-memory store");

    store.insert(NewAnime::titled("Mushishi")).await.unwrap();
    assert_eq!(store.list_all_titles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_fuzzy_ties_resolve_to_lowest_id_in_both_stores() {
    let sqlite: Arc<dyn AnimeStore> = Arc::new(temp_store().await);
    let memory: Arc<dyn AnimeStore> = Arc::new(InMemoryStore::new());

    for store in [sqlite, memory] {
        let mut first = NewAnime::titled("Bleach");
        first.episodes = 366;
        store.insert(first).await.unwrap();
        let mut second = NewAnime::titled("bleach");
        second.episodes = 13;
        store.insert(second).await.unwrap();

        let lookup = LookupService::new(store, 40);
        let text = lookup
            .lookup(&LookupRequest::new("BLEACH", Vec::new()))
            .await
            .unwrap();
        assert_eq!(text, "Title: Bleach\nepisodes: 366\n");
    }
}

#[tokio::test]
async fn test_lookup_against_empty_sqlite_store() {
    let store: Arc<dyn AnimeStore> = Arc::new(temp_store().await);
    let lookup = LookupService::new(store, 40);

    let err = lookup
        .lookup(&LookupRequest::new("Naruto", Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::NotFound(_)));
}

#[tokio::test]
async fn test_unwritable_database_directory_is_reported() {
    let blocker =
        std::env::temp_dir().join(format!("anidex-store-blocker-{}", uuid::Uuid::new_v4()));
    std::fs::write(&blocker, b"not a directory").unwrap();

    let db_path = blocker.join("nested").join("anidex.db");
    let err = match Store::new(&format!("sqlite:{}", db_path.display())).await {
        Ok(_) => panic!("store opened below a regular file"),
        Err(err) => err,
    };

    assert!(
        format!("{err:#}").contains("Failed to create database directory"),
        "unexpected error: {err:#}"
    );

    std::fs::remove_file(&blocker).ok();
}
