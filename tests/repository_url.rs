mod common;

use shortlink::domain::entities::NewUrlMapping;
use shortlink::domain::repositories::{StorageError, UrlRepository};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[sqlx::test]
async fn test_insert_and_lookup(pool: SqlitePool) {
    let repo = common::create_test_repository(pool);

    let created = repo
        .insert(NewUrlMapping::new("abc123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(created.code, "abc123");
    assert_eq!(created.original_url, "https://example.com");
    assert!(created.id > 0);

    let found = repo.lookup("abc123").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.original_url, "https://example.com");
}

#[sqlx::test]
async fn test_lookup_not_found(pool: SqlitePool) {
    let repo = common::create_test_repository(pool);

    let result = repo.lookup("missing").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_lookup_is_case_sensitive(pool: SqlitePool) {
    common::create_test_link(&pool, "AbC123", "https://example.com").await;
    let repo = common::create_test_repository(pool);

    assert!(repo.lookup("AbC123").await.unwrap().is_some());
    assert!(repo.lookup("abc123").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_insert_stores_url_verbatim(pool: SqlitePool) {
    let repo = common::create_test_repository(pool);

    repo.insert(NewUrlMapping::new("raw1", "example.com/Path?q=1"))
        .await
        .unwrap();

    let found = repo.lookup("raw1").await.unwrap().unwrap();
    assert_eq!(found.original_url, "example.com/Path?q=1");
}

#[sqlx::test]
async fn test_duplicate_code_is_collision(pool: SqlitePool) {
    let repo = common::create_test_repository(pool.clone());

    repo.insert(NewUrlMapping::new("dup123", "https://first.example"))
        .await
        .unwrap();

    let result = repo
        .insert(NewUrlMapping::new("dup123", "https://second.example"))
        .await;

    match result {
        Err(StorageError::CodeCollision { code }) => assert_eq!(code, "dup123"),
        other => panic!("expected collision, got {:?}", other),
    }

    let found = repo.lookup("dup123").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://first.example");
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_concurrent_inserts_of_same_code_have_one_winner(
    pool_opts: SqlitePoolOptions,
    connect_opts: SqliteConnectOptions,
) {
    let pool = common::concurrent_pool(pool_opts, connect_opts).await;
    let repo = common::create_test_repository(pool.clone());

    let mut handles = Vec::new();
    for round in 0..4 {
        for writer in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let code = format!("race{round:02}");
                let result = repo
                    .insert(NewUrlMapping::new(code, format!("https://example.com/{writer}")))
                    .await;
                (round, result)
            }));
        }
    }

    let mut winners = [0; 4];
    let mut collisions = 0;
    for handle in handles {
        match handle.await.unwrap() {
            (round, Ok(_)) => winners[round] += 1,
            (_, Err(e)) if e.is_collision() => collisions += 1,
            (_, Err(e)) => panic!("unexpected storage error: {}", e),
        }
    }

    assert_eq!(winners, [1; 4]);
    assert_eq!(collisions, 28);
    assert_eq!(common::count_links(&pool).await, 4);
}

#[sqlx::test]
async fn test_concurrent_lookups_see_committed_inserts(
    pool_opts: SqlitePoolOptions,
    connect_opts: SqliteConnectOptions,
) {
    let pool = common::concurrent_pool(pool_opts, connect_opts).await;
    let repo = common::create_test_repository(pool);

    let mut handles = Vec::new();
    for i in 0..64 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            let code = format!("code{i:02}");
            let url = format!("https://example.com/{i}");
            repo.insert(NewUrlMapping::new(code.clone(), url.clone()))
                .await
                .unwrap();

            let found = repo.lookup(&code).await.unwrap().unwrap();
            assert_eq!(found.original_url, url);
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(repo.count().await.unwrap(), 64);
}

#[sqlx::test]
async fn test_count(pool: SqlitePool) {
    let repo = common::create_test_repository(pool.clone());

    assert_eq!(repo.count().await.unwrap(), 0);

    common::create_test_link(&pool, "one", "https://example.com/1").await;
    common::create_test_link(&pool, "two", "https://example.com/2").await;

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_ping(pool: SqlitePool) {
    let repo = common::create_test_repository(pool);

    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
async fn test_ping_after_close_fails(pool: SqlitePool) {
    let repo = common::create_test_repository(pool);

    repo.close().await;

    assert!(repo.ping().await.is_err());
}
