mod common;

use shortlink::application::services::{ResolveError, ShortenError};
use shortlink::domain::repositories::UrlRepository;
use shortlink::infrastructure::metrics::NoopObserver;
use shortlink::infrastructure::persistence::{self, SqliteUrlRepository};
use shortlink::state::AppState;
use shortlink::utils::url_validator::UrlValidationError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::sync::Arc;

#[sqlx::test]
async fn test_shorten_then_resolve_returns_original(pool: SqlitePool) {
    let state = common::create_test_state(pool);

    for url in [
        "https://example.com",
        "http://example.com/a/b?c=d#frag",
        "https://sub.example.org:8443/path",
    ] {
        let shortened = state.shorten_service.shorten(url).await.unwrap();
        let resolved = state.redirect_resolver.resolve(&shortened.code).await.unwrap();

        assert_eq!(resolved, url);
    }
}

#[sqlx::test]
async fn test_shorten_without_scheme_is_stored_as_given(pool: SqlitePool) {
    let state = common::create_test_state(pool);

    let shortened = state.shorten_service.shorten("example.com").await.unwrap();

    assert_eq!(shortened.code.len(), 6);
    assert!(shortened.code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(
        shortened.short_url,
        format!("{}/{}", common::TEST_BASE_URL, shortened.code)
    );

    let resolved = state.redirect_resolver.resolve(&shortened.code).await.unwrap();
    assert_eq!(resolved, "example.com");
}

#[sqlx::test]
async fn test_invalid_urls_write_nothing(pool: SqlitePool) {
    let state = common::create_test_state(pool.clone());

    let cases = [
        ("", UrlValidationError::Empty),
        ("   ", UrlValidationError::Empty),
        ("ftp://example.com/file", UrlValidationError::UnsupportedScheme("ftp".to_string())),
        ("http://sho.rt/abc", UrlValidationError::Blocked("sho.rt".to_string())),
    ];

    for (url, expected) in cases {
        match state.shorten_service.shorten(url).await {
            Err(ShortenError::InvalidUrl(e)) => assert_eq!(e, expected, "input {:?}", url),
            other => panic!("expected invalid URL for {:?}, got {:?}", url, other),
        }
    }

    assert!(matches!(
        state.shorten_service.shorten("http://").await,
        Err(ShortenError::InvalidUrl(_))
    ));

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_concurrent_shortens_all_succeed(
    pool_opts: SqlitePoolOptions,
    connect_opts: SqliteConnectOptions,
) {
    let pool = common::concurrent_pool(pool_opts, connect_opts).await;
    let state = common::create_test_state(pool.clone());

    let mut handles = Vec::new();
    for i in 0..50 {
        let service = state.shorten_service.clone();
        handles.push(tokio::spawn(async move {
            service.shorten(&format!("https://example.com/{i}")).await
        }));
    }

    let mut codes = Vec::new();
    for handle in handles {
        codes.push(handle.await.unwrap().unwrap().code);
    }

    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 50);
    assert_eq!(common::count_links(&pool).await, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shorten_and_resolve_across_connections() {
    let database = common::TempDatabase::new();
    let config = database.config(10);

    let pool = persistence::connect(&config).await.unwrap();
    persistence::migrate(&pool).await.unwrap();
    let repository = Arc::new(SqliteUrlRepository::new(
        Arc::new(pool.clone()),
        Arc::new(NoopObserver::new()),
    ));
    let state = AppState::new(
        repository.clone(),
        Arc::new(NoopObserver::new()),
        config.url_validator(),
        config.shorten_settings(),
    );

    let mut handles = Vec::new();
    for i in 0..200 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            let url = format!("https://example.com/{i}");
            let shortened = state.shorten_service.shorten(&url).await.unwrap();
            let resolved = state.redirect_resolver.resolve(&shortened.code).await.unwrap();
            assert_eq!(resolved, url);
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(common::count_links(&pool).await, 200);
    repository.close().await;
}

#[sqlx::test]
async fn test_same_url_twice_gets_two_codes(pool: SqlitePool) {
    let state = common::create_test_state(pool.clone());

    let first = state.shorten_service.shorten("https://example.com").await.unwrap();
    let second = state.shorten_service.shorten("https://example.com").await.unwrap();

    assert_ne!(first.code, second.code);
    assert_eq!(common::count_links(&pool).await, 2);
}

#[sqlx::test]
async fn test_resolve_unknown_code(pool: SqlitePool) {
    let state = common::create_test_state(pool);

    let result = state.redirect_resolver.resolve("doesnotexist").await;

    assert!(matches!(result, Err(ResolveError::NotFound)));
}

#[sqlx::test]
async fn test_resolve_malformed_code(pool: SqlitePool) {
    let state = common::create_test_state(pool);

    for code in ["", "has space", "bad/code", "ünï"] {
        let result = state.redirect_resolver.resolve(code).await;
        assert!(matches!(result, Err(ResolveError::NotFound)), "code {:?}", code);
    }
}

#[sqlx::test]
async fn test_storage_failure_is_not_not_found(pool: SqlitePool) {
    let state = common::create_test_state(pool.clone());

    pool.close().await;

    let result = state.redirect_resolver.resolve("abc123").await;
    assert!(matches!(result, Err(ResolveError::Storage(_))));

    let result = state.shorten_service.shorten("https://example.com").await;
    assert!(matches!(result, Err(ShortenError::Storage(_))));
}
