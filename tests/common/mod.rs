#![allow(dead_code)]

use shortlink::application::services::ShortenSettings;
use shortlink::config::Config;
use shortlink::domain::observer::Observer;
use shortlink::infrastructure::metrics::NoopObserver;
use shortlink::infrastructure::persistence::{self, SqliteUrlRepository};
use shortlink::state::AppState;
use shortlink::utils::url_validator::UrlValidator;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Connections opened for tests that race writers against each other.
pub const CONCURRENT_CONNECTIONS: u32 = 8;

/// Opens a pool with several connections on the per-test database, so
/// concurrent statements really run on separate SQLite connections.
pub async fn concurrent_pool(
    pool_opts: SqlitePoolOptions,
    connect_opts: SqliteConnectOptions,
) -> SqlitePool {
    let pool = pool_opts
        .min_connections(CONCURRENT_CONNECTIONS)
        .max_connections(CONCURRENT_CONNECTIONS)
        .connect_with(
            connect_opts
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(10)),
        )
        .await
        .unwrap();

    persistence::migrate(&pool).await.unwrap();

    pool
}

/// Database file under the system temp dir, unique per call.
pub struct TempDatabase {
    pub path: PathBuf,
}

impl TempDatabase {
    pub fn new() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);

        let path = std::env::temp_dir().join(format!(
            "shortlink-test-{}-{}.db",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::SeqCst)
        ));

        Self { path }
    }

    pub fn config(&self, max_connections: u32) -> Config {
        Config {
            database_url: format!("sqlite://{}", self.path.display()),
            base_url: TEST_BASE_URL.to_string(),
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            code_length: 6,
            max_generation_attempts: 5,
            blocked_hosts: Vec::new(),
            metrics_enabled: false,
            web_dir: "web".to_string(),
            db_max_connections: max_connections,
            db_connect_timeout: 30,
            db_idle_timeout: 600,
            db_max_lifetime: 3600,
        }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) {
    sqlx::query("INSERT INTO urls (code, original_url) VALUES (?, ?)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn test_settings() -> ShortenSettings {
    ShortenSettings {
        base_url: TEST_BASE_URL.to_string(),
        ..ShortenSettings::default()
    }
}

pub fn create_test_repository(pool: SqlitePool) -> Arc<SqliteUrlRepository> {
    Arc::new(SqliteUrlRepository::new(
        Arc::new(pool),
        Arc::new(NoopObserver::new()),
    ))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with_observer(pool, Arc::new(NoopObserver::new()))
}

pub fn create_test_state_with_observer(pool: SqlitePool, observer: Arc<dyn Observer>) -> AppState {
    let repository = Arc::new(SqliteUrlRepository::new(Arc::new(pool), observer.clone()));

    AppState::new(
        repository,
        observer,
        UrlValidator::with_blocked_hosts(["sho.rt"]),
        test_settings(),
    )
}
