use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::config::{ApiDocsConfig, AppConfig, Config, DatabaseConfig};
use crate::core::database::LivenessProbe;
use crate::core::error::{AppError, Result};
use crate::core::router::build_router;
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::categories::CategoryService;
use crate::features::status::StatusService;

/// In-memory stand-in for the PostgreSQL repository
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    rows: RwLock<BTreeMap<i64, Category>>,
    next_id: RwLock<i64>,
    failing: bool,
    panicking: bool,
}

impl InMemoryCategoryRepository {
    /// Every call fails as if the database were gone
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Every call panics inside the handler
    pub fn panicking() -> Self {
        Self {
            panicking: true,
            ..Self::default()
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check(&self) -> Result<()> {
        if self.panicking {
            panic!("category store exploded");
        }
        if self.failing {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        self.check()?;
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn create(&self, new: NewCategory) -> Result<Category> {
        self.check()?;
        let mut next_id = self.next_id.write().await;
        *next_id += 1;

        let now = Utc::now();
        let category = Category {
            id: *next_id,
            name: new.name,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.check()?;
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: CategoryChanges) -> Result<Option<Category>> {
        self.check()?;
        let mut rows = self.rows.write().await;
        let Some(category) = rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            category.name = name;
        }
        if let Some(description) = changes.description {
            category.description = Some(description);
        }
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.check()?;
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}

/// Liveness probe with a fixed answer
pub struct StubProbe {
    up: bool,
}

impl StubProbe {
    pub fn up() -> Self {
        Self { up: true }
    }

    pub fn down() -> Self {
        Self { up: false }
    }
}

#[async_trait]
impl LivenessProbe for StubProbe {
    async fn ping(&self) -> std::result::Result<i32, sqlx::Error> {
        if self.up {
            Ok(1)
        } else {
            Err(sqlx::Error::PoolTimedOut)
        }
    }
}

pub fn test_config() -> Config {
    let empty = |_: &str| None;
    Config {
        app: AppConfig::from_lookup(empty).unwrap(),
        database: DatabaseConfig::from_lookup(empty).unwrap(),
        api_docs: ApiDocsConfig::from_env().unwrap(),
    }
}

/// Full application router over the given fakes
pub fn test_server(repository: Arc<dyn CategoryRepository>, probe: StubProbe) -> TestServer {
    let config = test_config();
    let category_service = Arc::new(CategoryService::new(repository));
    let status_service = Arc::new(StatusService::new(Arc::new(probe), config.app.mode));

    TestServer::new(build_router(&config, category_service, status_service)).unwrap()
}

/// Formatted log output collected by a thread-local subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route every event on the current thread into a buffer until the guard drops.
/// Use with the current-thread `#[tokio::test]` runtime.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
