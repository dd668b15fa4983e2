//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use openversion::version::adapters::postgres::{PostgresVersionRepository, connect_pool};
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// SQL creating the versions table.
pub const CREATE_VERSIONS_SQL: &str =
    include_str!("../../migrations/2025-09-03-000001_create_versions/up.sql");

/// Repository type exercised by these tests.
pub type PgRepository = PostgresVersionRepository<DefaultClock>;

/// Creates a tokio runtime for async operations in tests.
#[fixture]
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Drops the per-test schema even if the test panics.
pub struct SchemaGuard {
    base_url: String,
    schema: String,
}

impl Drop for SchemaGuard {
    fn drop(&mut self) {
        let schema = &self.schema;
        let dropped = PgConnection::establish(&self.base_url)
            .map_err(|err| err.to_string())
            .and_then(|mut conn| {
                conn.batch_execute(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE"))
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = dropped {
            eprintln!("Warning: failed to drop test schema {schema}: {err}");
        }
    }
}

/// Repository bound to a fresh, migrated schema.
pub struct PgContext {
    /// Repository under test.
    pub repository: Arc<PgRepository>,
    /// Runtime driving async calls.
    pub rt: Runtime,
    _guard: SchemaGuard,
}

/// Returns a repository over a fresh, migrated schema.
///
/// Panics when `OPENVERSION_TEST_DATABASE_URL` is unset, so an ignored test
/// run without a server fails instead of passing vacuously.
#[fixture]
pub fn pg_context(test_runtime: Runtime) -> PgContext {
    let base_url = std::env::var("OPENVERSION_TEST_DATABASE_URL")
        .expect("OPENVERSION_TEST_DATABASE_URL must name a PostgreSQL server");
    let schema = format!("openversion_test_{}", uuid::Uuid::new_v4().simple());

    let mut admin = PgConnection::establish(&base_url).expect("connect to test server");
    admin
        .batch_execute(&format!("CREATE SCHEMA {schema}"))
        .expect("create test schema");
    let guard = SchemaGuard {
        base_url: base_url.clone(),
        schema: schema.clone(),
    };

    let url = schema_url(&base_url, &schema);
    let mut conn = PgConnection::establish(&url).expect("connect to test schema");
    conn.batch_execute(CREATE_VERSIONS_SQL)
        .expect("apply versions migration");

    let timeout = Duration::from_secs(5);
    let statement_timeout = Duration::from_secs(30);
    let pool = connect_pool(&url, 4, timeout, statement_timeout).expect("build pool");
    let repository = PostgresVersionRepository::new(pool, Arc::new(DefaultClock));
    PgContext {
        repository: Arc::new(repository),
        rt: test_runtime,
        _guard: guard,
    }
}

/// Pins every pooled connection to `schema` through the libpq `options`
/// parameter.
fn schema_url(base_url: &str, schema: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}options=-csearch_path%3D{schema}")
}
