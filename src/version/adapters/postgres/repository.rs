//! `PostgreSQL` repository implementation for version storage.

use super::{
    models::{NewVersionRow, VersionChangeset, VersionRow},
    schema::versions,
};
use crate::version::{
    domain::{
        BranchName, ConcurrencyToken, DomainVersion, PersistedVersionData, ProjectId, VersionId,
        VersionSnapshot,
    },
    ports::{VersionRepository, VersionRepositoryError, VersionRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// `PostgreSQL` connection pool type used by version adapters.
pub type VersionPgPool = Pool<ConnectionManager<PgConnection>>;

/// Applies a server-side `statement_timeout` to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, R2d2Error> for StatementTimeout {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), R2d2Error> {
        connection
            .batch_execute(&format!("SET statement_timeout = {}", self.0.as_millis()))
            .map_err(R2d2Error::QueryError)
    }
}

/// Builds a connection pool for `database_url`.
///
/// Queries running longer than `statement_timeout` are cancelled by the
/// server and surface as persistence errors.
///
/// # Errors
///
/// Returns [`VersionRepositoryError::Persistence`] when the pool cannot
/// open its initial connections within `connection_timeout`.
pub fn connect_pool(
    database_url: &str,
    max_size: u32,
    connection_timeout: Duration,
    statement_timeout: Duration,
) -> VersionRepositoryResult<VersionPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        .connection_customizer(Box::new(StatementTimeout(statement_timeout)))
        .build(manager)
        .map_err(VersionRepositoryError::persistence)
}

/// `PostgreSQL`-backed version repository.
///
/// Writes are compare-and-swap updates on the `concurrency_token` column.
pub struct PostgresVersionRepository<C>
where
    C: Clock + Send + Sync,
{
    pool: VersionPgPool,
    clock: Arc<C>,
}

impl<C> Clone for PostgresVersionRepository<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> PostgresVersionRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: VersionPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> VersionRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> VersionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(VersionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(VersionRepositoryError::persistence)?
    }
}

#[async_trait]
impl<C> VersionRepository for PostgresVersionRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn current_versions(
        &self,
        project_id: ProjectId,
    ) -> VersionRepositoryResult<VersionSnapshot> {
        self.run_blocking(move |connection| {
            let rows = versions::table
                .filter(versions::project_id.eq(project_id.value()))
                .select(VersionRow::as_select())
                .load::<VersionRow>(connection)
                .map_err(VersionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_version).collect()
        })
        .await
    }

    async fn save_version(&self, version: &DomainVersion) -> VersionRepositoryResult<()> {
        let now = self.clock.utc();
        let pending = version.clone();
        let expected = version.concurrency_token();

        self.run_blocking(move |connection| {
            let stored = versions::table
                .filter(versions::project_id.eq(pending.project_id().value()))
                .filter(versions::identifier_name.eq(pending.identifier_name().as_str()))
                .select(versions::id)
                .first::<i64>(connection)
                .optional()
                .map_err(VersionRepositoryError::persistence)?;

            match (stored, expected) {
                (Some(row_id), Some(guard)) => {
                    update_row(connection, row_id, guard.into_inner(), &pending, now)
                }
                (None, None) => insert_row(connection, &pending, now),
                _ => Err(VersionRepositoryError::conflict(&pending)),
            }
        })
        .await
    }
}

fn update_row(
    connection: &mut PgConnection,
    row_id: i64,
    guard: uuid::Uuid,
    version: &DomainVersion,
    now: chrono::DateTime<chrono::Utc>,
) -> VersionRepositoryResult<()> {
    let changeset = VersionChangeset {
        release_number: version.release_number().to_owned(),
        meta: version.meta().map(str::to_owned),
        last_updated: now,
        concurrency_token: ConcurrencyToken::new().into_inner(),
    };
    let updated = diesel::update(
        versions::table
            .filter(versions::id.eq(row_id))
            .filter(versions::concurrency_token.eq(guard)),
    )
    .set(&changeset)
    .execute(connection)
    .map_err(VersionRepositoryError::persistence)?;

    if updated == 0 {
        debug!(row_id, "conditional version update matched no row");
        return Err(VersionRepositoryError::conflict(version));
    }
    Ok(())
}

fn insert_row(
    connection: &mut PgConnection,
    version: &DomainVersion,
    now: chrono::DateTime<chrono::Utc>,
) -> VersionRepositoryResult<()> {
    let new_row = NewVersionRow {
        project_id: version.project_id().value(),
        identifier_name: version.identifier_name().as_str().to_owned(),
        release_number: version.release_number().to_owned(),
        meta: version.meta().map(str::to_owned),
        last_updated: now,
        concurrency_token: ConcurrencyToken::new().into_inner(),
    };
    diesel::insert_into(versions::table)
        .values(&new_row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                VersionRepositoryError::conflict(version)
            }
            _ => VersionRepositoryError::persistence(err),
        })?;
    Ok(())
}

fn row_to_version(row: VersionRow) -> VersionRepositoryResult<DomainVersion> {
    let VersionRow {
        id,
        project_id: persisted_project_id,
        identifier_name: persisted_identifier_name,
        release_number,
        meta,
        concurrency_token,
        ..
    } = row;

    let project_id = ProjectId::new(persisted_project_id)
        .map_err(VersionRepositoryError::invalid_persisted_data)?;
    let identifier_name = BranchName::new(persisted_identifier_name)
        .map_err(VersionRepositoryError::invalid_persisted_data)?;

    Ok(DomainVersion::from_persisted(PersistedVersionData {
        id: VersionId::new(id),
        project_id,
        identifier_name,
        release_number,
        meta,
        concurrency_token: ConcurrencyToken::from_uuid(concurrency_token),
    }))
}
