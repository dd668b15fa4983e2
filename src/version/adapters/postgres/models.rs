//! Diesel row models for version persistence.

use super::schema::versions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for version records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = versions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VersionRow {
    /// Storage identifier.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Branch identifier.
    pub identifier_name: String,
    /// Dotted release number.
    pub release_number: String,
    /// Optional display metadata.
    pub meta: Option<String>,
    /// Timestamp of the last successful write.
    pub last_updated: DateTime<Utc>,
    /// Optimistic-lock stamp.
    pub concurrency_token: uuid::Uuid,
}

/// Insert model for version records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = versions)]
pub struct NewVersionRow {
    /// Owning project.
    pub project_id: i64,
    /// Branch identifier.
    pub identifier_name: String,
    /// Dotted release number.
    pub release_number: String,
    /// Optional display metadata.
    pub meta: Option<String>,
    /// Write timestamp.
    pub last_updated: DateTime<Utc>,
    /// Initial optimistic-lock stamp.
    pub concurrency_token: uuid::Uuid,
}

/// Conditional update model for an existing version row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = versions)]
#[diesel(treat_none_as_null = true)]
pub struct VersionChangeset {
    /// New release number.
    pub release_number: String,
    /// New display metadata; `None` clears the column.
    pub meta: Option<String>,
    /// Write timestamp.
    pub last_updated: DateTime<Utc>,
    /// Replacement optimistic-lock stamp.
    pub concurrency_token: uuid::Uuid,
}
