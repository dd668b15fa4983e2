//! Version value object.

use super::{
    BranchName, ConcurrencyToken, ProjectId, ReleaseNumber, VersionDomainError, VersionId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable record of one version counter.
///
/// Versions built by bump rules are unsaved ([`VersionId::UNSAVED`]) and
/// carry no concurrency token. Versions read back from a repository carry
/// the storage identifier and the token observed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainVersion {
    id: VersionId,
    project_id: ProjectId,
    identifier_name: BranchName,
    release_number: String,
    meta: Option<String>,
    concurrency_token: Option<ConcurrencyToken>,
}

/// Parameter object for reconstructing a version from storage.
#[derive(Debug, Clone)]
pub struct PersistedVersionData {
    /// Storage identifier.
    pub id: VersionId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Branch identifier.
    pub identifier_name: BranchName,
    /// Stored release number, unparsed.
    pub release_number: String,
    /// Stored display metadata.
    pub meta: Option<String>,
    /// Token stamped by the last successful write.
    pub concurrency_token: ConcurrencyToken,
}

impl DomainVersion {
    /// Creates an unsaved version as produced by a bump rule.
    #[must_use]
    pub fn proposed(
        project_id: ProjectId,
        identifier_name: BranchName,
        release_number: ReleaseNumber,
        meta: Option<String>,
    ) -> Self {
        Self {
            id: VersionId::UNSAVED,
            project_id,
            identifier_name,
            release_number: release_number.to_string(),
            meta,
            concurrency_token: None,
        }
    }

    /// Reconstructs a version from persisted storage.
    ///
    /// The release number is kept verbatim so that a malformed stored value
    /// only fails the rule that tries to bump it.
    #[must_use]
    pub fn from_persisted(data: PersistedVersionData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            identifier_name: data.identifier_name,
            release_number: data.release_number,
            meta: data.meta,
            concurrency_token: Some(data.concurrency_token),
        }
    }

    /// Returns a copy that expects `token` to still be current when saved.
    #[must_use]
    pub const fn with_concurrency_token(mut self, token: Option<ConcurrencyToken>) -> Self {
        self.concurrency_token = token;
        self
    }

    /// Returns the storage identifier.
    #[must_use]
    pub const fn id(&self) -> VersionId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the branch identifier.
    #[must_use]
    pub const fn identifier_name(&self) -> &BranchName {
        &self.identifier_name
    }

    /// Returns the dotted release number as stored.
    #[must_use]
    pub fn release_number(&self) -> &str {
        &self.release_number
    }

    /// Parses the stored release number.
    ///
    /// # Errors
    ///
    /// Returns [`VersionDomainError::InvalidReleaseNumber`] when the stored
    /// value is malformed.
    pub fn parsed_release(&self) -> Result<ReleaseNumber, VersionDomainError> {
        ReleaseNumber::parse(&self.release_number)
    }

    /// Returns the display metadata, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    /// Returns the concurrency token observed when the version was read.
    #[must_use]
    pub const fn concurrency_token(&self) -> Option<ConcurrencyToken> {
        self.concurrency_token
    }

    /// Formats the version for display: the release number, followed by
    /// `+meta` when the metadata is not blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use openversion::version::domain::{BranchName, DomainVersion, ProjectId, ReleaseNumber};
    ///
    /// let version = DomainVersion::proposed(
    ///     ProjectId::DEFAULT,
    ///     BranchName::main(),
    ///     ReleaseNumber::new(1, 1, 0, 0),
    ///     Some("minor".to_owned()),
    /// );
    /// assert_eq!(version.formatted(), "1.1.0.0+minor");
    /// ```
    #[must_use]
    pub fn formatted(&self) -> String {
        format_version(&self.release_number, self.meta())
    }
}

impl fmt::Display for DomainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Joins a release number and optional metadata with `+`.
///
/// Metadata that is missing, empty or whitespace-only is omitted.
#[must_use]
pub fn format_version(release_number: &str, meta: Option<&str>) -> String {
    let visible = meta.filter(|value| !value.trim().is_empty());
    visible.map_or_else(
        || release_number.to_owned(),
        |value| format!("{release_number}+{value}"),
    )
}
