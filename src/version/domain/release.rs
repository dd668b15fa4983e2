//! Four-component release number arithmetic.

use super::VersionDomainError;
use std::fmt;
use std::str::FromStr;

/// Parsed `major.minor.qa.feature` release number.
///
/// This is not a semantic version: every release number has exactly four
/// non-negative integer components, and each branch convention bumps one of
/// them.
///
/// # Examples
///
///     use openversion::version::domain::ReleaseNumber;
///
///     let release: ReleaseNumber = "1.4.2.9".parse().expect("valid release");
///     assert_eq!(release.bump_qa().expect("bump").to_string(), "1.4.3.0");
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReleaseNumber {
    major: u64,
    minor: u64,
    qa: u64,
    feature: u64,
}

impl ReleaseNumber {
    /// Seed for the first major release of `main`.
    pub const MAJOR_SEED: Self = Self::new(1, 0, 0, 0);
    /// Seed for the first minor release of `main`.
    pub const MINOR_SEED: Self = Self::new(0, 1, 0, 0);
    /// Seed for the first QA release.
    pub const QA_SEED: Self = Self::new(0, 0, 1, 0);
    /// Seed for the first feature or fix release.
    pub const FEATURE_SEED: Self = Self::new(0, 0, 0, 1);

    /// Creates a release number from its components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, qa: u64, feature: u64) -> Self {
        Self {
            major,
            minor,
            qa,
            feature,
        }
    }

    /// Parses a dotted release number.
    ///
    /// # Errors
    ///
    /// Returns [`VersionDomainError::InvalidReleaseNumber`] unless the input
    /// is exactly four dot-separated non-negative integers.
    pub fn parse(value: &str) -> Result<Self, VersionDomainError> {
        let invalid = || VersionDomainError::InvalidReleaseNumber(value.to_owned());
        let mut components = value
            .split('.')
            .map(|part| parse_component(part).ok_or_else(invalid));

        let major = components.next().ok_or_else(invalid)??;
        let minor = components.next().ok_or_else(invalid)??;
        let qa = components.next().ok_or_else(invalid)??;
        let feature = components.next().ok_or_else(invalid)??;
        if components.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(major, minor, qa, feature))
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(self) -> u64 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.minor
    }

    /// Returns the QA component.
    #[must_use]
    pub const fn qa(self) -> u64 {
        self.qa
    }

    /// Returns the feature component.
    #[must_use]
    pub const fn feature(self) -> u64 {
        self.feature
    }

    /// Increments major and resets every lower component.
    ///
    /// # Errors
    ///
    /// Returns [`VersionDomainError::ReleaseNumberOverflow`] when the major
    /// component is already at its maximum.
    pub fn bump_major(self) -> Result<Self, VersionDomainError> {
        let major = self.increment(self.major)?;
        Ok(Self::new(major, 0, 0, 0))
    }

    /// Increments minor and resets QA and feature.
    ///
    /// # Errors
    ///
    /// Returns [`VersionDomainError::ReleaseNumberOverflow`] on overflow.
    pub fn bump_minor(self) -> Result<Self, VersionDomainError> {
        let minor = self.increment(self.minor)?;
        Ok(Self::new(self.major, minor, 0, 0))
    }

    /// Increments QA and resets feature.
    ///
    /// # Errors
    ///
    /// Returns [`VersionDomainError::ReleaseNumberOverflow`] on overflow.
    pub fn bump_qa(self) -> Result<Self, VersionDomainError> {
        let qa = self.increment(self.qa)?;
        Ok(Self::new(self.major, self.minor, qa, 0))
    }

    /// Increments the feature component.
    ///
    /// # Errors
    ///
    /// Returns [`VersionDomainError::ReleaseNumberOverflow`] on overflow.
    pub fn bump_feature(self) -> Result<Self, VersionDomainError> {
        let feature = self.increment(self.feature)?;
        Ok(Self::new(self.major, self.minor, self.qa, feature))
    }

    fn increment(self, component: u64) -> Result<u64, VersionDomainError> {
        component
            .checked_add(1)
            .ok_or_else(|| VersionDomainError::ReleaseNumberOverflow(self.to_string()))
    }
}

/// Parses one component, rejecting signs and whitespace that `u64::from_str`
/// would otherwise tolerate.
fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for ReleaseNumber {
    type Err = VersionDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReleaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.qa, self.feature
        )
    }
}
