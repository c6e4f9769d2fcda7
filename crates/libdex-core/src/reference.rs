//! Immutable identity keys correlating packages with their releases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Natural key identifying a package: hosting organization plus repository
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageReference {
    /// Hosting organization the repository lives under.
    pub organization: String,
    /// Repository name within the organization.
    pub repository: String,
}

impl PackageReference {
    /// Create a reference from its two components.
    #[must_use]
    pub fn new(organization: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            repository: repository.into(),
        }
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

/// Natural key identifying one published artifact version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    /// Publishing group the artifact belongs to.
    pub group: String,
    /// Artifact name within the group.
    pub artifact: String,
    /// Published version string.
    pub version: String,
}

impl ArtifactCoordinate {
    /// Create a coordinate from its three components.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}
