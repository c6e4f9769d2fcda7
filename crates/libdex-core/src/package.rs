//! The catalog entity for a software library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reference::PackageReference;

/// A cataloged software library.
///
/// `id` is the backing index's storage-internal document identifier. It is
/// not a stable public handle and must never leave the system: every
/// operation that returns packages passes them through
/// [`Package::sanitized`] first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Storage-internal document identifier, stripped at the boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Hosting organization.
    pub organization: String,
    /// Repository name.
    pub repository: String,
    /// Curated keyword tags.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Short human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Extracted readme text.
    #[serde(default)]
    pub readme: Option<String>,
    /// Build targets the library is published for.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Artifact names of the library's declared dependencies.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Star count reported by the hosting platform.
    #[serde(default)]
    pub stars: Option<u64>,
    /// Fork count reported by the hosting platform.
    #[serde(default)]
    pub forks: Option<u64>,
    /// When the package entered the catalog.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the package metadata was last refreshed.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Package {
    /// Reference key for this package.
    #[must_use]
    pub fn reference(&self) -> PackageReference {
        PackageReference::new(self.organization.as_str(), self.repository.as_str())
    }

    /// Strip the storage-internal identifier before the package crosses the
    /// system boundary.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.id = None;
        self
    }
}
