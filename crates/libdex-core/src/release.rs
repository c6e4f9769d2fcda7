//! A published version of a cataloged package.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reference::{ArtifactCoordinate, PackageReference};

/// One published version of a package.
///
/// Many releases correlate to exactly one package via the embedded
/// [`PackageReference`]; a package may have zero or many releases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Coordinate of the published artifact.
    pub coordinate: ArtifactCoordinate,
    /// The package this release belongs to.
    pub reference: PackageReference,
    /// When the artifact was published.
    pub released_at: DateTime<Utc>,
}
