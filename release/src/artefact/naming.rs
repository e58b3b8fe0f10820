//! Artefact naming policy for release archives.
//!
//! Every artefact of a release shares the stem `<product>-<version>`, which
//! is also the directory prefix of every archive member.

use crate::version::{VERSION_FILE_NAME, VersionString};
use std::fmt;

/// Extension of the temporary uncompressed tar archive.
const TAR_EXTENSION: &str = "tar";

/// Extension of the gzip-compressed tar archive.
const TGZ_EXTENSION: &str = "tgz";

/// Extension of the zip archive.
const ZIP_EXTENSION: &str = "zip";

/// The common stem of a release's artefacts.
///
/// # Examples
///
/// ```
/// use agentxcpp_release::artefact::naming::ArtefactName;
/// use agentxcpp_release::version::VersionString;
///
/// let version = VersionString::new("1.0").expect("non-empty");
/// let name = ArtefactName::new("agentxcpp", version);
/// assert_eq!(name.to_string(), "agentxcpp-1.0");
/// assert_eq!(name.prefix(), "agentxcpp-1.0/");
/// assert_eq!(name.tgz_filename(), "agentxcpp-1.0.tgz");
/// assert_eq!(name.marker_member(), "agentxcpp-1.0/version");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactName {
    product: String,
    version: VersionString,
}

impl ArtefactName {
    /// Create an artefact name from a product name and resolved version.
    #[must_use]
    pub fn new(product: &str, version: VersionString) -> Self {
        Self {
            product: product.to_owned(),
            version,
        }
    }

    /// Return the product component.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &VersionString {
        &self.version
    }

    /// Directory prefix applied to every archive member, with trailing slash.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{self}/")
    }

    /// Archive member name of the version marker.
    #[must_use]
    pub fn marker_member(&self) -> String {
        format!("{self}/{VERSION_FILE_NAME}")
    }

    /// File name of the intermediate tar archive.
    #[must_use]
    pub fn tar_filename(&self) -> String {
        format!("{self}.{TAR_EXTENSION}")
    }

    /// File name of the compressed tar artefact.
    #[must_use]
    pub fn tgz_filename(&self) -> String {
        format!("{self}.{TGZ_EXTENSION}")
    }

    /// File name of the zip artefact.
    #[must_use]
    pub fn zip_filename(&self) -> String {
        format!("{self}.{ZIP_EXTENSION}")
    }
}

impl fmt::Display for ArtefactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.product, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sample_name() -> ArtefactName {
        ArtefactName::new(
            "agentxcpp",
            VersionString::new("v0.2-13-gdeadbee").expect("valid version"),
        )
    }

    #[rstest]
    fn filenames_share_the_stem(sample_name: ArtefactName) {
        assert_eq!(sample_name.tar_filename(), "agentxcpp-v0.2-13-gdeadbee.tar");
        assert_eq!(sample_name.tgz_filename(), "agentxcpp-v0.2-13-gdeadbee.tgz");
        assert_eq!(sample_name.zip_filename(), "agentxcpp-v0.2-13-gdeadbee.zip");
    }

    #[rstest]
    fn marker_lives_under_prefix(sample_name: ArtefactName) {
        assert!(sample_name.marker_member().starts_with(&sample_name.prefix()));
        assert!(sample_name.marker_member().ends_with("/version"));
    }

    #[rstest]
    fn accessors_return_components(sample_name: ArtefactName) {
        assert_eq!(sample_name.product(), "agentxcpp");
        assert_eq!(sample_name.version().as_str(), "v0.2-13-gdeadbee");
    }
}
