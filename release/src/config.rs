//! Packaging configuration.
//!
//! Settings are layered: built-in defaults, then an optional
//! `release.toml` in the base directory, then command-line overrides.
//! Relative delivery directories are resolved against the base directory.

use crate::error::{ReleaseError, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;

/// Name of the optional configuration file in the base directory.
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Product name used for artefact names and archive prefixes.
pub const DEFAULT_PRODUCT: &str = "agentxcpp";

/// Delivery directory, relative to the base directory.
pub const DEFAULT_DELIVERY_DIR: &str = "deliv";

/// Contents of `release.toml`. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    product: Option<String>,
    delivery_dir: Option<String>,
    reference: Option<String>,
}

/// Values supplied on the command line, taking precedence over the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Product name override.
    pub product: Option<String>,
    /// Delivery directory override.
    pub delivery_dir: Option<Utf8PathBuf>,
    /// Git reference override.
    pub reference: Option<String>,
}

/// Fully resolved settings for one packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// Root of the source tree: git runs here and the marker is written here.
    pub base_dir: Utf8PathBuf,
    /// Product name used in artefact names.
    pub product: String,
    /// Directory that receives the artefacts; recreated on every run.
    pub delivery_dir: Utf8PathBuf,
    /// Git reference to archive; `None` archives the resolved version.
    pub reference: Option<String>,
}

impl ReleaseConfig {
    /// Built-in defaults for `base_dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentxcpp_release::config::ReleaseConfig;
    /// use camino::Utf8Path;
    ///
    /// let config = ReleaseConfig::new(Utf8Path::new("/src/agentxcpp"));
    /// assert_eq!(config.product, "agentxcpp");
    /// assert_eq!(config.delivery_dir, "/src/agentxcpp/deliv");
    /// assert!(config.reference.is_none());
    /// ```
    #[must_use]
    pub fn new(base_dir: &Utf8Path) -> Self {
        Self {
            base_dir: base_dir.to_owned(),
            product: DEFAULT_PRODUCT.to_owned(),
            delivery_dir: base_dir.join(DEFAULT_DELIVERY_DIR),
            reference: None,
        }
    }

    /// Loads `release.toml` from `base_dir` if present and applies `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidConfig`] if the file exists but cannot
    /// be parsed, an I/O error if it cannot be read, or
    /// [`ReleaseError::UnsafeDeliveryDir`] if the resulting delivery
    /// directory fails [`check_delivery_dir`].
    pub fn load(base_dir: &Utf8Path, overrides: ConfigOverrides) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE_NAME);
        let file_config = if path.is_file() {
            debug!("loading configuration from {path}");
            let contents = std::fs::read_to_string(&path)?;
            parse_file_config(&contents, &path)?
        } else {
            FileConfig::default()
        };

        let mut config = Self::new(base_dir);
        config.apply_file(file_config);
        config.apply_overrides(overrides);
        check_delivery_dir(&config.base_dir, &config.delivery_dir)?;
        Ok(config)
    }

    /// The reference to archive for `version`.
    #[must_use]
    pub fn reference_for<'a>(&'a self, version: &'a str) -> &'a str {
        self.reference.as_deref().unwrap_or(version)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(product) = file.product {
            self.product = product;
        }
        if let Some(dir) = file.delivery_dir {
            self.delivery_dir = self.resolve_dir(Utf8Path::new(&dir));
        }
        if file.reference.is_some() {
            self.reference = file.reference;
        }
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(product) = overrides.product {
            self.product = product;
        }
        if let Some(dir) = overrides.delivery_dir {
            self.delivery_dir = self.resolve_dir(&dir);
        }
        if overrides.reference.is_some() {
            self.reference = overrides.reference;
        }
    }

    fn resolve_dir(&self, dir: &Utf8Path) -> Utf8PathBuf {
        if dir.is_absolute() {
            dir.to_owned()
        } else {
            self.base_dir.join(dir)
        }
    }
}

/// Returns `dir`, or the current directory, as an absolute UTF-8 path.
///
/// Git runs with `-C <base_dir>` and receives output paths below it, so a
/// relative base directory would be applied twice.
///
/// # Errors
///
/// Returns an I/O error if the current directory cannot be determined, or
/// [`ReleaseError::NonUtf8Path`] if the result is not valid UTF-8.
pub fn absolute_base_dir(dir: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    let path = match dir {
        Some(dir) => std::path::absolute(dir)?,
        None => std::env::current_dir()?,
    };
    Utf8PathBuf::from_path_buf(path).map_err(|p| ReleaseError::NonUtf8Path {
        path: p.to_string_lossy().into_owned(),
    })
}

/// Rejects delivery directories whose reset would delete the checkout.
///
/// The delivery directory is removed recursively on every run, so it must
/// not be the base directory, one of its ancestors, or a path inside
/// `.git`. Paths are compared lexically after folding `.` and `..`.
///
/// # Errors
///
/// Returns [`ReleaseError::UnsafeDeliveryDir`] naming the offending path.
///
/// # Examples
///
/// ```
/// use agentxcpp_release::config::check_delivery_dir;
/// use camino::Utf8Path;
///
/// let base = Utf8Path::new("/src/agentxcpp");
/// assert!(check_delivery_dir(base, Utf8Path::new("/src/agentxcpp/deliv")).is_ok());
/// assert!(check_delivery_dir(base, Utf8Path::new("/src/agentxcpp/deliv/..")).is_err());
/// ```
pub fn check_delivery_dir(base_dir: &Utf8Path, delivery_dir: &Utf8Path) -> Result<()> {
    let base = normalize_lexically(base_dir);
    let delivery = normalize_lexically(delivery_dir);

    let reason = if base.starts_with(&delivery) {
        "it contains the source tree"
    } else if delivery.starts_with(base.join(".git")) {
        "it lies inside the git metadata directory"
    } else {
        return Ok(());
    };
    Err(ReleaseError::UnsafeDeliveryDir {
        path: delivery_dir.to_owned(),
        reason,
    })
}

fn normalize_lexically(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalized = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_str()),
        }
    }
    normalized
}

fn parse_file_config(contents: &str, path: &Utf8Path) -> Result<FileConfig> {
    toml::from_str(contents).map_err(|e| ReleaseError::InvalidConfig {
        path: path.to_owned(),
        reason: e.message().to_owned(),
    })
}
