//! Typed configuration loading helpers.

use crate::runtime::error::{XtaskError, XtaskResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Generic TOML-backed config loader.
///
/// `ConfigLoader<T>` handles only filesystem access and TOML deserialization. Consuming command
/// domains are still responsible for semantic validation after the typed value is loaded.
///
/// ```rust
/// # use serde::Deserialize;
/// # use std::path::Path;
/// # use xtask::runtime::config::ConfigLoader;
/// #[derive(Default, Deserialize)]
/// struct ExampleConfig {
///     enabled: bool,
/// }
///
/// let loader = ConfigLoader::<ExampleConfig>::new(Path::new("/workspace"), "tools/example.toml");
/// assert!(loader.path().ends_with("tools/example.toml"));
/// ```
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// Create a loader for the given workspace-relative path.
    pub fn new(root: &Path, relative_path: impl AsRef<Path>) -> Self {
        Self {
            path: root.join(relative_path),
            _marker: PhantomData,
        }
    }

    /// Load and deserialize the configuration file.
    ///
    /// Missing files, unreadable files, and TOML parse failures are all surfaced as
    /// [`XtaskErrorCategory::Config`](crate::runtime::error::XtaskErrorCategory::Config).
    pub fn load(&self) -> XtaskResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            XtaskError::config(format!("failed to read {}: {err}", self.path.display()))
        })?;
        toml::from_str(&body).map_err(|err| {
            XtaskError::config(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    /// Load the configuration file, or fall back to `T::default()` when it does not exist.
    ///
    /// A present but invalid file is still an error.
    pub fn load_or_default(&self) -> XtaskResult<T>
    where
        T: Default,
    {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "config file absent; using defaults");
            return Ok(T::default());
        }
        self.load()
    }

    /// Return the config path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::XtaskErrorCategory;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, Deserialize, PartialEq, Eq)]
    struct ExampleConfig {
        value: String,
        count: u32,
    }

    #[test]
    fn load_reads_toml_config_from_workspace_relative_path() {
        let root = TempDir::new().expect("temp root");
        let config_dir = root.path().join("tools/docs");
        fs::create_dir_all(&config_dir).expect("create config dir");
        fs::write(config_dir.join("example.toml"), "value = \"ok\"\ncount = 7\n")
            .expect("write config");

        let loader = ConfigLoader::<ExampleConfig>::new(root.path(), "tools/docs/example.toml");
        let loaded = loader.load().expect("load config");
        assert_eq!(
            loaded,
            ExampleConfig {
                value: "ok".into(),
                count: 7,
            }
        );
    }

    #[test]
    fn load_reports_missing_file_as_config_error() {
        let root = TempDir::new().expect("temp root");
        let loader = ConfigLoader::<ExampleConfig>::new(root.path(), "tools/docs/missing.toml");
        let err = loader.load().expect_err("missing config should fail");
        assert_eq!(err.category, XtaskErrorCategory::Config);
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file_only() {
        let root = TempDir::new().expect("temp root");
        let loader = ConfigLoader::<ExampleConfig>::new(root.path(), "absent.toml");
        assert_eq!(loader.load_or_default().expect("defaults"), ExampleConfig::default());

        fs::write(root.path().join("broken.toml"), "value = [").expect("write broken config");
        let loader = ConfigLoader::<ExampleConfig>::new(root.path(), "broken.toml");
        let err = loader.load_or_default().expect_err("invalid config should fail");
        assert_eq!(err.category, XtaskErrorCategory::Config);
        assert!(err.to_string().contains("broken.toml"));
    }
}
