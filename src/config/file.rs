//! Run parameters loaded from a TOML or YAML file.

use anyhow::Context;
use loadtest_engine::{DelayRange, RunParams};
use serde::Deserialize;
use std::path::Path;

/// Optional overrides read from a config file.
///
/// ```toml
/// users = 500
/// iterations_per_user = 10
/// delay_range = [0.05, 0.3]
/// collection_pool_size = 20
/// shared_doc_probability = 0.25
/// seed = 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub users: Option<u32>,
    pub iterations_per_user: Option<u32>,
    /// Pacing delay bounds in seconds.
    pub delay_range: Option<(f64, f64)>,
    pub collection_pool_size: Option<u32>,
    pub shared_doc_probability: Option<f64>,
    pub seed: Option<u64>,
}

impl ConfigFile {
    /// Load a config file; the format is picked from the extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path:?}"))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config {path:?}")),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config {path:?}")),
            _ => anyhow::bail!("Unsupported config file extension (expected .toml, .yaml or .yml): {path:?}"),
        }
    }

    /// Overlay the values present in this file onto `params`.
    pub fn apply(&self, mut params: RunParams) -> RunParams {
        if let Some(users) = self.users {
            params.users = users;
        }
        if let Some(iterations) = self.iterations_per_user {
            params.iterations_per_user = iterations;
        }
        if let Some((min, max)) = self.delay_range {
            params.delay_range = DelayRange::new(min, max);
        }
        if let Some(size) = self.collection_pool_size {
            params.collection_pool_size = size;
        }
        if let Some(probability) = self.shared_doc_probability {
            params.shared_doc_probability = probability;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "run.toml",
            "users = 10\ndelay_range = [0.0, 0.1]\nseed = 7\n",
        );

        let config = ConfigFile::load(&path).unwrap();

        assert_eq!(config.users, Some(10));
        assert_eq!(config.delay_range, Some((0.0, 0.1)));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.iterations_per_user, None);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "run.yaml",
            "iterations_per_user: 3\ncollection_pool_size: 4\nshared_doc_probability: 0.5\n",
        );

        let config = ConfigFile::load(&path).unwrap();

        assert_eq!(config.iterations_per_user, Some(3));
        assert_eq!(config.collection_pool_size, Some(4));
        assert_eq!(config.shared_doc_probability, Some(0.5));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "run.toml", "userz = 10\n");

        assert!(ConfigFile::load(&path).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "run.json", "{}");

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file extension"));
    }

    #[test]
    fn test_apply_overlays_only_present_values() {
        let config = ConfigFile {
            users: Some(5),
            delay_range: Some((0.0, 0.0)),
            ..Default::default()
        };

        let params = config.apply(RunParams::default());

        assert_eq!(params.users, 5);
        assert_eq!(params.delay_range, DelayRange::zero());
        assert_eq!(params.iterations_per_user, 20);
        assert_eq!(params.collection_pool_size, 100);
        assert_eq!(params.seed, None);
    }
}
