//! Configuration loading and management
//!
//! Two documents configure the mock server: the YAML [`MockServerConfig`]
//! owned by this crate, and the JSON application [`Manifest`] that names the
//! data service the worklist talks to.

use crate::core::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the data source the worklist binds to
pub const MAIN_SERVICE: &str = "mainService";

/// Delay applied to responses when neither config nor request sets one
pub const DEFAULT_DELAY_MS: u64 = 500;

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_app_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("manifest.json")
}

fn default_mockdata_dir() -> PathBuf {
    PathBuf::from("localService/mockdata")
}

fn default_true() -> bool {
    true
}

/// Settings of the mock data server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Directory holding the manifest and the local service files
    #[serde(default = "default_app_path")]
    pub app_path: PathBuf,

    /// Manifest file, relative to `app_path`
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Directory with `<EntitySet>.json` fixtures, relative to `app_path`
    #[serde(default = "default_mockdata_dir")]
    pub mockdata_dir: PathBuf,

    /// Fixed response delay; overrides the `serverDelay` query parameter
    #[serde(default)]
    pub delay_ms: Option<u64>,

    /// Serve generated rows when a fixture file is missing
    #[serde(default = "default_true")]
    pub generate_missing_mock_data: bool,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            app_path: default_app_path(),
            manifest: default_manifest(),
            mockdata_dir: default_mockdata_dir(),
            delay_ms: None,
            generate_missing_mock_data: true,
        }
    }
}

impl MockServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, "<inline>")
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::from_yaml_file(path)
    }

    fn parse(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.app_path.join(&self.manifest)
    }

    pub fn mockdata_path(&self) -> PathBuf {
        self.app_path.join(&self.mockdata_dir)
    }

    /// Delay for one request given its `serverDelay` parameter
    pub fn effective_delay_ms(&self, requested: Option<u64>) -> u64 {
        self.delay_ms.or(requested).unwrap_or(DEFAULT_DELAY_MS)
    }
}

/// The part of the application manifest the mock server reads
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(rename = "sap.app")]
    pub app: AppDescriptor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub data_sources: IndexMap<String, DataSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSource {
    pub uri: String,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub settings: DataSourceSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSettings {
    #[serde(default)]
    pub odata_version: Option<String>,

    /// Metadata document, relative to the application directory
    #[serde(default)]
    pub local_uri: Option<String>,
}

impl Manifest {
    /// Read and parse a manifest
    ///
    /// Any failure is reported as [`ConfigError::ManifestLoad`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ManifestLoad {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content, &origin)
    }

    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ManifestLoad {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn data_source(&self, name: &str) -> Result<&DataSource, ConfigError> {
        self.app
            .data_sources
            .get(name)
            .ok_or_else(|| ConfigError::MissingDataSource {
                name: name.to_string(),
            })
    }

    pub fn main_service(&self) -> Result<&DataSource, ConfigError> {
        self.data_source(MAIN_SERVICE)
    }
}

impl DataSource {
    /// The service root as an absolute path with exactly one trailing slash
    ///
    /// Relative manifest URIs are resolved against the server root.
    pub fn root_uri(&self) -> String {
        let path = self.uri.trim_matches('/');
        if path.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", path)
        }
    }
}
