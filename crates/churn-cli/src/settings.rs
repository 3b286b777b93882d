//! Run settings resolved from defaults, a TOML file and the environment.
//!
//! Precedence, lowest first:
//!
//! 1. Built-in defaults (`bank_churn`, target `Exited`, paths under the
//!    project root)
//! 2. `settings/pipeline.toml` under the project root, or the file passed
//!    with `--config`
//! 3. Process environment, after loading `.env` from the working directory
//!
//! Relative paths in the file or environment are resolved against the
//! project root.

use std::path::{Path, PathBuf};

use churn_model::DatasetSpec;
use churn_model::constants::{
    DATABASE_PATH, DEFAULT_DATASET_NAME, DEFAULT_TARGET_COLUMN, SCHEMA_FILE_PATH,
    SETTINGS_FILE_PATH,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const ENV_PROJECT_ROOT: &str = "CHURN_PROJECT_ROOT";
pub const ENV_DATASET_NAME: &str = "CHURN_DATASET_NAME";
pub const ENV_TARGET_COLUMN: &str = "CHURN_TARGET_COLUMN";
pub const ENV_SCHEMA_FILE: &str = "CHURN_SCHEMA_FILE";
pub const ENV_DATABASE_URL: &str = "CHURN_DATABASE_URL";

const SQLITE_SCHEME: &str = "sqlite://";

/// Errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load .env file: {source}")]
    DotEnv {
        #[source]
        source: dotenvy::Error,
    },

    #[error("failed to determine working directory: {source}")]
    WorkingDir {
        #[source]
        source: std::io::Error,
    },

    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_root: PathBuf,
    pub dataset_name: String,
    pub target_column: Option<String>,
    pub schema_file: PathBuf,
    pub database_path: PathBuf,
    /// The TOML file that contributed values, if any.
    pub config_file: Option<PathBuf>,
}

/// On-disk shape of `pipeline.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    project_root: Option<PathBuf>,
    dataset_name: Option<String>,
    target_column: Option<String>,
    schema_file: Option<PathBuf>,
    database_path: Option<PathBuf>,
}

impl Settings {
    /// Defaults rooted at `project_root`.
    pub fn defaults(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            schema_file: project_root.join(SCHEMA_FILE_PATH),
            database_path: project_root.join(DATABASE_PATH),
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
            target_column: Some(DEFAULT_TARGET_COLUMN.to_string()),
            config_file: None,
            project_root,
        }
    }

    /// Loads `.env`, then resolves against the working directory and the
    /// process environment.
    pub fn load(explicit_config: Option<&Path>) -> Result<Self, SettingsError> {
        load_dotenv()?;
        let cwd = std::env::current_dir().map_err(|source| SettingsError::WorkingDir { source })?;
        Self::resolve(&cwd, explicit_config, |key| std::env::var(key).ok())
    }

    /// Resolves settings with an injectable environment lookup.
    ///
    /// `base_dir` anchors the project root when neither the file nor the
    /// environment names one, and anchors relative roots when they do.
    pub fn resolve<F>(
        base_dir: &Path,
        explicit_config: Option<&Path>,
        env: F,
    ) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        let env_root = env(ENV_PROJECT_ROOT).map(|root| base_dir.join(root));

        let default_root = env_root.clone().unwrap_or_else(|| base_dir.to_path_buf());
        let (file, config_file) = match explicit_config {
            Some(path) => {
                let path = base_dir.join(path);
                if !path.is_file() {
                    return Err(SettingsError::ConfigNotFound { path });
                }
                (read_settings_file(&path)?, Some(path))
            }
            None => {
                let path = default_root.join(SETTINGS_FILE_PATH);
                if path.is_file() {
                    (read_settings_file(&path)?, Some(path))
                } else {
                    (SettingsFile::default(), None)
                }
            }
        };

        let project_root = env_root
            .or_else(|| file.project_root.as_ref().map(|root| base_dir.join(root)))
            .unwrap_or_else(|| base_dir.to_path_buf());
        let mut settings = Self::defaults(project_root);
        settings.config_file = config_file;

        if let Some(name) = file.dataset_name {
            settings.dataset_name = name;
        }
        if let Some(target) = file.target_column {
            settings.target_column = non_empty(target);
        }
        if let Some(path) = file.schema_file {
            settings.schema_file = settings.project_root.join(path);
        }
        if let Some(path) = file.database_path {
            settings.database_path = settings.project_root.join(path);
        }

        if let Some(name) = env(ENV_DATASET_NAME) {
            settings.dataset_name = name;
        }
        if let Some(target) = env(ENV_TARGET_COLUMN) {
            settings.target_column = non_empty(target);
        }
        if let Some(path) = env(ENV_SCHEMA_FILE) {
            settings.schema_file = settings.project_root.join(path);
        }
        if let Some(url) = env(ENV_DATABASE_URL) {
            settings.database_path = settings.project_root.join(sqlite_path(&url)?);
        }

        if settings.dataset_name.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "dataset_name",
                message: "must not be empty".to_string(),
            });
        }

        debug!(
            project_root = %settings.project_root.display(),
            dataset = %settings.dataset_name,
            config_file = ?settings.config_file,
            "resolved settings"
        );
        Ok(settings)
    }

    /// The dataset description handed to the pipeline.
    pub fn dataset(&self) -> DatasetSpec {
        let dataset = DatasetSpec::new(self.dataset_name.clone(), self.schema_file.clone());
        match &self.target_column {
            Some(target) => dataset.with_target_column(target.clone()),
            None => dataset,
        }
    }
}

fn load_dotenv() -> Result<(), SettingsError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(source) => Err(SettingsError::DotEnv { source }),
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts a bare path or a `sqlite://` URL.
fn sqlite_path(url: &str) -> Result<PathBuf, SettingsError> {
    if let Some(path) = url.strip_prefix(SQLITE_SCHEME) {
        return Ok(PathBuf::from(path));
    }
    if url.contains("://") {
        return Err(SettingsError::Invalid {
            key: ENV_DATABASE_URL,
            message: format!("unsupported database url '{url}' (expected a sqlite:// url or a path)"),
        });
    }
    Ok(PathBuf::from(url))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}
