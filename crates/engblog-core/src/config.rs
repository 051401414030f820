//! Layered site configuration.
//!
//! Settings resolve from, in increasing precedence:
//!
//! 1. declared defaults,
//! 2. `config.json5` in the project root (if present),
//! 3. `config-<ENV>.json5` in the project root (if present),
//! 4. the environment variable bound to each setting.
//!
//! The merged result is validated strictly against [`SCHEMA`] before it is
//! deserialized, so unknown keys and wrongly typed values fail at load time.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use config::{ConfigError, FileFormat, Source, Value, ValueKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, Result};

/// Environment variable selecting the configuration environment.
pub const ENV_VAR: &str = "ENV";

/// Environment used when [`ENV_VAR`] is unset.
pub const DEFAULT_ENVIRONMENT: &str = "local";

/// Base configuration file name.
pub const BASE_FILE: &str = "config.json5";

/// Environment variables visible to the resolver.
pub type EnvVars = HashMap<String, String>;

/// Resolved, immutable site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the configuration environment.
    pub env: String,

    /// Base URL of the deployed site, without trailing slash.
    #[serde(rename = "baseUrl", default)]
    pub base_url: Option<String>,
}

/// Value type accepted by a declared setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// A string.
    String,
    /// A string or `null`.
    NullableString,
}

impl SettingKind {
    fn accepts(self, kind: &ValueKind) -> bool {
        match self {
            Self::String => matches!(kind, ValueKind::String(_)),
            Self::NullableString => matches!(kind, ValueKind::String(_) | ValueKind::Nil),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::NullableString => "a string or null",
        }
    }
}

/// Where a setting gets its value when no file or variable supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingDefault {
    /// No default: the setting must be supplied.
    Required,
    /// Defaults to `null`.
    Null,
    /// Defaults to the resolved environment name.
    EnvironmentName,
}

/// A declared configuration setting.
#[derive(Debug, Clone, Copy)]
pub struct SettingSpec {
    /// Key as written in configuration files.
    pub key: &'static str,
    /// Accepted value type.
    pub kind: SettingKind,
    /// Fallback value.
    pub default: SettingDefault,
    /// Environment variable that supplies the value directly.
    pub env: Option<&'static str>,
}

impl SettingSpec {
    fn matches(&self, key: &str) -> bool {
        self.key == key
    }
}

/// Declared settings. Anything else in a configuration file is rejected.
pub const SCHEMA: &[SettingSpec] = &[
    SettingSpec {
        key: "env",
        kind: SettingKind::String,
        default: SettingDefault::EnvironmentName,
        env: Some(ENV_VAR),
    },
    SettingSpec {
        key: "baseUrl",
        kind: SettingKind::NullableString,
        default: SettingDefault::Null,
        env: Some("BASE_URL"),
    },
];

/// Resolve the environment name from the given variables.
///
/// An unset or empty [`ENV_VAR`] selects [`DEFAULT_ENVIRONMENT`].
pub fn environment_name(vars: &EnvVars) -> String {
    vars.get(ENV_VAR)
        .filter(|name| !name.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Candidate configuration files for an environment, lowest precedence first.
pub fn config_files(root: &Path, env: &str) -> Vec<PathBuf> {
    vec![root.join(BASE_FILE), root.join(format!("config-{env}.json5"))]
}

/// Builds a [`Config`] from layered sources.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    root: PathBuf,
    vars: EnvVars,
}

impl ConfigResolver {
    /// Create a resolver for a project root, reading the process environment.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            vars: std::env::vars().collect(),
        }
    }

    /// Replace the environment variables seen by the resolver.
    #[must_use]
    pub fn with_vars(mut self, vars: EnvVars) -> Self {
        self.vars = vars;
        self
    }

    /// Name of the environment this resolver loads.
    pub fn environment(&self) -> String {
        environment_name(&self.vars)
    }

    /// Candidate files for the resolved environment.
    pub fn candidate_files(&self) -> Vec<PathBuf> {
        config_files(&self.root, &self.environment())
    }

    /// Load, merge and strictly validate the configuration.
    pub fn load(&self) -> Result<Config> {
        let env = self.environment();
        let mut builder = config::Config::builder();

        for spec in SCHEMA {
            builder = match spec.default {
                SettingDefault::Required => builder,
                SettingDefault::Null => builder.set_default(spec.key, None::<String>)?,
                SettingDefault::EnvironmentName => builder.set_default(spec.key, env.clone())?,
            };
        }

        for file in self.candidate_files() {
            if !file.exists() {
                debug!(path = %file.display(), "config file not present, skipping");
                continue;
            }
            debug!(path = %file.display(), "loading config file");
            builder = builder.add_source(config::File::from(file).format(FileFormat::Json5));
        }

        for spec in SCHEMA {
            if let Some(var) = spec.env {
                builder = builder.set_override_option(spec.key, self.vars.get(var).cloned())?;
            }
        }

        let settings = builder.build().map_err(|e| match e {
            ConfigError::FileParse { .. } => {
                CoreError::config_with_source("Failed to parse config file", e)
            }
            other => other.into(),
        })?;

        validate(&settings.collect()?, SCHEMA)?;

        let config: Config = settings.try_deserialize()?;
        info!(env = %config.env, base_url = ?config.base_url, "resolved config");
        Ok(config)
    }
}

/// Check merged values against a schema in strict mode.
fn validate(values: &config::Map<String, Value>, schema: &[SettingSpec]) -> Result<()> {
    let mut keys: Vec<&String> = values.keys().collect();
    keys.sort();
    for key in keys {
        if !schema.iter().any(|spec| spec.matches(key)) {
            return Err(CoreError::validation(
                key.as_str(),
                "not declared in the configuration schema",
            ));
        }
    }

    for spec in schema {
        let value = values
            .iter()
            .find(|(key, _)| spec.matches(key))
            .map(|(_, value)| value);

        match value {
            Some(value) if !spec.kind.accepts(&value.kind) => {
                return Err(CoreError::validation(
                    spec.key,
                    format!("must be {}, got {}", spec.kind.describe(), value.kind),
                ));
            }
            Some(_) => {}
            None if spec.default == SettingDefault::Null => {}
            None => {
                return Err(CoreError::validation(spec.key, "must be supplied"));
            }
        }
    }

    Ok(())
}

impl Config {
    /// Load configuration for a project root from the process environment.
    pub fn load(root: &Path) -> Result<Self> {
        ConfigResolver::new(root).load()
    }

    /// Base URL, or the empty string when unset.
    pub fn base_url_or_empty(&self) -> &str {
        self.base_url.as_deref().unwrap_or_default()
    }

    /// Resolved properties keyed as in configuration files.
    pub fn properties(&self) -> serde_json::Value {
        serde_json::json!({
            "env": self.env,
            "baseUrl": self.base_url,
        })
    }
}
