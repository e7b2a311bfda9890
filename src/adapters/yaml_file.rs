// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file configuration layer.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigParser, ConfigSource};
use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Files larger than this (10 MiB) are refused.
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-file";

/// Application name of the sidecar's default configuration directory.
pub const DEFAULT_APP_NAME: &str = "gotask";

/// Qualifier of the sidecar's default configuration directory.
pub const DEFAULT_QUALIFIER: &str = "org";

/// Flattening YAML parser.
///
/// Mappings join with dots, sequence items use their index, scalars are
/// stringified and `null` becomes the empty string.
///
/// # Examples
///
/// ```rust
/// use sidecfg::adapters::YamlParser;
/// use sidecfg::ports::ConfigParser;
///
/// let parsed = YamlParser::new()
///     .parse("gotask:\n  socket_address: /tmp/gotask.sock")
///     .unwrap();
/// assert_eq!(parsed["gotask.socket_address"], "/tmp/gotask.sock");
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn flatten(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
        let child = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{}.{}", prefix, segment)
            }
        };

        match value {
            serde_yaml::Value::Mapping(map) => {
                for (key, val) in map {
                    let segment = match key {
                        serde_yaml::Value::String(s) => s.clone(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        _ => {
                            tracing::debug!("Skipping non-scalar YAML key under '{}'", prefix);
                            continue;
                        }
                    };
                    Self::flatten(val, &child(&segment), out);
                }
            }
            serde_yaml::Value::Sequence(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    Self::flatten(val, &child(&i.to_string()), out);
                }
            }
            serde_yaml::Value::String(s) => {
                out.insert(prefix.to_string(), s.clone());
            }
            serde_yaml::Value::Number(n) => {
                out.insert(prefix.to_string(), n.to_string());
            }
            serde_yaml::Value::Bool(b) => {
                out.insert(prefix.to_string(), b.to_string());
            }
            serde_yaml::Value::Null => {
                out.insert(prefix.to_string(), String::new());
            }
            serde_yaml::Value::Tagged(tagged) => Self::flatten(&tagged.value, prefix, out),
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut result = HashMap::new();
        Self::flatten(&value, "", &mut result);
        // a bare scalar document flattens to the empty key
        result.remove("");
        Ok(result)
    }

    fn render(&self, values: &BTreeMap<String, String>) -> Result<String> {
        serde_yaml::to_string(values).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to render YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

fn source_error(path: &Path, what: &str, err: std::io::Error) -> ConfigError {
    ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!(
            "{}: {}",
            what,
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("<unknown>")
        ),
        source: Some(Box::new(err)),
    }
}

/// Reads and flattens a YAML file, enforcing the size limit.
fn read_flat(path: &Path, parser: &YamlParser) -> Result<HashMap<String, String>> {
    let metadata =
        fs::metadata(path).map_err(|e| source_error(path, "Failed to read file metadata", e))?;

    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path)
        .map_err(|e| source_error(path, "Failed to read configuration file", e))?;

    let values = parser.parse(&content)?;
    tracing::debug!("Loaded {} keys from {}", values.len(), path.display());
    Ok(values)
}

/// Read-only layer backed by a YAML file, priority 1.
///
/// # Examples
///
/// ```rust,no_run
/// use sidecfg::adapters::yaml_file::{DEFAULT_APP_NAME, DEFAULT_QUALIFIER};
/// use sidecfg::adapters::YamlFileAdapter;
///
/// let adapter = YamlFileAdapter::from_file("/etc/gotask/config.yaml").unwrap();
/// // the file the sidecar binary reads when run without --config
/// let adapter =
///     YamlFileAdapter::from_default_location(DEFAULT_APP_NAME, DEFAULT_QUALIFIER).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileAdapter {
    file_path: PathBuf,
    values: HashMap<String, String>,
    parser: YamlParser,
}

impl YamlFileAdapter {
    /// Loads the YAML file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_path = path
            .canonicalize()
            .map_err(|e| source_error(path, "Invalid or inaccessible path", e))?;

        let parser = YamlParser::new();
        let values = read_flat(&file_path, &parser)?;

        Ok(Self {
            file_path,
            values,
            parser,
        })
    }

    /// Loads `config.yaml` from the OS configuration directory for the app.
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::from_file(Self::default_path(app_name, qualifier, "config.yaml")?)
    }

    /// Returns `<os config dir>/<filename>` for the app without reading it.
    pub fn default_path(app_name: &str, qualifier: &str, filename: &str) -> Result<PathBuf> {
        let dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;
        Ok(dirs.config_dir().join(filename))
    }

    /// Path of the loaded file, canonicalized.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for YamlFileAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn priority(&self) -> u8 {
        1
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }

    fn reload(&mut self) -> Result<()> {
        // keep serving the old values if the new content is unreadable
        self.values = read_flat(&self.file_path, &self.parser)?;
        Ok(())
    }
}
