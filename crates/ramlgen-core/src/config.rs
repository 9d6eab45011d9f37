//! Configuration management for RAML generation.
//!
//! This module defines the `GeneratorConfig` struct. The configuration can be
//! loaded from a YAML or TOML file, or created programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use ramlgen_core::config::GeneratorConfig;
//!
//! // Create a new config programmatically
//! let mut config = GeneratorConfig::default();
//! config.allowed_formats.insert("html".to_string());
//!
//! // Or load from a config file
//! # #[tokio::main]
//! # async fn main() -> ramlgen_core::Result<()> {
//! let config = GeneratorConfig::from_file("ramlgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::BTreeSet;
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;
use url::Url;

/// Configuration for RAML generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// File extensions that may be advertised through `mediaTypeExtension`
    #[serde(
        default = "default_allowed_formats",
        deserialize_with = "deserialize_formats"
    )]
    pub allowed_formats: BTreeSet<String>,

    /// Overrides the base URI reported by the API metadata
    #[serde(default)]
    pub base_uri: Option<Url>,

    /// Default media type of the document
    #[serde(default)]
    pub media_type: Option<String>,

    /// Overrides the protocols derived from the base URI
    #[serde(default)]
    pub protocols: Option<Vec<String>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            allowed_formats: default_allowed_formats(),
            base_uri: None,
            media_type: None,
            protocols: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a config that only allows the given extensions
    pub fn with_allowed_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_formats: formats.into_iter().map(normalize_format).collect(),
            ..Default::default()
        }
    }

    /// Check that every allowed extension can appear in a route.
    ///
    /// Extensions are matched against `{mediaTypeExtension}` path segments,
    /// so each must be a non-empty run of ASCII letters and digits.
    pub fn validate(&self) -> crate::Result<()> {
        for format in &self.allowed_formats {
            if format.is_empty() || !format.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(crate::Error::config(format!(
                    "invalid extension {:?} in allowed_formats",
                    format
                )));
            }
        }
        Ok(())
    }

    /// Load and validate configuration from a file. `.toml` files are read
    /// as TOML, everything else as YAML.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config: Self = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

fn default_allowed_formats() -> BTreeSet<String> {
    ["json", "xml", "jsv", "csv"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Extensions are compared without a leading dot and in lower case
fn normalize_format<S: AsRef<str>>(format: S) -> String {
    format
        .as_ref()
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase()
}

/// Accept either a single extension or a list of extensions
fn deserialize_formats<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(BTreeSet::from([normalize_format(s)])),
        SerdeValue::Seq(seq) => {
            let mut result = BTreeSet::new();
            for item in seq {
                if let SerdeValue::String(s) = item {
                    result.insert(normalize_format(s));
                } else {
                    return Err(serde::de::Error::custom(
                        "Expected string or array of strings",
                    ));
                }
            }
            Ok(result)
        }
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
