//! Collected API metadata: the input to RAML generation.
//!
//! An [`ApiDocumentation`] describes every resource of a service, the actions
//! each resource supports, the routes each action is reachable on and the
//! content types it can produce. It is usually loaded from the JSON that a
//! running service exposes, or from a file saved from it.
//!
//! # Examples
//!
//! ```no_run
//! use ramlgen_core::metadata::ApiDocumentation;
//! use ramlgen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let docs = ApiDocumentation::from_file_or_url("https://api.example.com/spec").await?;
//! for resource in &docs.resources {
//!     println!("{} has {} actions", resource.title, resource.actions.len());
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Verbs that do not conventionally carry a request body
const BODYLESS_VERBS: [&str; 4] = ["GET", "HEAD", "DELETE", "OPTIONS"];

/// Top level description of a service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocumentation {
    pub title: String,

    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(default)]
    pub api_base_url: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub resources: Vec<ApiResource>,
}

/// A resource (request DTO) and the actions it supports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub title: String,

    /// Name of the underlying request type
    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub actions: Vec<ApiAction>,

    #[serde(default)]
    pub properties: Vec<ApiProperty>,
}

impl ApiResource {
    /// Find a property by id, ignoring ASCII case
    pub fn property(&self, id: &str) -> Option<&ApiProperty> {
        self.properties
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
    }
}

/// A single property of a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProperty {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default = "default_property_type")]
    pub property_type: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub is_repeatable: bool,

    #[serde(default)]
    pub allowed_values: Option<Vec<String>>,
}

/// An action (verb) on a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAction {
    pub verb: String,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub relative_paths: Vec<RelativePath>,

    #[serde(default)]
    pub content_types: Vec<String>,
}

impl ApiAction {
    /// Whether requests with this verb conventionally carry a body.
    ///
    /// Body-carrying verbs pass their parameters in the body; the others use
    /// the query string.
    pub fn has_request_body(&self) -> bool {
        !BODYLESS_VERBS
            .iter()
            .any(|v| v.eq_ignore_ascii_case(self.verb.trim()))
    }
}

/// A route template an action is reachable on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativePath {
    /// Route template, e.g. `/widgets/{Id}`
    pub path: String,

    /// Generated by convention rather than declared by the API author
    #[serde(default)]
    pub is_auto_route: bool,
}

impl RelativePath {
    pub fn declared(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_auto_route: false,
        }
    }

    pub fn auto(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_auto_route: true,
        }
    }
}

impl ApiDocumentation {
    /// Load documentation from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        Self::from_file(location).await
    }

    /// Load documentation from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_from(&content, &path.display().to_string())
    }

    /// Load documentation from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            crate::Error::metadata(format!("Failed to fetch API metadata from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(crate::Error::metadata(format!(
                "Failed to fetch API metadata from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            crate::Error::metadata(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::parse_from(&content, url)
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> crate::Result<Self> {
        Self::parse_from(content, "inline content")
    }

    fn parse_from(content: &str, origin: &str) -> crate::Result<Self> {
        let json_err = match serde_json::from_str(content) {
            Ok(docs) => return Ok(docs),
            Err(e) => e,
        };

        serde_yaml::from_str(content).map_err(|yaml_err| {
            crate::Error::metadata(format!(
                "Failed to parse API metadata from {}: neither valid JSON ({}) nor YAML ({})",
                origin, json_err, yaml_err
            ))
        })
    }
}

fn default_property_type() -> String {
    "string".to_string()
}
