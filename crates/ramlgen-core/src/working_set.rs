//! Canonical lookup keys for a single route template.
//!
//! A route may be declared both with and without the trailing
//! `.{mediaTypeExtension}` token. Both spellings denote the same resource, so
//! a [`WorkingSet`] carries both keys and the resource tree is searched with
//! each of them before a new node is created.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::metadata::{ApiResource, RelativePath};
use crate::raml::{NamedParameter, ParameterType};

/// Suffix a route carries when it accepts a format extension
pub const MEDIA_TYPE_EXTENSION_SUFFIX: &str = ".{mediaTypeExtension}";

static PATH_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid path parameter regex"));

/// A path token and the URI parameter stub generated for it
#[derive(Debug, Clone, PartialEq)]
pub struct PathParameter {
    pub name: String,
    pub parameter: NamedParameter,
}

/// Lookup keys, path parameters and route kind for one route template
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSet {
    /// Route without the format-extension suffix
    pub base_path: String,
    /// Route with the format-extension suffix
    pub extension_path: String,
    /// Candidate keys, most specific first
    pub available_paths: Vec<String>,
    /// Distinct path tokens in template order
    pub path_params: Vec<PathParameter>,
    pub is_auto_route: bool,
}

impl WorkingSet {
    /// Compute the working set for `path` on `resource`.
    ///
    /// Pure: the same inputs always give the same working set.
    pub fn resolve(path: &RelativePath, resource: &ApiResource) -> Self {
        let base_path = strip_extension_suffix(&path.path);
        let extension_path = format!("{}{}", base_path, MEDIA_TYPE_EXTENSION_SUFFIX);
        let path_params = extract_path_params(&base_path)
            .into_iter()
            .map(|name| PathParameter {
                parameter: path_parameter_stub(&name, resource),
                name,
            })
            .collect();

        Self {
            available_paths: vec![extension_path.clone(), base_path.clone()],
            base_path,
            extension_path,
            path_params,
            is_auto_route: path.is_auto_route,
        }
    }

    /// Whether `name` is one of this route's path tokens, ignoring ASCII case
    pub fn has_path_param(&self, name: &str) -> bool {
        self.path_params
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
    }
}

fn strip_extension_suffix(template: &str) -> String {
    let trimmed = template.trim();
    let stripped = trimmed
        .strip_suffix(MEDIA_TYPE_EXTENSION_SUFFIX)
        .unwrap_or(trimmed);

    if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{}", stripped)
    }
}

/// Distinct `{token}` names in order of first appearance. A greedy `*`
/// suffix (`{Path*}`) is dropped. A literal `{mediaTypeExtension}` token
/// inside the path is an ordinary path parameter.
fn extract_path_params(path: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PATH_PARAM_RE
        .captures_iter(path)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().trim_end_matches('*').to_string())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Path parameters are always required. Type, description and allowed values
/// come from the matching resource property when there is one.
fn path_parameter_stub(name: &str, resource: &ApiResource) -> NamedParameter {
    let Some(property) = resource.property(name) else {
        return NamedParameter::of_kind(ParameterType::String).required(true);
    };

    let mut stub = NamedParameter::of_kind(ParameterType::from_type_name(&property.property_type))
        .required(true);
    stub.description = property.description.clone();
    stub.enum_values = property.allowed_values.clone();
    stub
}
