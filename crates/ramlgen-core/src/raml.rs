//! RAML 0.8 document model.
//!
//! Only the subset of RAML that the generator populates is modelled here:
//! basic document information, a path-keyed map of resources, methods keyed
//! by verb, and named parameters. Field names serialize to the RAML key
//! names (`baseUri`, `displayName`, `uriParameters`, ...). Resources and
//! methods are flattened into their parent mapping, matching how RAML nests
//! `/path:` and `get:` keys directly under a resource.
//!
//! See <https://github.com/raml-org/raml-spec/blob/master/versions/raml-08/raml-08.md>

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved URI parameter name for the optional trailing format suffix.
///
/// Appending a known extension to a path (`/widgets.json`) is equivalent to
/// requesting that representation through the `Accept` header.
pub const MEDIA_TYPE_EXTENSION_KEY: &str = "mediaTypeExtension";

/// Named parameters keyed by parameter name, in insertion order.
pub type NamedParameterMap = IndexMap<String, NamedParameter>;

/// Root of a RAML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RamlSpec {
    /// API title
    pub title: String,

    /// API version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Base URI of the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,

    /// Default media type for request and response bodies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Supported protocols (`HTTP`, `HTTPS`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<String>,

    /// User documentation entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<RamlDocumentation>,

    /// Top level resources keyed by path
    #[serde(flatten)]
    pub resources: IndexMap<String, RamlResource>,
}

impl RamlSpec {
    /// Create an empty document with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Look up a top level resource by its path key
    pub fn resource(&self, path: &str) -> Option<&RamlResource> {
        self.resources.get(path)
    }
}

/// A user documentation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamlDocumentation {
    pub title: String,
    /// Markdown content
    pub content: String,
}

/// A resource: one node of the path-keyed resource tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RamlResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URI parameters, including path tokens and `mediaTypeExtension`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_parameters: Option<NamedParameterMap>,

    /// Nested resources keyed by relative path segment
    #[serde(flatten)]
    pub resources: IndexMap<String, RamlResource>,

    /// Methods keyed by lower-cased verb
    #[serde(flatten)]
    pub methods: IndexMap<String, RamlMethod>,
}

impl RamlResource {
    /// Create a resource with no methods or parameters
    pub fn new(display_name: Option<String>, description: Option<String>) -> Self {
        Self {
            display_name,
            description,
            ..Default::default()
        }
    }

    /// Whether the resource declares the reserved format-extension parameter
    pub fn has_media_type_extension(&self) -> bool {
        self.uri_parameters
            .as_ref()
            .is_some_and(|params| params.contains_key(MEDIA_TYPE_EXTENSION_KEY))
    }

    /// Attach a method under the lower-cased verb.
    ///
    /// Returns the method previously stored under that verb, if any.
    pub fn add_method(&mut self, verb: &str, method: RamlMethod) -> Option<RamlMethod> {
        self.methods.insert(verb.to_lowercase(), method)
    }
}

/// A method on a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RamlMethod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Headers keyed by full header name (`x-my-header`)
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: NamedParameterMap,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<NamedParameterMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RamlBody>,
}

/// Request body, keyed by media type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RamlBody {
    #[serde(
        rename = "application/json",
        skip_serializing_if = "Option::is_none"
    )]
    pub json_schema: Option<RamlSchema>,
}

impl RamlBody {
    /// Body carrying a JSON schema document
    pub fn json(schema: impl Into<String>) -> Self {
        Self {
            json_schema: Some(RamlSchema {
                schema: schema.into(),
            }),
        }
    }
}

/// Schema payload, kept as already-serialized text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RamlSchema {
    pub schema: String,
}

/// Declared type of a named parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    #[default]
    String,
    Number,
    Integer,
    Date,
    Boolean,
    File,
}

impl ParameterType {
    /// Map a metadata type name (`string`, `Int32`, `decimal`, ...) to a RAML kind
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "int16" | "int32" | "int64" | "integer" | "long" | "short" | "uint16"
            | "uint32" | "uint64" | "byte" | "sbyte" => Self::Integer,
            "number" | "decimal" | "double" | "float" | "single" => Self::Number,
            "bool" | "boolean" => Self::Boolean,
            "date" | "datetime" | "datetimeoffset" => Self::Date,
            "file" | "stream" | "byte[]" => Self::File,
            _ => Self::String,
        }
    }
}

/// Value of an `example` or `default` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

/// A RAML named parameter (URI parameter, query parameter or header).
///
/// One shape serves every kind. `kind` declares which of the bound fields
/// are meaningful: `min_length`/`max_length`/`pattern` for strings and
/// `minimum`/`maximum` for numbers and integers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ParameterType>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<ParameterValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParameterValue>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub repeat: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl NamedParameter {
    /// A parameter of the given kind with no constraints
    pub fn of_kind(kind: ParameterType) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_method_lowercases_and_replaces() {
        let mut resource = RamlResource::new(Some("Widgets".into()), None);
        let first = RamlMethod {
            description: Some("first".into()),
            ..Default::default()
        };
        let second = RamlMethod {
            description: Some("second".into()),
            ..Default::default()
        };

        assert!(resource.add_method("GET", first).is_none());
        let replaced = resource.add_method("get", second);

        assert_eq!(replaced.and_then(|m| m.description), Some("first".into()));
        assert_eq!(resource.methods.len(), 1);
        assert_eq!(
            resource.methods["get"].description.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_has_media_type_extension() {
        let mut resource = RamlResource::default();
        assert!(!resource.has_media_type_extension());

        let mut params = NamedParameterMap::new();
        params.insert("id".into(), NamedParameter::default());
        resource.uri_parameters = Some(params);
        assert!(!resource.has_media_type_extension());

        resource
            .uri_parameters
            .as_mut()
            .unwrap()
            .insert(MEDIA_TYPE_EXTENSION_KEY.into(), NamedParameter::default());
        assert!(resource.has_media_type_extension());
    }

    #[test]
    fn test_parameter_type_from_type_name() {
        assert_eq!(ParameterType::from_type_name("Int32"), ParameterType::Integer);
        assert_eq!(ParameterType::from_type_name("decimal"), ParameterType::Number);
        assert_eq!(ParameterType::from_type_name("Boolean"), ParameterType::Boolean);
        assert_eq!(ParameterType::from_type_name("DateTime"), ParameterType::Date);
        assert_eq!(ParameterType::from_type_name("Guid"), ParameterType::String);
    }

    #[test]
    fn test_named_parameter_serializes_raml_keys() {
        let mut param = NamedParameter::of_kind(ParameterType::Integer)
            .with_description("Page size")
            .required(true);
        param.minimum = Some(1.0);
        param.max_length = Some(3);
        param.default = Some(ParameterValue::Number(20.0));

        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(
            value,
            json!({
                "description": "Page size",
                "type": "integer",
                "maxLength": 3,
                "minimum": 1.0,
                "default": 20.0,
                "required": true
            })
        );
    }

    #[test]
    fn test_resource_flattens_methods_and_children() {
        let mut resource = RamlResource::new(Some("Widgets".into()), None);
        resource.add_method("POST", RamlMethod::default());
        resource
            .resources
            .insert("/parts".into(), RamlResource::new(Some("Parts".into()), None));

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            value,
            json!({
                "displayName": "Widgets",
                "/parts": { "displayName": "Parts" },
                "post": {}
            })
        );
    }
}
