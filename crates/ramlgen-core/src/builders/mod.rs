//! Collaborators the generator delegates to, and their default implementations.
pub mod mime;
pub mod query;
pub mod schema;

pub use mime::KnownMimeTypes;
pub use query::PropertyQueryLookup;
pub use schema::JsonSchemaGenerator;

use crate::metadata::ApiResource;
use crate::raml::NamedParameterMap;
use crate::working_set::WorkingSet;
use serde_json::Value as JsonValue;

/// Produces the body schema of a resource.
///
/// The generator embeds the returned value as-is; it never inspects it.
pub trait SchemaGenerator: Send + Sync {
    fn generate(&self, resource: &ApiResource) -> crate::Result<JsonValue>;
}

/// Produces the query parameters of a body-less method.
pub trait QueryParameterLookup: Send + Sync {
    fn lookup(&self, resource: &ApiResource, working_set: &WorkingSet) -> NamedParameterMap;
}

/// Maps a content type to its short file extension (`application/json` -> `json`).
pub trait MimeExtensionResolver: Send + Sync {
    /// Fails with [`crate::Error::UnsupportedContentType`] for unmapped types.
    fn resolve(&self, content_type: &str) -> crate::Result<String>;
}
