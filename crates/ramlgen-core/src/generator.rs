//! RAML document generation.
//!
//! [`RamlCollectionGenerator`] walks every resource, action and route of an
//! [`ApiDocumentation`] and folds them into a [`RamlSpec`]. Routes that only
//! differ by the optional `.{mediaTypeExtension}` suffix end up on the same
//! resource node.
//!
//! # Examples
//!
//! ```
//! use ramlgen_core::{ApiDocumentation, GeneratorConfig, RamlCollectionGenerator};
//! use ramlgen_core::metadata::{ApiAction, ApiResource, RelativePath};
//!
//! let docs = ApiDocumentation {
//!     title: "Widget Service".into(),
//!     resources: vec![ApiResource {
//!         title: "Widgets".into(),
//!         actions: vec![ApiAction {
//!             verb: "GET".into(),
//!             relative_paths: vec![RelativePath::declared("/widgets/{id}")],
//!             content_types: vec!["application/json".into()],
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let generator = RamlCollectionGenerator::new(GeneratorConfig::default());
//! let spec = generator.generate(&docs).unwrap();
//! assert!(spec.resource("/widgets/{id}.{mediaTypeExtension}").is_some());
//! ```

use std::time::Instant;

use url::Url;

use crate::builders::{
    JsonSchemaGenerator, KnownMimeTypes, MimeExtensionResolver, PropertyQueryLookup,
    QueryParameterLookup, SchemaGenerator,
};
use crate::config::GeneratorConfig;
use crate::metadata::{ApiAction, ApiDocumentation, ApiResource};
use crate::parameters::{merge_uri_parameters, MediaTypeExtensions};
use crate::raml::{RamlBody, RamlDocumentation, RamlMethod, RamlSpec};
use crate::report::{LogReporter, Reporter};
use crate::tree::ResourceTreeBuilder;
use crate::working_set::WorkingSet;

/// Builds RAML documents from API metadata.
///
/// A generator holds no per-run state: every call to
/// [`generate`](Self::generate) starts from an empty document, so one
/// generator may serve many threads.
pub struct RamlCollectionGenerator {
    config: GeneratorConfig,
    schema_generator: Box<dyn SchemaGenerator>,
    query_lookup: Box<dyn QueryParameterLookup>,
    mime_resolver: Box<dyn MimeExtensionResolver>,
    reporter: Box<dyn Reporter>,
}

impl RamlCollectionGenerator {
    /// Create a generator with the default collaborators, reporting to `log`
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            schema_generator: Box::new(JsonSchemaGenerator),
            query_lookup: Box::new(PropertyQueryLookup),
            mime_resolver: Box::new(KnownMimeTypes),
            reporter: Box::new(LogReporter),
        }
    }

    pub fn with_schema_generator(
        mut self,
        schema_generator: impl SchemaGenerator + 'static,
    ) -> Self {
        self.schema_generator = Box::new(schema_generator);
        self
    }

    pub fn with_query_lookup(mut self, query_lookup: impl QueryParameterLookup + 'static) -> Self {
        self.query_lookup = Box::new(query_lookup);
        self
    }

    pub fn with_mime_resolver(
        mut self,
        mime_resolver: impl MimeExtensionResolver + 'static,
    ) -> Self {
        self.mime_resolver = Box::new(mime_resolver);
        self
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Generate the RAML document for `documentation`
    pub fn generate(&self, documentation: &ApiDocumentation) -> crate::Result<RamlSpec> {
        let started = Instant::now();
        self.reporter.generation_started(&documentation.title);

        let mut spec = RamlSpec::new(documentation.title.clone());
        self.set_basic_information(documentation, &mut spec);
        self.set_resources(documentation, &mut spec)?;

        self.reporter
            .generation_finished(&documentation.title, started.elapsed());
        Ok(spec)
    }

    fn set_basic_information(&self, documentation: &ApiDocumentation, spec: &mut RamlSpec) {
        spec.version = documentation.api_version.clone();
        spec.base_uri = self
            .config
            .base_uri
            .as_ref()
            .map(Url::to_string)
            .or_else(|| documentation.api_base_url.clone());
        spec.media_type = self.config.media_type.clone();
        spec.protocols = match &self.config.protocols {
            Some(protocols) => protocols.clone(),
            None => protocols_for(spec.base_uri.as_deref()),
        };

        if let Some(description) = documentation
            .description
            .as_ref()
            .filter(|d| !d.trim().is_empty())
        {
            spec.documentation.push(RamlDocumentation {
                title: "Overview".to_string(),
                content: description.clone(),
            });
        }
    }

    fn set_resources(
        &self,
        documentation: &ApiDocumentation,
        spec: &mut RamlSpec,
    ) -> crate::Result<()> {
        let reporter = self.reporter.as_ref();
        let extensions = MediaTypeExtensions::new(
            &self.config.allowed_formats,
            self.mime_resolver.as_ref(),
            reporter,
        );
        let mut tree = ResourceTreeBuilder::new(&mut spec.resources, reporter);

        for resource in &documentation.resources {
            reporter.resource_started(resource);

            for action in &resource.actions {
                reporter.action_started(resource, action);

                for path in &action.relative_paths {
                    let working_set = WorkingSet::resolve(path, resource);
                    reporter.path_started(resource, action, &path.path);

                    let method = self.build_method(action, resource, &working_set)?;
                    let (key, node, _) = tree.add_or_merge(&working_set, resource, |node| {
                        let params = merge_uri_parameters(
                            node.uri_parameters.take(),
                            &working_set,
                            action,
                            &extensions,
                        );
                        node.uri_parameters = (!params.is_empty()).then_some(params);
                    });

                    if node.add_method(&action.verb, method).is_some() {
                        reporter.method_replaced(key, &action.verb);
                    }
                }
            }
        }

        Ok(())
    }

    /// Build the method for `action` on `resource`.
    ///
    /// Body-less verbs (`GET`, `DELETE`, ...) get their query parameters from
    /// the lookup; the others carry their parameters in the body.
    pub fn build_method(
        &self,
        action: &ApiAction,
        resource: &ApiResource,
        working_set: &WorkingSet,
    ) -> crate::Result<RamlMethod> {
        let schema = self.schema_generator.generate(resource)?;
        let mut method = RamlMethod {
            description: action.notes.clone(),
            body: Some(RamlBody::json(serde_json::to_string(&schema)?)),
            ..Default::default()
        };

        if !action.has_request_body() {
            let query_parameters = self.query_lookup.lookup(resource, working_set);
            if !query_parameters.is_empty() {
                method.query_parameters = Some(query_parameters);
            }
        }

        Ok(method)
    }
}

/// `HTTP`/`HTTPS` from the scheme of the base URI
fn protocols_for(base_uri: Option<&str>) -> Vec<String> {
    base_uri
        .and_then(|uri| Url::parse(uri).ok())
        .map(|url| url.scheme().to_ascii_uppercase())
        .filter(|scheme| scheme == "HTTP" || scheme == "HTTPS")
        .into_iter()
        .collect()
}
