//! URI parameter merging and `mediaTypeExtension` synthesis.

use std::collections::{BTreeSet, HashSet};

use crate::builders::MimeExtensionResolver;
use crate::metadata::ApiAction;
use crate::raml::{NamedParameter, NamedParameterMap, MEDIA_TYPE_EXTENSION_KEY};
use crate::report::Reporter;
use crate::working_set::WorkingSet;

/// Builds the `mediaTypeExtension` URI parameter from an action's content types.
///
/// Appending a known extension to a declared route (`/widgets.json`) is
/// equivalent to sending the matching `Accept` header; the parameter
/// enumerates the extensions the service answers to.
pub struct MediaTypeExtensions<'a> {
    allowed: &'a BTreeSet<String>,
    resolver: &'a dyn MimeExtensionResolver,
    reporter: &'a dyn Reporter,
}

impl<'a> MediaTypeExtensions<'a> {
    pub fn new(
        allowed: &'a BTreeSet<String>,
        resolver: &'a dyn MimeExtensionResolver,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            allowed,
            resolver,
            reporter,
        }
    }

    /// The parameter for `content_types`, or `None` when no content type maps
    /// to an allowed extension.
    ///
    /// Unsupported content types are reported and skipped. Extensions outside
    /// the allow-list are skipped silently. Output order follows input order.
    pub fn synthesize(&self, content_types: &[String]) -> Option<NamedParameter> {
        let mut seen = HashSet::new();
        let mut pairs: Vec<(&str, String)> = Vec::new();

        for content_type in content_types {
            if !seen.insert(content_type.as_str()) {
                continue;
            }
            match self.resolver.resolve(content_type) {
                Ok(extension) => {
                    self.reporter.extension_found(content_type, &extension);
                    if self.allowed.contains(&extension) {
                        pairs.push((content_type.as_str(), extension));
                    }
                }
                Err(e) => self.reporter.unsupported_content_type(content_type, &e),
            }
        }

        if pairs.is_empty() {
            return None;
        }

        // "Use json to specify application/json or xml to specify text/xml"
        let description = format!(
            "Use {}",
            pairs
                .iter()
                .map(|(content_type, extension)| {
                    format!("{} to specify {}", extension, content_type)
                })
                .collect::<Vec<_>>()
                .join(" or ")
        );

        let mut extensions: Vec<String> = Vec::with_capacity(pairs.len());
        for (_, extension) in pairs {
            if !extensions.contains(&extension) {
                extensions.push(extension);
            }
        }

        Some(
            NamedParameter::default()
                .with_enum(extensions)
                .with_description(description),
        )
    }
}

/// Merge the route's path parameters, and for declared routes the
/// `mediaTypeExtension` parameter, into a node's existing URI parameters.
///
/// Names already present are never replaced. The caller assigns the returned
/// map back onto the node.
pub fn merge_uri_parameters(
    existing: Option<NamedParameterMap>,
    working_set: &WorkingSet,
    action: &ApiAction,
    extensions: &MediaTypeExtensions<'_>,
) -> NamedParameterMap {
    let mut params = existing.unwrap_or_default();

    for path_param in &working_set.path_params {
        params
            .entry(path_param.name.clone())
            .or_insert_with(|| path_param.parameter.clone());
    }

    if !working_set.is_auto_route && !params.contains_key(MEDIA_TYPE_EXTENSION_KEY) {
        if let Some(param) = extensions.synthesize(&action.content_types) {
            params.insert(MEDIA_TYPE_EXTENSION_KEY.to_string(), param);
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::KnownMimeTypes;
    use crate::metadata::{ApiResource, RelativePath};
    use crate::raml::ParameterType;
    use crate::report::testing::RecordingReporter;
    use crate::report::NullReporter;

    fn allow(formats: &[&str]) -> BTreeSet<String> {
        formats.iter().map(|f| f.to_string()).collect()
    }

    fn action(content_types: &[&str]) -> ApiAction {
        ApiAction {
            verb: "GET".into(),
            content_types: content_types.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    fn working_set(path: RelativePath) -> WorkingSet {
        WorkingSet::resolve(&path, &ApiResource::default())
    }

    #[test]
    fn test_synthesize_json_and_xml() {
        let allowed = allow(&["json", "xml"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);

        let param = extensions
            .synthesize(&action(&["application/json", "text/xml"]).content_types)
            .unwrap();
        assert_eq!(
            param.enum_values,
            Some(vec!["json".to_string(), "xml".to_string()])
        );
        assert_eq!(
            param.description.as_deref(),
            Some("Use json to specify application/json or xml to specify text/xml")
        );
    }

    #[test]
    fn test_synthesize_follows_input_order() {
        let allowed = allow(&["json", "xml"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);
        let content_types = action(&["text/xml", "application/json"]).content_types;

        let first = extensions.synthesize(&content_types);
        let second = extensions.synthesize(&content_types);
        assert_eq!(first, second);
        assert_eq!(
            first.and_then(|p| p.enum_values),
            Some(vec!["xml".to_string(), "json".to_string()])
        );
    }

    #[test]
    fn test_synthesize_filters_disallowed_and_unsupported() {
        let allowed = allow(&["json"]);
        let reporter = RecordingReporter::default();
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &reporter);

        let param = extensions
            .synthesize(
                &action(&["application/soap+xml", "text/html", "application/json"])
                    .content_types,
            )
            .unwrap();
        assert_eq!(param.enum_values, Some(vec!["json".to_string()]));
        assert_eq!(reporter.events(), vec!["unsupported application/soap+xml"]);
    }

    #[test]
    fn test_synthesize_repeated_unsupported_reported_once() {
        let allowed = allow(&["json"]);
        let reporter = RecordingReporter::default();
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &reporter);

        let param = extensions
            .synthesize(
                &action(&[
                    "application/soap+xml",
                    "text/xml",
                    "application/soap+xml",
                    "text/xml",
                    "application/json",
                ])
                .content_types,
            )
            .unwrap();
        assert_eq!(param.enum_values, Some(vec!["json".to_string()]));
        assert_eq!(reporter.events(), vec!["unsupported application/soap+xml"]);
    }

    #[test]
    fn test_synthesize_nothing_survives() {
        let allowed = allow(&["json"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);

        assert!(extensions
            .synthesize(&action(&["application/soap+xml"]).content_types)
            .is_none());
        assert!(extensions.synthesize(&[]).is_none());
    }

    #[test]
    fn test_synthesize_shared_extension_listed_once() {
        let allowed = allow(&["xml"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);

        let param = extensions
            .synthesize(&action(&["application/xml", "text/xml", "text/xml"]).content_types)
            .unwrap();
        assert_eq!(param.enum_values, Some(vec!["xml".to_string()]));
        assert_eq!(
            param.description.as_deref(),
            Some("Use xml to specify application/xml or xml to specify text/xml")
        );
    }

    #[test]
    fn test_merge_declared_route() {
        let allowed = allow(&["json", "xml"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);
        let ws = working_set(RelativePath::declared("/widgets/{id}"));

        let params = merge_uri_parameters(
            None,
            &ws,
            &action(&["application/json", "text/xml"]),
            &extensions,
        );
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["id", MEDIA_TYPE_EXTENSION_KEY]
        );
        assert_eq!(params["id"].kind, Some(ParameterType::String));
        assert!(params["id"].required);
    }

    #[test]
    fn test_merge_auto_route_skips_extension() {
        let allowed = allow(&["json", "xml"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);
        let ws = working_set(RelativePath::auto("/widgets/{id}"));

        let params = merge_uri_parameters(None, &ws, &action(&["application/json"]), &extensions);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_merge_no_surviving_content_type_leaves_no_key() {
        let allowed = allow(&["json"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);
        let ws = working_set(RelativePath::declared("/widgets"));

        let params =
            merge_uri_parameters(None, &ws, &action(&["application/soap+xml"]), &extensions);
        assert!(params.is_empty());
    }

    #[test]
    fn test_merge_path_token_named_like_extension_wins() {
        let allowed = allow(&["json"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);
        let get = action(&["application/json"]);

        let declared = working_set(RelativePath::declared("/files/{mediaTypeExtension}/raw"));
        let params = merge_uri_parameters(None, &declared, &get, &extensions);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec![MEDIA_TYPE_EXTENSION_KEY]);
        let param = &params[MEDIA_TYPE_EXTENSION_KEY];
        assert!(param.required);
        assert_eq!(param.kind, Some(ParameterType::String));
        assert!(param.enum_values.is_none());
        assert!(param.description.is_none());

        let auto = working_set(RelativePath::auto("/files/{mediaTypeExtension}/raw"));
        let params = merge_uri_parameters(None, &auto, &get, &extensions);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec![MEDIA_TYPE_EXTENSION_KEY]);
        assert!(params[MEDIA_TYPE_EXTENSION_KEY].required);
        assert!(params[MEDIA_TYPE_EXTENSION_KEY].enum_values.is_none());
    }

    #[test]
    fn test_merge_keeps_existing_parameters() {
        let allowed = allow(&["json", "xml"]);
        let extensions = MediaTypeExtensions::new(&allowed, &KnownMimeTypes, &NullReporter);
        let ws = working_set(RelativePath::declared("/widgets/{id}"));

        let mut existing = NamedParameterMap::new();
        existing.insert(
            "id".into(),
            NamedParameter::of_kind(ParameterType::Integer).with_description("declared"),
        );
        existing.insert(
            MEDIA_TYPE_EXTENSION_KEY.into(),
            NamedParameter::default().with_enum(["json"]),
        );

        let merged = merge_uri_parameters(
            Some(existing.clone()),
            &ws,
            &action(&["application/json", "text/xml"]),
            &extensions,
        );
        assert_eq!(merged, existing);

        // Merging the same route again is idempotent
        let again = merge_uri_parameters(Some(merged.clone()), &ws, &action(&[]), &extensions);
        assert_eq!(again, merged);
    }
}
