//! RAML 0.8 text output.

use crate::raml::RamlSpec;

/// First line of every RAML 0.8 document
pub const RAML_HEADER: &str = "#%RAML 0.8";

/// Render `spec` as RAML 0.8 text
pub fn to_raml(spec: &RamlSpec) -> crate::Result<String> {
    let body = serde_yaml::to_string(spec)?;
    Ok(format!("{}\n{}", RAML_HEADER, body))
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value as YamlValue;

    use super::*;
    use crate::metadata::{ApiAction, ApiDocumentation, ApiResource, RelativePath};
    use crate::report::NullReporter;
    use crate::{GeneratorConfig, RamlCollectionGenerator};

    fn parse(raml: &str) -> YamlValue {
        let body = raml
            .strip_prefix(RAML_HEADER)
            .expect("document starts with the RAML header");
        serde_yaml::from_str(body).unwrap()
    }

    #[test]
    fn test_header_and_basic_information() {
        let mut spec = RamlSpec::new("Widget Service");
        spec.version = Some("v1".into());
        spec.base_uri = Some("https://api.example.com".into());

        let raml = to_raml(&spec).unwrap();
        assert!(raml.starts_with("#%RAML 0.8\n"));

        let doc = parse(&raml);
        assert_eq!(doc["title"].as_str(), Some("Widget Service"));
        assert_eq!(doc["version"].as_str(), Some("v1"));
        assert_eq!(doc["baseUri"].as_str(), Some("https://api.example.com"));
        assert!(doc.get("mediaType").is_none());
        assert!(doc.get("protocols").is_none());
    }

    #[test]
    fn test_resources_render_as_raml_tree() {
        let docs = ApiDocumentation {
            title: "Widget Service".into(),
            resources: vec![ApiResource {
                title: "Widgets".into(),
                actions: vec![ApiAction {
                    verb: "GET".into(),
                    notes: Some("Fetch a widget".into()),
                    relative_paths: vec![RelativePath::declared("/widgets/{id}")],
                    content_types: vec!["application/json".into(), "text/xml".into()],
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let spec = RamlCollectionGenerator::new(GeneratorConfig::default())
            .with_reporter(NullReporter)
            .generate(&docs)
            .unwrap();

        let doc = parse(&to_raml(&spec).unwrap());
        let resource = &doc["/widgets/{id}.{mediaTypeExtension}"];
        assert_eq!(resource["displayName"].as_str(), Some("Widgets"));

        let uri_params = &resource["uriParameters"];
        assert_eq!(uri_params["id"]["type"].as_str(), Some("string"));
        assert_eq!(uri_params["id"]["required"].as_bool(), Some(true));
        assert_eq!(
            uri_params["mediaTypeExtension"]["enum"],
            serde_yaml::from_str::<YamlValue>("[json, xml]").unwrap()
        );

        let get = &resource["get"];
        assert_eq!(get["description"].as_str(), Some("Fetch a widget"));
        let schema = get["body"]["application/json"]["schema"].as_str().unwrap();
        assert!(schema.contains("draft-04"));
        assert!(get.get("headers").is_none());
    }
}
