//! Content type to file extension lookup.

use super::MimeExtensionResolver;
use crate::Error;

/// Content types whose extension is not simply their subtype
const KNOWN_EXTENSIONS: &[(&str, &str)] = &[
    ("application/json", "json"),
    ("application/xml", "xml"),
    ("text/xml", "xml"),
    ("text/html", "html"),
    ("text/csv", "csv"),
    ("text/jsv", "jsv"),
    ("text/plain", "txt"),
    ("text/markdown", "md"),
    ("application/javascript", "js"),
    ("text/javascript", "js"),
    ("application/x-protobuf", "pbuf"),
    ("application/x-msgpack", "mpk"),
    ("application/x-yaml", "yaml"),
    ("application/yaml", "yaml"),
    ("text/yaml", "yaml"),
    ("application/octet-stream", "bin"),
];

/// Resolves extensions from a table of well-known content types.
///
/// Media type parameters such as `; charset=utf-8` are ignored. A type that
/// is not in the table falls back to its subtype when the subtype is a plain
/// alphanumeric word (`image/png` -> `png`); anything else, including
/// structured syntax suffixes like `application/soap+xml`, is unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownMimeTypes;

impl MimeExtensionResolver for KnownMimeTypes {
    fn resolve(&self, content_type: &str) -> crate::Result<String> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if let Some((_, ext)) = KNOWN_EXTENSIONS.iter().find(|(mime, _)| *mime == essence) {
            return Ok((*ext).to_string());
        }

        match essence.split_once('/') {
            Some((kind, subtype))
                if !kind.is_empty()
                    && !subtype.is_empty()
                    && subtype.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Ok(subtype.to_string())
            }
            _ => Err(Error::unsupported_content_type(content_type)),
        }
    }
}
