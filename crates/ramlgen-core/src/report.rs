//! Diagnostic reporting for a generation run.
//!
//! The generator never consults a reporter to make a decision; reports are
//! purely observational. [`LogReporter`] forwards events to the `log` facade,
//! [`NullReporter`] drops them.

use std::time::Duration;

use crate::metadata::{ApiAction, ApiResource};

/// Receives diagnostic events from the generator and its helpers.
///
/// Every method has an empty default body so implementors only pick the
/// events they care about.
pub trait Reporter: Send + Sync {
    fn generation_started(&self, _title: &str) {}

    fn generation_finished(&self, _title: &str, _elapsed: Duration) {}

    fn resource_started(&self, _resource: &ApiResource) {}

    fn action_started(&self, _resource: &ApiResource, _action: &ApiAction) {}

    fn path_started(&self, _resource: &ApiResource, _action: &ApiAction, _path: &str) {}

    /// An existing node was found under `path`
    fn node_found(&self, _path: &str) {}

    /// No node matched; a new one will be keyed from `base_path`
    fn node_created(&self, _base_path: &str) {}

    fn extension_found(&self, _content_type: &str, _extension: &str) {}

    /// A content type has no extension and was left out of `mediaTypeExtension`
    fn unsupported_content_type(&self, _content_type: &str, _error: &crate::Error) {}

    /// A method was replaced by a later one with the same verb
    fn method_replaced(&self, _path: &str, _verb: &str) {}
}

/// Forwards events to the `log` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn generation_started(&self, title: &str) {
        log::debug!("Generating RAML spec for service {}", title);
    }

    fn generation_finished(&self, title: &str, elapsed: Duration) {
        log::debug!(
            "Generated RAML spec for service {}. Took {}ms",
            title,
            elapsed.as_millis()
        );
    }

    fn resource_started(&self, resource: &ApiResource) {
        log::debug!("Processing resource {}", resource.title);
    }

    fn action_started(&self, resource: &ApiResource, action: &ApiAction) {
        log::debug!(
            "Processing action {} for resource {}",
            action.verb,
            resource.title
        );
    }

    fn path_started(&self, resource: &ApiResource, action: &ApiAction, path: &str) {
        log::debug!(
            "Processing path {} for action {} for resource {}",
            path,
            action.verb,
            resource.title
        );
    }

    fn node_found(&self, path: &str) {
        log::debug!("Found RAML resource for path {}", path);
    }

    fn node_created(&self, base_path: &str) {
        log::debug!("Did not find RAML resource for path {}", base_path);
    }

    fn extension_found(&self, content_type: &str, extension: &str) {
        log::debug!("Found extension {} for {}", extension, content_type);
    }

    fn unsupported_content_type(&self, content_type: &str, error: &crate::Error) {
        log::warn!("Mime type {} not supported: {}", content_type, error);
    }

    fn method_replaced(&self, path: &str, verb: &str) {
        log::warn!(
            "Method {} on {} declared more than once; keeping the last one",
            verb,
            path
        );
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}
