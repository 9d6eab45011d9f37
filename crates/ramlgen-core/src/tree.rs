//! Find-or-insert of resource nodes in the path-keyed resource map.

use indexmap::IndexMap;

use crate::metadata::ApiResource;
use crate::raml::RamlResource;
use crate::report::Reporter;
use crate::working_set::WorkingSet;

/// Adds nodes to, and finds nodes in, a document's resource map.
///
/// The builder holds the only mutable borrow of the map for its lifetime, so
/// a node handed out by [`add_or_merge`](Self::add_or_merge) is never aliased.
pub struct ResourceTreeBuilder<'a> {
    resources: &'a mut IndexMap<String, RamlResource>,
    reporter: &'a dyn Reporter,
}

impl<'a> ResourceTreeBuilder<'a> {
    pub fn new(
        resources: &'a mut IndexMap<String, RamlResource>,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            resources,
            reporter,
        }
    }

    /// Index and key of the first candidate path that already has a node
    pub fn find<'w>(&self, working_set: &'w WorkingSet) -> Option<(usize, &'w str)> {
        working_set.available_paths.iter().find_map(|path| {
            self.resources
                .get_index_of(path.as_str())
                .map(|index| (index, path.as_str()))
        })
    }

    /// Resolve the node for `working_set` and let `attach` add methods and
    /// parameters to it.
    ///
    /// The candidate paths are tried in order and the first existing node is
    /// used. Otherwise a node is created from `resource`, passed to `attach`,
    /// and inserted under the extension path when it ended up with a
    /// `mediaTypeExtension` parameter, or under the base path when it did not.
    /// Returns the key the node is stored under, the node, and `true` when
    /// the node was created by this call.
    ///
    /// # Panics
    ///
    /// Panics when the working set offers no candidate paths. A working set
    /// always carries both spellings of its route, so an empty one means the
    /// resolver is broken.
    pub fn add_or_merge<'s, 'w, F>(
        &'s mut self,
        working_set: &'w WorkingSet,
        resource: &ApiResource,
        attach: F,
    ) -> (&'w str, &'s mut RamlResource, bool)
    where
        F: FnOnce(&mut RamlResource),
    {
        assert!(
            !working_set.available_paths.is_empty(),
            "working set for {:?} has no candidate paths",
            working_set.base_path
        );

        if let Some((index, key)) = self.find(working_set) {
            self.reporter.node_found(key);
            let node = &mut self.resources[index];
            attach(&mut *node);
            return (key, node, false);
        }

        self.reporter.node_created(&working_set.base_path);
        let mut node =
            RamlResource::new(Some(resource.title.clone()), resource.description.clone());
        attach(&mut node);

        let key = if node.has_media_type_extension() {
            working_set.extension_path.as_str()
        } else {
            working_set.base_path.as_str()
        };
        let (index, _) = self.resources.insert_full(key.to_string(), node);
        (key, &mut self.resources[index], true)
    }
}
