//! Query-string parameters derived from resource properties.

use super::QueryParameterLookup;
use crate::metadata::ApiResource;
use crate::raml::{NamedParameter, NamedParameterMap, ParameterType};
use crate::working_set::WorkingSet;

/// Every resource property that is not bound by the route becomes a query
/// parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyQueryLookup;

impl QueryParameterLookup for PropertyQueryLookup {
    fn lookup(&self, resource: &ApiResource, working_set: &WorkingSet) -> NamedParameterMap {
        resource
            .properties
            .iter()
            .filter(|p| !working_set.has_path_param(&p.id))
            .map(|p| {
                let mut param = NamedParameter::of_kind(ParameterType::from_type_name(
                    &p.property_type,
                ))
                .required(p.is_required)
                .repeat(p.is_repeatable);
                param.display_name = p.title.clone();
                param.description = p.description.clone();
                param.enum_values = p.allowed_values.clone();
                (p.id.clone(), param)
            })
            .collect()
    }
}
