//! Resource context assembly: names derived from a service id plus its parameters.

use crate::catalog::ServiceDescriptor;
use crate::codegen::parameters::{
    build_parameters, BuiltParameters, FilteredOption, ParameterFilter,
};
use crate::codegen::types::ResourceRenderContext;

pub const RESOURCE_PREFIX: &str = "osc_";
pub const RESOURCE_SUFFIX: &str = "_resource";

/// Identifier fragment for a service: the id with hyphens removed.
pub fn object_name(service_id: &str) -> String {
    service_id.replace('-', "")
}

/// Resource type name, e.g. `osc_my_service_resource` for `my-service`.
///
/// An empty id yields `osc__resource`; callers decide whether that is acceptable.
pub fn resource_name(service_id: &str) -> String {
    format!(
        "{}{}{}",
        RESOURCE_PREFIX,
        service_id.replace('-', "_"),
        RESOURCE_SUFFIX
    )
}

/// Combine a descriptor's identity with its already-built parameters.
pub fn assemble_context(
    descriptor: &ServiceDescriptor,
    parameters: BuiltParameters,
) -> ResourceRenderContext {
    ResourceRenderContext {
        object_name: object_name(&descriptor.service_id),
        resource_name: resource_name(&descriptor.service_id),
        service_id: descriptor.service_id.clone(),
        schema_parameters: parameters.schema,
        instance_parameters: parameters.instance,
    }
}

/// Build parameters and assemble the context in one step.
///
/// Returns the filtered options alongside the context so they can be reported.
pub fn build_context(
    descriptor: &ServiceDescriptor,
    filter: &ParameterFilter,
) -> (ResourceRenderContext, Vec<FilteredOption>) {
    let mut parameters = build_parameters(descriptor, filter);
    let filtered = std::mem::take(&mut parameters.filtered);
    (assemble_context(descriptor, parameters), filtered)
}
