//! Code generation framework for catalog resources.
//!
//! This module turns service descriptors into render contexts and renders
//! them into one resource source file per service.

pub mod fs_utils;
pub mod parameters;
pub mod pipeline;
pub mod project_config;
pub mod render;
pub mod resource;
pub mod types;
pub mod utils;

// Re-export key types
pub use parameters::{
    build_parameters, BuiltParameters, FilterReason, FilteredOption, ParameterFilter,
};
pub use pipeline::{build_contexts, GenerationPipeline, GenerationReport};
pub use project_config::{GeneratorConfig, RendererKind};
pub use render::{CommandRenderer, MiniJinjaRenderer, Renderer, DEFAULT_TEMPLATE};
pub use resource::{assemble_context, build_context, object_name, resource_name};
pub use types::{
    InstanceParameter, Requiredness, ResourceRenderContext, SchemaAttributeKind, SchemaParameter,
    ValueType,
};
pub use utils::{to_snake_case, to_title_case};
