//! # oscgen: Terraform resource generator for the Open Source Cloud catalog
//!
//! oscgen fetches the service catalog, derives a parameter schema for every
//! service and renders one Terraform plugin framework resource file per
//! service.
//!
//! ## Pipeline
//!
//! ```text
//! GET /service → ServiceDescriptor → build_parameters → ResourceRenderContext
//!     → Renderer → file
//! ```
//!
//! Only string-typed instance options are turned into attributes. The `name`
//! option is handled by the generated resource itself and never becomes a
//! parameter.
//!
//! ## Example
//!
//! ```rust,no_run
//! use oscgen::{GenerationPipeline, MiniJinjaRenderer, ServiceDescriptor, DEFAULT_TEMPLATE};
//! use std::path::Path;
//!
//! let services = ServiceDescriptor::list_from_json(
//!     r#"[{"serviceId": "encore", "serviceInstanceOptions": [
//!         {"name": "profile", "type": "string", "required": true}
//!     ]}]"#,
//! ).unwrap();
//!
//! let renderer = MiniJinjaRenderer;
//! let output_dir = Path::new("internal/provider");
//! let report = GenerationPipeline::new(&renderer, DEFAULT_TEMPLATE, output_dir).run(&services);
//! assert!(report.is_success());
//! ```

pub mod catalog;
pub mod codegen;
pub mod error;

pub use catalog::{CatalogClient, CatalogConfig, Credentials, InstanceOption, ServiceDescriptor};
pub use codegen::{
    build_context, build_parameters, CommandRenderer, GenerationPipeline, GenerationReport,
    GeneratorConfig, MiniJinjaRenderer, ParameterFilter, Renderer, ResourceRenderContext,
    DEFAULT_TEMPLATE,
};
pub use error::{CatalogError, ConfigError, GenerateError, RenderError};
