//! Generation pipeline: descriptor → parameters → context → render → file.
//!
//! Descriptors are processed one at a time, in catalog order. A failure on one
//! descriptor is logged and recorded in the [`GenerationReport`]; files already
//! written for earlier descriptors are left in place and the loop continues.
//! A resource name belongs to the first descriptor whose file was produced;
//! later descriptors mapping to the same name fail with a collision.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::catalog::ServiceDescriptor;
use crate::codegen::fs_utils;
use crate::codegen::parameters::ParameterFilter;
use crate::codegen::render::Renderer;
use crate::codegen::resource::build_context;
use crate::codegen::types::ResourceRenderContext;
use crate::error::GenerateError;

/// Summary of one generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written (or that would be written, on a dry run)
    pub generated: Vec<PathBuf>,
    /// Service ids left out by the service filter or because they were empty
    pub skipped: Vec<String>,
    pub failed: Vec<(String, GenerateError)>,
    /// Total options dropped across all descriptors
    pub filtered_options: usize,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Whether a descriptor takes part in a run.
///
/// Entries with an empty id are never selected. An empty `services` set selects
/// everything else.
pub fn is_selected(descriptor: &ServiceDescriptor, services: &BTreeSet<String>) -> bool {
    if descriptor.service_id.is_empty() {
        tracing::warn!("Skipping catalog entry with an empty serviceId");
        return false;
    }
    services.is_empty() || services.contains(&descriptor.service_id)
}

/// Render contexts of the selected descriptors, without rendering anything
pub fn build_contexts(
    descriptors: &[ServiceDescriptor],
    filter: &ParameterFilter,
    services: &BTreeSet<String>,
) -> Vec<ResourceRenderContext> {
    descriptors
        .iter()
        .filter(|d| is_selected(d, services))
        .map(|d| build_context(d, filter).0)
        .collect()
}

/// Configuration for the complete generation pipeline
pub struct GenerationPipeline<'a> {
    renderer: &'a dyn Renderer,
    template: &'a str,
    output_dir: &'a Path,
    extension: String,
    filter: ParameterFilter,
    services: BTreeSet<String>,
    dry_run: bool,
}

impl<'a> GenerationPipeline<'a> {
    /// Create a pipeline writing `.go` files with the default option filter
    pub fn new(renderer: &'a dyn Renderer, template: &'a str, output_dir: &'a Path) -> Self {
        Self {
            renderer,
            template,
            output_dir,
            extension: "go".to_string(),
            filter: ParameterFilter::default(),
            services: BTreeSet::new(),
            dry_run: false,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_filter(mut self, filter: ParameterFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Restrict generation to these service ids. An empty set selects all.
    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Render everything but write nothing
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the pipeline over every descriptor
    pub fn run(&self, descriptors: &[ServiceDescriptor]) -> GenerationReport {
        let mut report = GenerationReport::default();
        // resource name -> service id that produced it
        let mut seen: HashMap<String, String> = HashMap::new();

        for descriptor in descriptors {
            if !self.selects(descriptor) {
                report.skipped.push(descriptor.service_id.clone());
                continue;
            }

            match self.generate(descriptor, &mut seen, &mut report.filtered_options) {
                Ok(path) => {
                    if self.dry_run {
                        tracing::info!("Would generate {}", path.display());
                    } else {
                        tracing::info!("Generated {}", path.display());
                    }
                    report.generated.push(path);
                }
                Err(e) => {
                    tracing::error!("Failed to generate {}: {}", descriptor.service_id, e);
                    report.failed.push((descriptor.service_id.clone(), e));
                }
            }
        }

        tracing::info!(
            "Generation finished: {} generated, {} skipped, {} failed, {} options filtered",
            report.generated.len(),
            report.skipped.len(),
            report.failed.len(),
            report.filtered_options
        );

        report
    }

    fn selects(&self, descriptor: &ServiceDescriptor) -> bool {
        is_selected(descriptor, &self.services)
    }

    fn generate(
        &self,
        descriptor: &ServiceDescriptor,
        seen: &mut HashMap<String, String>,
        filtered_options: &mut usize,
    ) -> Result<PathBuf, GenerateError> {
        let (context, filtered) = build_context(descriptor, &self.filter);
        *filtered_options += filtered.len();

        if let Some(first) = seen.get(&context.resource_name) {
            return Err(GenerateError::Collision {
                resource_name: context.resource_name.clone(),
                first: first.clone(),
            });
        }

        let value = context.to_value()?;
        let rendered = self.renderer.render(&value, self.template)?;

        let path =
            fs_utils::resource_path(self.output_dir, &context.resource_name, &self.extension);
        if !self.dry_run {
            fs_utils::write_file(&path, rendered).map_err(|source| GenerateError::Write {
                path: path.clone(),
                source,
            })?;
        }

        // Only a descriptor that produced a file claims its resource name.
        seen.insert(context.resource_name, context.service_id);

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InstanceOption;
    use crate::error::RenderError;
    use serde_json::Value;

    /// Renders `serviceId`, failing for ids listed in `fail_on`.
    struct StubRenderer {
        fail_on: Vec<&'static str>,
    }

    impl Renderer for StubRenderer {
        fn render(&self, context: &Value, _template: &str) -> Result<String, RenderError> {
            let id = context["serviceId"].as_str().unwrap_or_default();
            if self.fail_on.contains(&id) {
                return Err(RenderError::Process {
                    program: "stub".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: format!("cannot render {}", id),
                });
            }
            Ok(id.to_string())
        }
    }

    fn service(id: &str) -> ServiceDescriptor {
        ServiceDescriptor {
            service_id: id.to_string(),
            service_instance_options: vec![InstanceOption {
                name: "name".to_string(),
                option_type: "string".to_string(),
                required: true,
            }],
        }
    }

    #[test]
    fn test_continue_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = StubRenderer { fail_on: vec!["broken"] };
        let pipeline = GenerationPipeline::new(&renderer, "", dir.path());

        let report = pipeline.run(&[service("first"), service("broken"), service("last")]);

        assert!(!report.is_success());
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "broken");
        assert!(matches!(report.failed[0].1, GenerateError::Render(_)));
        assert_eq!(report.filtered_options, 3);
        assert!(dir.path().join("osc_first_resource.go").exists());
        assert!(!dir.path().join("osc_broken_resource.go").exists());
        assert!(dir.path().join("osc_last_resource.go").exists());
    }

    #[test]
    fn test_resource_name_collision() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = StubRenderer { fail_on: vec![] };
        let pipeline = GenerationPipeline::new(&renderer, "", dir.path());

        let report = pipeline.run(&[service("a-b"), service("a_b")]);

        assert_eq!(report.generated.len(), 1);
        assert_eq!(std::fs::read_to_string(&report.generated[0]).unwrap(), "a-b");
        match &report.failed[0].1 {
            GenerateError::Collision { resource_name, first } => {
                assert_eq!(resource_name, "osc_a_b_resource");
                assert_eq!(first, "a-b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failed_descriptor_does_not_claim_resource_name() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = StubRenderer { fail_on: vec!["a-b"] };
        let pipeline = GenerationPipeline::new(&renderer, "", dir.path());

        let report = pipeline.run(&[service("a-b"), service("a_b")]);

        assert_eq!(report.generated, vec![dir.path().join("osc_a_b_resource.go")]);
        assert_eq!(std::fs::read_to_string(&report.generated[0]).unwrap(), "a_b");
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "a-b");
        assert!(matches!(report.failed[0].1, GenerateError::Render(_)));
    }

    #[test]
    fn test_service_filter_and_empty_ids() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = StubRenderer { fail_on: vec![] };
        let pipeline =
            GenerationPipeline::new(&renderer, "", dir.path()).with_services(["encore"]);

        let report = pipeline.run(&[service("encore"), service("other"), service("")]);

        assert!(report.is_success());
        assert_eq!(report.generated, vec![dir.path().join("osc_encore_resource.go")]);
        assert_eq!(report.skipped, vec!["other".to_string(), String::new()]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = StubRenderer { fail_on: vec![] };
        let pipeline = GenerationPipeline::new(&renderer, "", dir.path())
            .with_extension("txt")
            .with_dry_run(true);

        let report = pipeline.run(&[service("encore")]);

        assert_eq!(report.generated, vec![dir.path().join("osc_encore_resource.txt")]);
        assert!(!report.generated[0].exists());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "").unwrap();

        let renderer = StubRenderer { fail_on: vec![] };
        let pipeline = GenerationPipeline::new(&renderer, "", &blocked);
        let report = pipeline.run(&[service("encore")]);

        assert!(matches!(report.failed[0].1, GenerateError::Write { .. }));
    }

    #[test]
    fn test_build_contexts_follow_filter() {
        let services = BTreeSet::from(["encore".to_string()]);
        let contexts = build_contexts(
            &[service("encore"), service("other"), service("")],
            &ParameterFilter::default(),
            &services,
        );
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].resource_name, "osc_encore_resource");

        let all = build_contexts(
            &[service("encore"), service("other")],
            &ParameterFilter::default(),
            &BTreeSet::new(),
        );
        assert_eq!(all.len(), 2);
    }
}
