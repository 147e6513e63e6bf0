//! Generator configuration schema for oscgen.yaml
//!
//! Every section is optional; a missing file means all defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::codegen::parameters::ParameterFilter;
use crate::codegen::render::{CommandRenderer, MiniJinjaRenderer, Renderer, DEFAULT_TEMPLATE};
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "oscgen.yaml";

fn default_base_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("internal/provider")
}

fn default_extension() -> String {
    "go".to_string()
}

fn default_reserved_options() -> Vec<String> {
    vec!["name".to_string()]
}

/// Top-level configuration from oscgen.yaml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub template: TemplateSection,
    #[serde(default)]
    pub filter: FilterSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// File extension of generated files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// minijinja with the built-in Go template; `template.path` is not allowed
    Builtin,
    /// minijinja with `template.path`, or the built-in template when unset
    #[default]
    Minijinja,
    Command,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandSection {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemplateSection {
    /// Template file; the built-in Go template is used when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub renderer: RendererKind,
    #[serde(default)]
    pub command: Option<CommandSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterSection {
    #[serde(default = "default_reserved_options")]
    pub reserved_options: Vec<String>,
    /// Only generate these service ids. Empty means all.
    #[serde(default)]
    pub services: Vec<String>,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            reserved_options: default_reserved_options(),
            services: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document parses as null rather than an empty mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Load `path` if given, otherwise `oscgen.yaml` if it exists, otherwise defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog.base_url cannot be empty".to_string()));
        }

        if self.output.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid("output.extension cannot be empty".to_string()));
        }

        if self.template.renderer == RendererKind::Builtin && self.template.path.is_some() {
            return Err(ConfigError::Invalid(
                "template.path cannot be set for the builtin renderer".to_string(),
            ));
        }

        if self.template.renderer == RendererKind::Command {
            match &self.template.command {
                Some(command) if !command.program.trim().is_empty() => {}
                _ => {
                    return Err(ConfigError::Invalid(
                        "template.command.program is required for the command renderer".to_string(),
                    ))
                }
            }
            if self.template.path.is_none() {
                return Err(ConfigError::Invalid(
                    "template.path is required for the command renderer".to_string(),
                ));
            }
        }

        if let Some(path) = &self.template.path {
            if !path.exists() {
                return Err(ConfigError::Invalid(format!(
                    "Template file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Read the configured template, or return the built-in one
    pub fn load_template(&self) -> Result<String, ConfigError> {
        match (&self.template.path, self.template.renderer) {
            (Some(path), RendererKind::Minijinja | RendererKind::Command) => {
                std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })
            }
            _ => Ok(DEFAULT_TEMPLATE.to_string()),
        }
    }

    pub fn renderer(&self) -> Result<Box<dyn Renderer>, ConfigError> {
        match self.template.renderer {
            RendererKind::Builtin | RendererKind::Minijinja => Ok(Box::new(MiniJinjaRenderer)),
            RendererKind::Command => {
                let command = self.template.command.as_ref().ok_or_else(|| {
                    ConfigError::Invalid(
                        "template.command is required for the command renderer".to_string(),
                    )
                })?;
                Ok(Box::new(CommandRenderer::new(
                    command.program.clone(),
                    command.args.clone(),
                )))
            }
        }
    }

    pub fn parameter_filter(&self) -> ParameterFilter {
        ParameterFilter::with_reserved(self.filter.reserved_options.iter().cloned())
    }
}
