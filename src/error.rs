//! Error types for catalog access, configuration, rendering and generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching or decoding the service catalog.
///
/// Any of these aborts the run before a single file is generated.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("catalog request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("catalog response is not a valid service list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid bearer credential: {0}")]
    Credential(String),
}

/// Errors raised while loading or validating generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing environment variable {0}")]
    MissingCredential(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Errors raised by a [`Renderer`](crate::codegen::render::Renderer).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to run renderer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer `{program}` exited with {status}: {stderr}")]
    Process {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("renderer output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to stage renderer input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abandon the generation of a single descriptor.
///
/// The pipeline records these and moves on to the next descriptor.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to serialize render context: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("resource name `{resource_name}` already generated for service `{first}`")]
    Collision {
        resource_name: String,
        first: String,
    },
}
