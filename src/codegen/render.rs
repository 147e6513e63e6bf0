//! Template renderers.
//!
//! A [`Renderer`] turns a serialized [`ResourceRenderContext`] and a template
//! into source text. Rendering happens either in-process with minijinja or by
//! running an external templating tool.
//!
//! [`ResourceRenderContext`]: crate::codegen::types::ResourceRenderContext

use std::io::Write;
use std::process::{Command, Stdio};

use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;

use crate::error::RenderError;

/// Built-in template producing a Terraform plugin framework resource in Go.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/resource.go.j2");

/// Placeholder replaced by the path of the serialized context file.
pub const CONTEXT_PLACEHOLDER: &str = "{context}";
/// Placeholder replaced by the path of the template file.
pub const TEMPLATE_PLACEHOLDER: &str = "{template}";

/// Renders a context with a template.
///
/// Implementations must not depend on which other renderer is in use; the
/// pipeline only sees this trait.
pub trait Renderer {
    fn render(&self, context: &Value, template: &str) -> Result<String, RenderError>;
}

/// In-process renderer backed by minijinja.
///
/// Context fields are exposed as top-level template variables. Referencing a
/// variable the context does not define is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaRenderer;

impl Renderer for MiniJinjaRenderer {
    fn render(&self, context: &Value, template: &str) -> Result<String, RenderError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Ok(env.render_str(template, context)?)
    }
}

/// Renderer that shells out to an external templating tool.
///
/// The context is written to a temporary `.json` file and the template to a
/// temporary file. Their paths replace `{context}` and `{template}` in `args`.
/// When `args` has no `{context}` the path is appended; when it has no
/// `{template}` the template is written to the process's stdin instead.
/// Whatever the tool prints on stdout is the rendered text.
///
/// ```ignore
/// // gomplate -c .=/tmp/ctx.json -f /tmp/tmpl
/// let renderer = CommandRenderer::new("gomplate", ["-c", ".={context}", "-f", "{template}"]);
/// ```
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandRenderer {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn uses(&self, placeholder: &str) -> bool {
        self.args.iter().any(|arg| arg.contains(placeholder))
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, context: &Value, template: &str) -> Result<String, RenderError> {
        let mut context_file = tempfile::Builder::new()
            .prefix("oscgen-context-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(&mut context_file, context)
            .map_err(|e| RenderError::Io(e.into()))?;
        context_file.flush()?;
        let context_path = context_file.path().display().to_string();

        let template_on_stdin = !self.uses(TEMPLATE_PLACEHOLDER);
        let template_file = if template_on_stdin {
            None
        } else {
            let mut file = tempfile::Builder::new().prefix("oscgen-template-").tempfile()?;
            file.write_all(template.as_bytes())?;
            file.flush()?;
            Some(file)
        };
        let template_path = template_file
            .as_ref()
            .map(|f| f.path().display().to_string())
            .unwrap_or_default();

        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace(CONTEXT_PLACEHOLDER, &context_path)
                    .replace(TEMPLATE_PLACEHOLDER, &template_path)
            })
            .collect();
        if !self.uses(CONTEXT_PLACEHOLDER) {
            args.push(context_path.clone());
        }

        tracing::debug!("Running renderer: {} {}", self.program, args.join(" "));

        let spawn_error = |source| RenderError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(if template_on_stdin { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            // A tool that never reads stdin may exit first.
            match stdin.write_all(template.as_bytes()) {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(spawn_error(e)),
                _ => {}
            }
        }

        let output = child.wait_with_output().map_err(spawn_error)?;

        if !output.status.success() {
            return Err(RenderError::Process {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
