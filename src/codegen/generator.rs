//! Write generated artifacts to disk
//!
//! Each [`GenerateParam`] describes one artifact kind. For every table the
//! artifact lands at `<output_dir>/<package_name>/<table>_<name>.go`. The
//! first failure aborts the run; files already written are left in place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use tracing::{debug, info};

use super::go_writer::{render_const, render_model};
use super::params::{build_template_params, ParamOptions, TemplateParams};
use crate::error::MetaCenterError;
use crate::model::Table;
use crate::types::DataTypeGetter;

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "./default";

/// Built-in artifact names
pub const ARTIFACT_CONST: &str = "const";
pub const ARTIFACT_MODEL: &str = "model";

/// One artifact to generate for every table
#[derive(Debug, Clone, Default)]
pub struct GenerateParam {
    /// Artifact name, used as the output file suffix
    pub name: String,
    /// User template; built-in renderers are used when absent
    pub template: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub inject_params: BTreeMap<String, String>,
    /// Command run on each written file, with the file path appended
    pub formatter: Option<String>,
}

impl GenerateParam {
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Validate and fill defaults
    pub fn normalize(&mut self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MetaCenterError::InvalidGenerateParam {
                message: "artifact name cannot be empty".to_string(),
            }
            .into());
        }
        if self.output_dir.as_os_str().is_empty() {
            self.output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
        }
        Ok(())
    }

    /// Path of the artifact for a table with the given package name
    pub fn output_path(&self, package_name: &str, table_name: &str) -> PathBuf {
        self.output_dir
            .join(package_name)
            .join(format!("{}_{}.go", table_name, self.name))
    }
}

/// How one artifact turns parameters into text
enum Renderer {
    Const,
    Model,
    Template { source: String },
}

impl Renderer {
    fn for_param(param: &GenerateParam) -> Result<Self> {
        if let Some(path) = &param.template {
            let source =
                std::fs::read_to_string(path).map_err(|e| MetaCenterError::TemplateRender {
                    name: param.name.clone(),
                    message: format!("cannot read template {}: {}", path.display(), e),
                })?;
            return Ok(Renderer::Template { source });
        }
        match param.name.as_str() {
            ARTIFACT_CONST => Ok(Renderer::Const),
            ARTIFACT_MODEL => Ok(Renderer::Model),
            other => Err(MetaCenterError::UnknownArtifact {
                name: other.to_string(),
            }
            .into()),
        }
    }

    fn render(&self, name: &str, params: &TemplateParams) -> Result<String> {
        match self {
            Renderer::Const => Ok(render_const(params)),
            Renderer::Model => Ok(render_model(params)),
            Renderer::Template { source } => render_template(name, source, params),
        }
    }
}

/// Render a tera template over serialized parameters
pub fn render_template(name: &str, source: &str, params: &TemplateParams) -> Result<String> {
    let context = tera::Context::from_serialize(params).map_err(|e| {
        MetaCenterError::TemplateRender {
            name: name.to_string(),
            message: error_chain(&e),
        }
    })?;
    let mut tera = tera::Tera::default();
    let rendered = tera
        .render_str(source, &context)
        .map_err(|e| MetaCenterError::TemplateRender {
            name: name.to_string(),
            message: error_chain(&e),
        })?;
    Ok(rendered)
}

/// Tera keeps the useful detail in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

/// Generate every artifact for every table and return the written paths
pub fn generate_files(
    tables: &[Table],
    params: &[GenerateParam],
    types: &dyn DataTypeGetter,
    options: &ParamOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for param in params {
        let mut param = param.clone();
        param.normalize()?;
        let renderer = Renderer::for_param(&param)?;

        let mut param_options = options.clone();
        param_options
            .inject_params
            .extend(param.inject_params.clone());

        for table in tables {
            let tpl_params = build_template_params(table, types, &param_options);
            let path = param.output_path(&tpl_params.package_name, &table.name);
            let content = renderer.render(&param.name, &tpl_params)?;
            write_artifact(&path, &content)?;

            if let Some(command) = &param.formatter {
                run_formatter(command, &path)?;
            }

            info!(
                artifact = %param.name,
                table = %table.name,
                path = %path.display(),
                "Generated artifact"
            );
            written.push(path);
        }
    }

    Ok(written)
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MetaCenterError::ArtifactWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| MetaCenterError::ArtifactWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Run an external formatter such as `gofmt -w` on a written file
pub fn run_formatter(command: &str, path: &Path) -> Result<()> {
    let formatter_error = |message: String| MetaCenterError::Formatter {
        command: command.to_string(),
        path: path.to_path_buf(),
        message,
    };

    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| formatter_error("empty command".to_string()))?;

    debug!(command, path = %path.display(), "Running formatter");
    let output = Command::new(program)
        .args(parts)
        .arg(path)
        .output()
        .map_err(|e| formatter_error(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(formatter_error(format!("{}: {}", output.status, stderr.trim())).into());
    }
    Ok(())
}
