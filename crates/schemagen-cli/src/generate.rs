//! The generation pipeline: ingest every schema source, then render every
//! template once.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use schemagen_core::{GenerationContext, GeneratorConfig, IrBuilder, SchemaKind, SchemaModel};

use crate::render::{RenderError, TemplateEngine, template_name};
use crate::scan::Scanner;

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Schema sources ingested, in order.
    pub sources: Vec<PathBuf>,
    /// Files written, in order.
    pub written: Vec<PathBuf>,
}

/// Run the full pipeline for `kind` with `config`.
pub fn run(kind: SchemaKind, config: &GeneratorConfig) -> Result<GenerateReport> {
    let (model, sources) = build_model(kind, config)?;
    let written = render_all(&model, config)?;
    Ok(GenerateReport { sources, written })
}

/// Parse every source under the schema root into one model.
///
/// The first source that fails to read or parse aborts the run.
pub fn build_model(
    kind: SchemaKind,
    config: &GeneratorConfig,
) -> Result<(SchemaModel, Vec<PathBuf>)> {
    let files = Scanner::new(&config.schema_dir, kind.extension()).scan()?;
    let mut builder =
        IrBuilder::new(&config.project, &config.service_name).with_package(&config.package);
    let mut sources = Vec::with_capacity(files.len());

    for file in files {
        tracing::info!("Reading {}", file.path.display());
        let source = fs::read_to_string(&file.path)
            .with_context(|| format!("failed to read {}", file.path.display()))?;

        match kind {
            SchemaKind::Proto => builder.ingest_proto_source(&file.path, &source)?,
            SchemaKind::Sql => builder.ingest_sql_source(&file.path, &source)?,
        }
        sources.push(file.path);
    }

    Ok((builder.finish(), sources))
}

/// Render each template under the template root into the output root.
pub fn render_all(model: &SchemaModel, config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    let context = GenerationContext::new(model);
    let engine = TemplateEngine::load(&config.template_dir, &context)?;
    let mut written = Vec::with_capacity(engine.templates().len());

    for template in engine.templates() {
        let destination = output_path(&config.output_dir, &template.relative_path);
        let view = context.view_for(&destination);
        tracing::debug!(
            "Rendering {} with package '{}'",
            template.relative_path.display(),
            view.package
        );

        let content = engine.render(&template_name(&template.relative_path), &view)?;
        write_output(&destination, &content)?;
        tracing::info!("Wrote {}", destination.display());
        written.push(destination);
    }

    Ok(written)
}

/// Destination of a template: its relative path minus `.tpl`, under `output_dir`.
pub fn output_path(output_dir: &Path, relative_template: &Path) -> PathBuf {
    output_dir.join(relative_template.with_extension(""))
}

fn write_output(path: &Path, content: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RenderError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| RenderError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
