//! Tera engine wrapper bound to one generation run.

use std::path::{Path, PathBuf};

use schemagen_core::{ContextView, GenerationContext, TEMPLATE_EXTENSION};
use tera::{Context, Tera};

use super::helpers;
use crate::scan::{DiscoveredFile, ScanError, Scanner};

/// All templates of a run, compiled, with helpers registered.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
    templates: Vec<DiscoveredFile>,
}

impl TemplateEngine {
    /// Discover and compile every template under `template_dir`.
    ///
    /// Helper functions are bound to `context`, so counters and message
    /// lookups are scoped to this run.
    pub fn load(template_dir: &Path, context: &GenerationContext<'_>) -> Result<Self, RenderError> {
        let templates = Scanner::new(template_dir, TEMPLATE_EXTENSION).scan()?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        helpers::register_filters(&mut tera);
        helpers::register_functions(&mut tera, context);

        let files: Vec<(PathBuf, Option<String>)> = templates
            .iter()
            .map(|t| (t.path.clone(), Some(template_name(&t.relative_path))))
            .collect();
        tera.add_template_files(files)
            .map_err(|e| RenderError::Load {
                dir: template_dir.to_path_buf(),
                source: e,
            })?;

        Ok(Self { tera, templates })
    }

    /// Build an engine from in-memory templates, keyed by relative path.
    pub fn from_raw(
        templates: &[(&str, &str)],
        context: &GenerationContext<'_>,
    ) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        helpers::register_filters(&mut tera);
        helpers::register_functions(&mut tera, context);
        tera.add_raw_templates(templates.to_vec())
            .map_err(|e| RenderError::Load {
                dir: PathBuf::new(),
                source: e,
            })?;

        let templates = templates
            .iter()
            .map(|(name, _)| DiscoveredFile {
                path: PathBuf::from(name),
                relative_path: PathBuf::from(name),
            })
            .collect();

        Ok(Self { tera, templates })
    }

    /// Templates in render order.
    pub fn templates(&self) -> &[DiscoveredFile] {
        &self.templates
    }

    /// Render one template against a context view.
    pub fn render(&self, name: &str, view: &ContextView<'_>) -> Result<String, RenderError> {
        let context = Context::from_serialize(view).map_err(|e| RenderError::Render {
            template: name.to_string(),
            source: e,
        })?;

        self.tera
            .render(name, &context)
            .map_err(|e| RenderError::Render {
                template: name.to_string(),
                source: e,
            })
    }
}

/// Registered name of a template: its relative path with `/` separators.
pub fn template_name(relative_path: &Path) -> String {
    relative_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to load templates from {}: {source}", dir.display())]
    Load { dir: PathBuf, source: tera::Error },

    #[error("failed to render template '{template}': {source}")]
    Render {
        template: String,
        source: tera::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
