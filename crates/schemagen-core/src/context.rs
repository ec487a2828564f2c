//! The data surface templates render against.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use crate::counter::Counter;
use crate::model::{Message, SchemaModel, Service};

/// Finished model plus the per-run counter, shared by every template render.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    model: &'a SchemaModel,
    counter: Counter,
}

impl<'a> GenerationContext<'a> {
    pub fn new(model: &'a SchemaModel) -> Self {
        Self {
            model,
            counter: Counter::new(),
        }
    }

    pub fn model(&self) -> &'a SchemaModel {
        self.model
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    /// View for the template writing to `destination`.
    ///
    /// `package` is recomputed from the destination on every call. When the
    /// destination's directory has no name, the model's package is used.
    pub fn view_for(&self, destination: &Path) -> ContextView<'a> {
        let model = self.model;
        let mut package = package_for(destination);
        if package.is_empty() {
            package = model.package.clone();
        }
        ContextView {
            services: model.services(),
            messages: model.messages(),
            message_index: model
                .messages()
                .iter()
                .map(|m| (m.name.as_str(), m))
                .collect(),
            imports: model.imports(),
            package,
            project: &model.project,
            service_name: &model.service_name,
        }
    }
}

/// Serializable snapshot handed to the template engine.
#[derive(Debug, Clone, Serialize)]
pub struct ContextView<'a> {
    pub services: &'a [Service],
    pub messages: &'a [Message],
    pub message_index: BTreeMap<&'a str, &'a Message>,
    pub imports: &'a BTreeSet<String>,
    pub package: String,
    pub project: &'a str,
    pub service_name: &'a str,
}

/// Name of the directory containing `destination`, or empty at the root.
pub fn package_for(destination: &Path) -> String {
    destination
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
