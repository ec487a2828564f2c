//! The schema IR handed to templates.
//!
//! A [`SchemaModel`] is populated once per run by the
//! [`IrBuilder`](crate::IrBuilder) and is read-only afterwards. Field names
//! serialize in snake_case, which is how templates address them
//! (`services`, `messages`, `api.path_params`, `field.type`, ...).

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

/// The intermediate representation for one generator run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaModel {
    services: Vec<Service>,
    messages: Vec<Message>,
    #[serde(skip)]
    message_index: HashMap<String, usize>,
    imports: BTreeSet<String>,
    /// Run-level package, used for outputs whose directory gives no name.
    pub package: String,
    pub project: String,
    pub service_name: String,
}

impl SchemaModel {
    pub fn new(project: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            service_name: service_name.into(),
            ..Self::default()
        }
    }

    /// Services in declaration order across all ingested sources.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Messages in first-declaration order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Imports required by mapped types, sorted.
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// Look up a message by name.
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.message_index.get(name).map(|&i| &self.messages[i])
    }

    /// Add a message unless one with the same name was added before.
    ///
    /// Returns `false` when the message was ignored as a duplicate.
    pub fn add_message(&mut self, message: Message) -> bool {
        if self.message_index.contains_key(&message.name) {
            return false;
        }
        self.message_index
            .insert(message.name.clone(), self.messages.len());
        self.messages.push(message);
        true
    }

    pub fn add_service(&mut self, service: Service) {
        self.services.push(service);
    }

    /// Record an import path. Returns `false` if it was already present.
    pub fn add_import(&mut self, path: impl Into<String>) -> bool {
        self.imports.insert(path.into())
    }
}

/// A message (or table) definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A message field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    /// Raw schema type for `.proto` input, mapped wire type for SQL input.
    #[serde(rename = "type")]
    pub ty: String,
    pub repeated: bool,
}

/// A service and its HTTP-bound calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub apis: Vec<Api>,
}

/// One rpc annotation turned into an HTTP binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Api {
    pub name: String,
    pub request_type: String,
    pub returns_type: String,
    /// Lowercase HTTP verb, empty if the annotation carried none.
    pub method: String,
    /// Route with `{name}` placeholders rewritten to `:name`.
    pub path: String,
    pub body: String,
    pub path_params: Vec<String>,
}
