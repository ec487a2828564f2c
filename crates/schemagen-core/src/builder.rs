//! Populates the [`SchemaModel`] from parsed schema sources.

use std::path::Path;

use schemagen_schema::proto::{self, MessageElement, ProtoFile};
use schemagen_schema::{Table, parse_ddl, parse_proto};

use crate::error::{SchemaGenError, SchemaGenResult};
use crate::model::{Api, Field, Message, SchemaModel, Service};
use crate::route::{extract_body, extract_route};
use crate::types::map_column_type;

/// Owns the model while sources are ingested.
///
/// Ingestion is the only phase that mutates the model. Call
/// [`finish`](IrBuilder::finish) once every source is in and hand the model
/// to the renderer.
#[derive(Debug, Default)]
pub struct IrBuilder {
    model: SchemaModel,
}

impl IrBuilder {
    pub fn new(project: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            model: SchemaModel::new(project, service_name),
        }
    }

    /// Set the run-level package name.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.model.package = package.into();
        self
    }

    /// Parse and ingest one `.proto` source.
    pub fn ingest_proto_source(&mut self, path: &Path, source: &str) -> SchemaGenResult<()> {
        let file = parse_proto(source).map_err(|e| SchemaGenError::parse(path, e))?;
        self.ingest_proto(&file);
        Ok(())
    }

    /// Parse and ingest one SQL DDL script.
    pub fn ingest_sql_source(&mut self, path: &Path, source: &str) -> SchemaGenResult<()> {
        let tables = parse_ddl(source).map_err(|e| SchemaGenError::parse(path, e))?;
        self.ingest_tables(&tables);
        Ok(())
    }

    /// Add the messages and services of a parsed `.proto` file.
    pub fn ingest_proto(&mut self, file: &ProtoFile) {
        file.walk_messages(|message| {
            let converted = convert_message(message);
            if !self.model.add_message(converted) {
                tracing::debug!("Skipping duplicate message {}", message.name);
            }
        });

        for service in &file.services {
            self.model.add_service(convert_service(service));
        }
    }

    /// Add one message per table, mapping column types to wire types.
    pub fn ingest_tables(&mut self, tables: &[Table]) {
        for table in tables {
            let mut fields = Vec::with_capacity(table.columns.len());
            for column in &table.columns {
                let wire = map_column_type(&column.sql_type);
                if let Some(import) = wire.required_import() {
                    self.model.add_import(import);
                }
                fields.push(Field {
                    name: column.name.clone(),
                    ty: wire.as_str().to_string(),
                    repeated: false,
                });
            }

            let message = Message {
                name: table.name.clone(),
                fields,
            };
            if !self.model.add_message(message) {
                tracing::debug!("Skipping duplicate table {}", table.name);
            }
        }
    }

    pub fn model(&self) -> &SchemaModel {
        &self.model
    }

    /// Consume the builder, yielding the finished model.
    pub fn finish(self) -> SchemaModel {
        self.model
    }
}

fn convert_message(message: &proto::Message) -> Message {
    let mut fields = Vec::new();
    for element in &message.elements {
        match element {
            MessageElement::Field(field) => fields.push(Field {
                name: field.name.clone(),
                ty: field.ty.clone(),
                repeated: field.repeated(),
            }),
            MessageElement::Map(map) => {
                tracing::debug!("Skipping map field {}.{}", message.name, map.name);
            }
            MessageElement::Oneof(oneof) => {
                tracing::debug!("Skipping oneof {}.{}", message.name, oneof.name);
            }
            MessageElement::Group(group) => {
                tracing::debug!("Skipping group {}.{}", message.name, group.name);
            }
            _ => {}
        }
    }

    Message {
        name: message.name.clone(),
        fields,
    }
}

/// One API per rpc option, whether or not it carries a method key.
fn convert_service(service: &proto::Service) -> Service {
    let mut apis = Vec::new();
    for rpc in &service.rpcs {
        for option in &rpc.options {
            let annotations = &option.constant.map;
            let route = extract_route(annotations);
            if route.is_unbound() {
                tracing::debug!(
                    "Option {} on {}.{} has no HTTP method",
                    option.name,
                    service.name,
                    rpc.name
                );
            }

            apis.push(Api {
                name: rpc.name.clone(),
                request_type: rpc.request_type.clone(),
                returns_type: rpc.returns_type.clone(),
                method: route.method,
                path: route.path,
                body: extract_body(annotations),
                path_params: route.path_params,
            });
        }
    }

    Service {
        name: service.name.clone(),
        apis,
    }
}
