//! schemagen-core - Schema IR and the transformations feeding code templates
//!
//! This crate holds the decision logic of the generator:
//! - [`SchemaModel`], the intermediate representation handed to templates
//! - [`IrBuilder`] for populating the model from `.proto` files or SQL tables
//! - [`route`] for deriving HTTP method, path and body from rpc annotations
//! - [`naming`] and [`types`] for identifier casing and wire type mapping
//! - [`GenerationContext`] and [`Counter`] for the render-time surface
//! - [`GeneratorConfig`] for run configuration

mod builder;
mod config;
mod context;
mod counter;
mod error;
mod model;
pub mod naming;
pub mod route;
pub mod types;

pub use builder::IrBuilder;
pub use config::{GeneratorConfig, SchemaKind, TEMPLATE_EXTENSION};
pub use context::{ContextView, GenerationContext, package_for};
pub use counter::Counter;
pub use error::{SchemaGenError, SchemaGenResult};
pub use model::{Api, Field, Message, SchemaModel, Service};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Api, Counter, Field, GenerationContext, GeneratorConfig, IrBuilder, Message, SchemaKind,
        SchemaModel, Service,
    };
}
