//! schemagen-cli - Template-driven code generation from schemas
//!
//! The pipeline reads every schema source under the schema root into one
//! [`SchemaModel`](schemagen_core::SchemaModel), then renders each `.tpl`
//! template under the template root to the matching path under the output
//! root.
//!
//! - [`args`]: command-line surface
//! - [`scan`]: recursive file discovery
//! - [`render`]: Tera engine and template helpers
//! - [`generate`]: the ingest-then-render pipeline

pub mod args;
pub mod generate;
pub mod render;
pub mod scan;

pub use args::{Cli, Commands, GenerateArgs};
pub use generate::{GenerateReport, run};
