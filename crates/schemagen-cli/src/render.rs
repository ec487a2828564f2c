//! Template rendering with Tera
//!
//! Templates are `.tpl` files under the template root, registered under their
//! relative path (`user/handler.go.tpl`) so `{% include %}` and
//! `{% extends %}` can reference one another. Autoescaping is off; output is
//! source code, not HTML.

mod engine;
mod helpers;

pub use engine::{RenderError, TemplateEngine, template_name};
pub use helpers::{register_filters, register_functions};
