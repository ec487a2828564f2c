//! schemagen-schema - Schema source readers
//!
//! This crate turns raw schema text into declaration trees consumed by the
//! schemagen IR builder:
//! - [`proto::parse_proto`] for protocol buffer IDL files (`.proto`)
//! - [`sql::parse_ddl`] for relational `CREATE TABLE` scripts (`.sql`)
//!
//! Both readers share the tokenizer in [`lexer`] and report failures as a
//! [`ParseError`] carrying the line and column of the offending token.

mod error;
pub mod lexer;
pub mod proto;
pub mod sql;

pub use error::{ParseError, ParseResult};
pub use proto::{Literal, LiteralMap, ProtoFile, parse_proto};
pub use sql::{Column, Table, parse_ddl};
