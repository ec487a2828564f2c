//! Wire type mapping for `.proto` fields and SQL columns.

use std::fmt;

/// Import path of the well-known timestamp message.
pub const TIMESTAMP_IMPORT: &str = "google/protobuf/timestamp.proto";

/// Fully qualified name of the well-known timestamp message.
pub const TIMESTAMP_TYPE: &str = "google.protobuf.Timestamp";

/// Alias the generated persistence layer uses for timestamps.
pub const DB_TIMESTAMP_ALIAS: &str = "db.Timestamp";

/// The closed set of wire types a column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Int32,
    Int64,
    String,
    Timestamp,
    Double,
    Float,
    Bytes,
    Bool,
}

impl WireType {
    pub const ALL: [WireType; 8] = [
        WireType::Int32,
        WireType::Int64,
        WireType::String,
        WireType::Timestamp,
        WireType::Double,
        WireType::Float,
        WireType::Bytes,
        WireType::Bool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WireType::Int32 => "int32",
            WireType::Int64 => "int64",
            WireType::String => "string",
            WireType::Timestamp => TIMESTAMP_TYPE,
            WireType::Double => "double",
            WireType::Float => "float",
            WireType::Bytes => "bytes",
            WireType::Bool => "bool",
        }
    }

    /// Import a schema using this type must declare, if any.
    pub fn required_import(self) -> Option<&'static str> {
        match self {
            WireType::Timestamp => Some(TIMESTAMP_IMPORT),
            _ => None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a `.proto` field type to the type name used in generated code.
///
/// Everything except the well-known timestamp passes through unchanged.
pub fn map_wire_type(raw: &str) -> &str {
    if raw == TIMESTAMP_TYPE {
        DB_TIMESTAMP_ALIAS
    } else {
        raw
    }
}

/// Map a declared SQL column type to its wire type.
///
/// Matching is case-insensitive on the leading word, so `varchar(255)`,
/// `BIGINT UNSIGNED` and `DOUBLE PRECISION` resolve by `VARCHAR`, `BIGINT`
/// and `DOUBLE`. PostgreSQL aliases such as `int8`, `serial4` and `float8`
/// land in the same buckets as their spelled-out forms. Unknown types map to
/// [`WireType::String`].
pub fn map_column_type(sql_type: &str) -> WireType {
    let head = sql_type
        .trim()
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();

    match head.as_str() {
        "BIT" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "INT2" | "INT4"
        | "SERIAL" | "SMALLSERIAL" | "SERIAL2" | "SERIAL4" => WireType::Int32,
        "BIGINT" | "INT8" | "BIGSERIAL" | "SERIAL8" => WireType::Int64,
        "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" => WireType::String,
        "DATE" | "DATETIME" | "TIME" | "TIMESTAMP" => WireType::Timestamp,
        "DECIMAL" | "NUMERIC" | "DOUBLE" | "FLOAT8" => WireType::Double,
        "REAL" | "FLOAT" | "FLOAT4" => WireType::Float,
        "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BYTEA" | "BINARY" | "VARBINARY"
        | "JSON" | "JSONB" => WireType::Bytes,
        "BOOL" | "BOOLEAN" => WireType::Bool,
        _ => WireType::String,
    }
}
