//! Protocol buffer IDL declarations.
//!
//! [`parse_proto`] turns a `.proto` source into a [`ProtoFile`] tree. The tree
//! keeps declaration order everywhere, and option values keep their raw
//! source text so callers can interpret custom annotations such as
//! `option (google.api.http) = { get: "/v1/users/{id}" };` themselves.
//!
//! # Example
//!
//! ```
//! use schemagen_schema::proto::parse_proto;
//!
//! let file = parse_proto(r#"
//!     syntax = "proto3";
//!     message User { string id = 1; }
//! "#).unwrap();
//!
//! assert_eq!(file.messages[0].name, "User");
//! ```

mod parser;

pub use parser::parse_proto;

/// A parsed `.proto` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtoFile {
    /// Value of `syntax = "..."` or `edition = "..."`, if declared.
    pub syntax: Option<String>,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    pub options: Vec<ProtoOption>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
    pub services: Vec<Service>,
    pub extends: Vec<Extend>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: String,
    /// `public` or `weak`, if given.
    pub kind: Option<String>,
}

/// `option name = constant;` or a bracketed field option.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoOption {
    /// Option name as written, e.g. `deprecated` or `(google.api.http)`.
    pub name: String,
    pub constant: Literal,
}

/// An option value.
///
/// Scalars carry their text in `source`; string literals are unquoted and
/// flagged with `is_string`. Aggregates (`{ key: value }`) fill `map` and
/// lists (`[a, b]`) fill `array`, leaving `source` empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Literal {
    pub source: String,
    pub is_string: bool,
    pub map: LiteralMap,
    pub array: Vec<Literal>,
}

impl Literal {
    pub fn scalar(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn string(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            is_string: true,
            ..Self::default()
        }
    }
}

/// Ordered key/value entries of an aggregate option value.
///
/// Keys may repeat (text format allows repeated fields); lookups return the
/// first entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralMap {
    entries: Vec<(String, Literal)>,
}

impl LiteralMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Literal) {
        self.entries.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Literal)> for LiteralMap {
    fn from_iter<I: IntoIterator<Item = (K, Literal)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub name: String,
    pub elements: Vec<MessageElement>,
}

/// Anything that may appear inside a message body.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageElement {
    Field(NormalField),
    Map(MapField),
    Oneof(Oneof),
    Group(Group),
    Message(Message),
    Enum(Enum),
    Extend(Extend),
    Option(ProtoOption),
    Reserved(Vec<String>),
    Extensions(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Optional,
    Required,
    Repeated,
}

/// A scalar or message-typed field: `repeated string tags = 3;`
#[derive(Debug, Clone, PartialEq)]
pub struct NormalField {
    pub name: String,
    /// Type as written, e.g. `string` or `google.protobuf.Timestamp`.
    pub ty: String,
    pub number: String,
    pub label: Option<Label>,
    pub options: Vec<ProtoOption>,
}

impl NormalField {
    pub fn repeated(&self) -> bool {
        self.label == Some(Label::Repeated)
    }
}

/// `map<string, Project> projects = 4;`
#[derive(Debug, Clone, PartialEq)]
pub struct MapField {
    pub name: String,
    pub key_type: String,
    pub value_type: String,
    pub number: String,
    pub options: Vec<ProtoOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Oneof {
    pub name: String,
    pub fields: Vec<NormalField>,
    pub options: Vec<ProtoOption>,
}

/// Legacy proto2 group: a field and a nested message in one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub number: String,
    pub label: Option<Label>,
    pub elements: Vec<MessageElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub options: Vec<ProtoOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub number: String,
    pub options: Vec<ProtoOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extend {
    pub target: String,
    pub fields: Vec<NormalField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub name: String,
    pub rpcs: Vec<Rpc>,
    pub options: Vec<ProtoOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rpc {
    pub name: String,
    pub request_type: String,
    pub streams_request: bool,
    pub returns_type: String,
    pub streams_returns: bool,
    /// Options declared in the rpc body, in order.
    pub options: Vec<ProtoOption>,
}

impl ProtoFile {
    /// Visit every message, nested ones included, parent before children.
    pub fn walk_messages<'a>(&'a self, mut visit: impl FnMut(&'a Message)) {
        fn walk<'a>(elements: &'a [MessageElement], visit: &mut impl FnMut(&'a Message)) {
            for element in elements {
                if let MessageElement::Message(nested) = element {
                    visit(nested);
                    walk(&nested.elements, visit);
                }
            }
        }

        for message in &self.messages {
            visit(message);
            walk(&message.elements, &mut visit);
        }
    }
}
