#![allow(non_snake_case)]

use super::*;

const USER_PROTO: &str = r#"
syntax = "proto3";

package acme.users.v1;

import "google/api/annotations.proto";
import public "google/protobuf/timestamp.proto";

option go_package = "github.com/acme/users";

// A user account.
message User {
    string id = 1;
    string name = 2 [deprecated = true];
    repeated string tags = 3;
    google.protobuf.Timestamp created_at = 4;
    map<string, string> labels = 5;
    oneof contact {
        string email = 6;
        string phone = 7;
    }
    reserved 8, 10 to 12, "legacy";
}

enum Role {
    ROLE_UNSPECIFIED = 0;
    ROLE_ADMIN = 1 [deprecated = true];
}

service UserService {
    option (acme.service_tag) = "users";

    rpc GetUser (GetUserRequest) returns (User) {
        option (google.api.http) = {
            get: "/users/{id}"
        };
    }

    rpc WatchUsers (stream WatchRequest) returns (stream User);
}
"#;

#[test]
fn parse_proto___header___captures_syntax_package_and_imports() {
    let file = parse_proto(USER_PROTO).unwrap();

    assert_eq!(file.syntax.as_deref(), Some("proto3"));
    assert_eq!(file.package.as_deref(), Some("acme.users.v1"));
    assert_eq!(file.imports.len(), 2);
    assert_eq!(file.imports[1].path, "google/protobuf/timestamp.proto");
    assert_eq!(file.imports[1].kind.as_deref(), Some("public"));
    assert_eq!(file.options[0].name, "go_package");
    assert_eq!(file.options[0].constant.source, "github.com/acme/users");
    assert!(file.options[0].constant.is_string);
}

#[test]
fn parse_proto___message___keeps_element_order_and_kinds() {
    let file = parse_proto(USER_PROTO).unwrap();
    let user = &file.messages[0];

    assert_eq!(user.name, "User");
    assert!(matches!(user.elements[0], MessageElement::Field(_)));
    assert!(matches!(user.elements[4], MessageElement::Map(_)));
    assert!(matches!(user.elements[5], MessageElement::Oneof(_)));
    assert!(matches!(user.elements[6], MessageElement::Reserved(_)));
}

#[test]
fn parse_proto___normal_fields___carry_type_label_and_options() {
    let file = parse_proto(USER_PROTO).unwrap();
    let fields: Vec<&NormalField> = file.messages[0]
        .elements
        .iter()
        .filter_map(|e| match e {
            MessageElement::Field(f) => Some(f),
            _ => None,
        })
        .collect();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[1].options[0].name, "deprecated");
    assert_eq!(fields[1].options[0].constant.source, "true");
    assert!(fields[2].repeated());
    assert!(!fields[0].repeated());
    assert_eq!(fields[3].ty, "google.protobuf.Timestamp");
    assert_eq!(fields[3].number, "4");
}

#[test]
fn parse_proto___reserved___splits_entries_on_commas() {
    let file = parse_proto(USER_PROTO).unwrap();
    let MessageElement::Reserved(entries) = &file.messages[0].elements[6] else {
        panic!("expected reserved");
    };

    assert_eq!(entries, &vec!["8", "10 to 12", "legacy"]);
}

#[test]
fn parse_proto___enum___collects_values() {
    let file = parse_proto(USER_PROTO).unwrap();

    assert_eq!(file.enums[0].name, "Role");
    assert_eq!(file.enums[0].values.len(), 2);
    assert_eq!(file.enums[0].values[1].name, "ROLE_ADMIN");
    assert_eq!(file.enums[0].values[1].number, "1");
}

#[test]
fn parse_proto___service___parses_rpcs_and_http_option() {
    let file = parse_proto(USER_PROTO).unwrap();
    let service = &file.services[0];

    assert_eq!(service.name, "UserService");
    assert_eq!(service.options[0].name, "(acme.service_tag)");
    assert_eq!(service.rpcs.len(), 2);

    let get_user = &service.rpcs[0];
    assert_eq!(get_user.request_type, "GetUserRequest");
    assert_eq!(get_user.returns_type, "User");
    assert_eq!(get_user.options[0].name, "(google.api.http)");
    let get = get_user.options[0].constant.map.get("get").unwrap();
    assert_eq!(get.source, "/users/{id}");
    assert!(get.is_string);
}

#[test]
fn parse_proto___streaming_rpc___sets_stream_flags() {
    let file = parse_proto(USER_PROTO).unwrap();
    let watch = &file.services[0].rpcs[1];

    assert!(watch.streams_request);
    assert!(watch.streams_returns);
    assert_eq!(watch.request_type, "WatchRequest");
    assert!(watch.options.is_empty());
}

#[test]
fn parse_proto___aggregate_option___keeps_key_order_and_nesting() {
    let source = r#"
        service S {
            rpc Create (Req) returns (Resp) {
                option (google.api.http) = {
                    post: "/v1/items",
                    body: "*";
                    additional_bindings { put: "/v1/items/{id}" }
                };
                option deprecated = true;
            }
        }
    "#;

    let file = parse_proto(source).unwrap();
    let rpc = &file.services[0].rpcs[0];
    let http = &rpc.options[0].constant.map;

    let keys: Vec<&str> = http.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["post", "body", "additional_bindings"]);
    assert_eq!(http.get("body").unwrap().source, "*");
    let nested = &http.get("additional_bindings").unwrap().map;
    assert_eq!(nested.get("put").unwrap().source, "/v1/items/{id}");
    assert_eq!(rpc.options[1].name, "deprecated");
}

#[test]
fn parse_proto___list_and_signed_constants___are_parsed() {
    let source = r#"
        option (tags) = ["a", "b"];
        option (offset) = -5;
        option (ratio) = 1.5;
        option (mode) = FAST;
    "#;

    let file = parse_proto(source).unwrap();

    assert_eq!(file.options[0].constant.array.len(), 2);
    assert_eq!(file.options[0].constant.array[1].source, "b");
    assert_eq!(file.options[1].constant.source, "-5");
    assert_eq!(file.options[2].constant.source, "1.5");
    assert_eq!(file.options[3].constant.source, "FAST");
    assert!(!file.options[3].constant.is_string);
}

#[test]
fn parse_proto___adjacent_strings___concatenate() {
    let file = parse_proto(r#"option (path) = "/a" "/b";"#).unwrap();

    assert_eq!(file.options[0].constant.source, "/a/b");
}

#[test]
fn parse_proto___proto2_group___is_parsed_as_group() {
    let source = r#"
        syntax = "proto2";
        message Search {
            repeated group Result = 1 {
                required string url = 2;
            }
        }
    "#;

    let file = parse_proto(source).unwrap();

    let MessageElement::Group(group) = &file.messages[0].elements[0] else {
        panic!("expected group");
    };
    assert_eq!(group.name, "Result");
    assert_eq!(group.label, Some(Label::Repeated));
}

#[test]
fn parse_proto___extend___collects_fields() {
    let source = r#"
        extend google.protobuf.MethodOptions {
            HttpRule http = 72295728;
        }
    "#;

    let file = parse_proto(source).unwrap();

    assert_eq!(file.extends[0].target, "google.protobuf.MethodOptions");
    assert_eq!(file.extends[0].fields[0].name, "http");
}

#[test]
fn parse_proto___empty_source___yields_empty_file() {
    let file = parse_proto("").unwrap();

    assert_eq!(file, ProtoFile::default());
}

#[test]
fn parse_proto___missing_semicolon___reports_position() {
    let err = parse_proto("syntax = \"proto3\"\nmessage A {}").unwrap_err();

    assert_eq!(err.line, 2);
    assert_eq!(err.column, 1);
    assert!(err.message.contains("\";\""));
}

#[test]
fn parse_proto___unclosed_message___returns_error() {
    assert!(parse_proto("message A { string a = 1;").is_err());
}

#[test]
fn parse_proto___unknown_top_level___returns_error() {
    let err = parse_proto("widget Foo {}").unwrap_err();

    assert!(err.message.contains("top-level declaration"));
}

#[test]
fn parse_proto___rpc_body_with_field___returns_error() {
    let source = "service S { rpc A (B) returns (C) { string x = 1; } }";

    assert!(parse_proto(source).is_err());
}
