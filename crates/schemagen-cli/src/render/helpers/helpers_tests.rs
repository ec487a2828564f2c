#![allow(non_snake_case)]

use super::*;
use schemagen_core::{Field, Message, SchemaModel};
use test_case::test_case;

fn apply(filter: fn(&Value, &HashMap<String, Value>) -> Result<Value>, input: &str) -> String {
    let value = Value::String(input.to_string());
    filter(&value, &HashMap::new())
        .unwrap()
        .as_str()
        .unwrap()
        .to_string()
}

fn render(tera: &mut Tera, source: &str) -> String {
    tera.render_str(source, &tera::Context::new()).unwrap()
}

fn model() -> SchemaModel {
    let mut model = SchemaModel::new("app", "platform");
    model.add_message(Message {
        name: "User".into(),
        fields: vec![Field {
            name: "user_id".into(),
            ty: "string".into(),
            repeated: false,
        }],
    });
    model
}

#[test_case("user_id", "UserID")]
#[test_case("site_url", "SiteURL")]
fn to_target_camel___filter___rewrites_acronym(input: &str, expected: &str) {
    assert_eq!(apply(to_target_camel, input), expected);
}

#[test]
fn target_filters___bare_id___keep_distinct_casing() {
    assert_eq!(apply(to_target_camel, "id"), "ID");
    assert_eq!(apply(to_target_lower_camel, "id"), "id");
}

#[test]
fn wire_type___filter___maps_timestamp() {
    assert_eq!(apply(wire_type, "google.protobuf.Timestamp"), "db.Timestamp");
    assert_eq!(apply(wire_type, "int64"), "int64");
}

#[test]
fn column_type___filter___maps_sql_types() {
    assert_eq!(apply(column_type, "VARCHAR(32)"), "string");
    assert_eq!(apply(column_type, "datetime"), "google.protobuf.Timestamp");
}

#[test]
fn strip_crud_prefix___filter___drops_verb() {
    assert_eq!(apply(strip_crud_prefix, "ListUsers"), "Users");
}

#[test]
fn table_to_object___filter___upper_camels() {
    assert_eq!(apply(table_to_object, "user_accounts"), "UserAccounts");
}

#[test]
fn filters___non_string_input___is_an_error() {
    let value = Value::from(42);

    assert!(wire_type(&value, &HashMap::new()).is_err());
}

#[test_case("{{ 'user_name' | to_camel }}", "UserName")]
#[test_case("{{ 'user_name' | to_lower_camel }}", "userName")]
#[test_case("{{ 'UserName' | to_snake }}", "user_name")]
#[test_case("{{ 'UserName' | to_screaming_snake }}", "USER_NAME")]
#[test_case("{{ 'UserName' | to_kebab }}", "user-name")]
#[test_case("{{ 'UserName' | to_screaming_kebab }}", "USER-NAME")]
#[test_case("{{ 'CreateUser' | strip_crud_prefix | to_snake }}", "user")]
fn register_filters___case_filters___render(source: &str, expected: &str) {
    let mut tera = Tera::default();
    register_filters(&mut tera);

    assert_eq!(render(&mut tera, source), expected);
}

#[test]
fn register_functions___counter___increments_and_resets() {
    let model = model();
    let context = GenerationContext::new(&model);
    let mut tera = Tera::default();
    register_functions(&mut tera, &context);

    let output = render(
        &mut tera,
        "{{ inc_counter(key='k') }}{{ inc_counter(key='k') }}{{ reset_counter(key='k') }}{{ inc_counter(key='k') }}",
    );

    assert_eq!(output, "121");
}

#[test]
fn register_functions___reset_without_key___clears_all() {
    let model = model();
    let context = GenerationContext::new(&model);
    let mut tera = Tera::default();
    register_functions(&mut tera, &context);

    let output = render(
        &mut tera,
        "{{ inc_counter(key='a') }}{{ inc_counter(key='b') }}{{ reset_counter() }}{{ inc_counter(key='a') }}{{ inc_counter(key='b') }}",
    );

    assert_eq!(output, "1111");
    assert_eq!(context.counter().get("a"), 1);
}

#[test]
fn register_functions___get_message___returns_fields() {
    let model = model();
    let context = GenerationContext::new(&model);
    let mut tera = Tera::default();
    register_filters(&mut tera);
    register_functions(&mut tera, &context);

    let output = render(
        &mut tera,
        "{% set m = get_message(name='User') %}{% for f in m.fields %}{{ f.name | to_target_camel }} {{ f.type }}{% endfor %}",
    );

    assert_eq!(output, "UserID string");
}

#[test]
fn register_functions___inc_counter_without_key___is_an_error() {
    let model = model();
    let context = GenerationContext::new(&model);
    let mut tera = Tera::default();
    register_functions(&mut tera, &context);

    assert!(tera.render_str("{{ inc_counter() }}", &tera::Context::new()).is_err());
}
