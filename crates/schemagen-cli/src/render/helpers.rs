//! Tera filters and functions exposed to templates.

use std::collections::HashMap;

use schemagen_core::naming::{self, CaseStyle};
use schemagen_core::types::{map_column_type, map_wire_type};
use schemagen_core::{Counter, GenerationContext};
use tera::{Result, Tera, Value};

fn expect_str<'a>(filter: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{filter} filter expects a string")))
}

pub(crate) fn to_target_camel(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = expect_str("to_target_camel", value)?;
    Ok(Value::String(naming::to_target_camel(s)))
}

pub(crate) fn to_target_lower_camel(
    value: &Value,
    _args: &HashMap<String, Value>,
) -> Result<Value> {
    let s = expect_str("to_target_lower_camel", value)?;
    Ok(Value::String(naming::to_target_lower_camel(s)))
}

pub(crate) fn wire_type(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = expect_str("wire_type", value)?;
    Ok(Value::String(map_wire_type(s).to_string()))
}

pub(crate) fn column_type(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = expect_str("column_type", value)?;
    Ok(Value::String(map_column_type(s).as_str().to_string()))
}

pub(crate) fn strip_crud_prefix(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = expect_str("strip_crud_prefix", value)?;
    Ok(Value::String(naming::strip_crud_prefix(s)))
}

pub(crate) fn table_to_object(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = expect_str("table_to_object", value)?;
    Ok(Value::String(naming::table_to_object(s)))
}

/// Register the naming and type-mapping filters.
pub fn register_filters(tera: &mut Tera) {
    for style in CaseStyle::ALL {
        let name = style.filter_name();
        tera.register_filter(
            name,
            move |value: &Value, _args: &HashMap<String, Value>| -> Result<Value> {
                let s = expect_str(name, value)?;
                Ok(Value::String(naming::normalize_case(s, style)))
            },
        );
    }

    tera.register_filter("to_target_camel", to_target_camel);
    tera.register_filter("to_target_lower_camel", to_target_lower_camel);
    tera.register_filter("wire_type", wire_type);
    tera.register_filter("column_type", column_type);
    tera.register_filter("strip_crud_prefix", strip_crud_prefix);
    tera.register_filter("table_to_object", table_to_object);
}

/// Register `get_message`, `inc_counter` and `reset_counter`, bound to one run.
pub fn register_functions(tera: &mut Tera, context: &GenerationContext<'_>) {
    let messages: HashMap<String, Value> = context
        .model()
        .messages()
        .iter()
        .filter_map(|m| {
            serde_json::to_value(m)
                .map(|value| (m.name.clone(), value))
                .ok()
        })
        .collect();
    tera.register_function(
        "get_message",
        move |args: &HashMap<String, Value>| -> Result<Value> {
            let name = required_str(args, "get_message", "name")?;
            match messages.get(name) {
                Some(message) => Ok(message.clone()),
                None => {
                    tracing::debug!("get_message: unknown message {}", name);
                    Ok(Value::Null)
                }
            }
        },
    );

    let counter = context.counter().clone();
    tera.register_function(
        "inc_counter",
        move |args: &HashMap<String, Value>| -> Result<Value> {
            let key = required_str(args, "inc_counter", "key")?;
            Ok(Value::from(counter.increment(key)))
        },
    );

    let counter: Counter = context.counter().clone();
    tera.register_function(
        "reset_counter",
        move |args: &HashMap<String, Value>| -> Result<Value> {
            match args.get("key") {
                Some(key) => {
                    let key = key.as_str().ok_or_else(|| {
                        tera::Error::msg("reset_counter: `key` must be a string")
                    })?;
                    counter.reset(key);
                }
                None => counter.clear(),
            }
            Ok(Value::String(String::new()))
        },
    );
}

fn required_str<'a>(args: &'a HashMap<String, Value>, function: &str, arg: &str) -> Result<&'a str> {
    args.get(arg)
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg(format!("{function}: missing string argument `{arg}`")))
}

#[cfg(test)]
#[path = "helpers/helpers_tests.rs"]
mod helpers_tests;
