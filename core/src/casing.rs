//! Recursive object-key case conversion between camelCase (Graph) and
//! PascalCase (Outlook REST v2.0).
//!
//! Only the first character of each key changes. Acronym keys such as `ID`
//! or `URLs` are therefore not normalised (`ID` camelizes to `iD`), and an
//! array whose objects already use mixed casing is converted element by
//! element without being reconciled. The client never applies these
//! transforms on its own; call them explicitly on a parsed body.

use serde_json::{Map, Value};

pub fn camelize_keys(value: Value) -> Value {
    transform_keys(value, &|c| c.to_ascii_lowercase())
}

pub fn pascalize_keys(value: Value) -> Value {
    transform_keys(value, &|c| c.to_ascii_uppercase())
}

fn transform_keys(value: Value, first: &dyn Fn(char) -> char) -> Value {
    match value {
        Value::Object(map) => {
            let converted: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (convert_key(&k, first), transform_keys(v, first)))
                .collect();
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(|v| transform_keys(v, first)).collect()),
        other => other,
    }
}

fn convert_key(key: &str, first: &dyn Fn(char) -> char) -> String {
    // OData annotations (`@odata.nextLink`) keep their spelling.
    if key.starts_with('@') {
        return key.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(c) => first(c).to_string() + chars.as_str(),
        None => String::new(),
    }
}
