use serde_json::{Map, Value};

use crate::models::ToolArgs;

/// How a tool call's arguments should be presented.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgsDisplay {
    /// A query string, shown as an SQL block
    Query(String),
    /// Structured data, shown as pretty-printed JSON
    Structured(Value),
    /// Unparseable text, shown verbatim
    Raw(String),
    /// Nothing worth showing
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultDisplay {
    Structured(Value),
    Text(String),
}

/// Section title for a tool call: the tool name with underscores
/// spaced out and words capitalized, or "Tool Call" when the name is
/// absent or empty.
pub fn display_title(name: Option<&str>) -> String {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return "Tool Call".to_string(),
    };

    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify tool arguments for display. A mapping with a "query" key
/// becomes a query block; text is parsed as JSON when possible and
/// shown raw otherwise; any other non-empty mapping is structured
/// data; everything else is hidden.
pub fn args_display(args: &ToolArgs) -> ArgsDisplay {
    match args {
        ToolArgs::Object(map) if map.contains_key("query") => {
            let query = match map.get("query") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            ArgsDisplay::Query(query)
        }
        ToolArgs::Text(text) if !text.is_empty() => {
            match serde_json::from_str::<Value>(text) {
                Ok(parsed) => ArgsDisplay::Structured(parsed),
                Err(_) => ArgsDisplay::Raw(text.clone()),
            }
        }
        ToolArgs::Object(map) if !map.is_empty() => {
            ArgsDisplay::Structured(Value::Object(map.clone()))
        }
        _ => ArgsDisplay::Hidden,
    }
}

/// Classify a tool result for display, or `None` when there is nothing
/// to show. Structured data passes through; strings are attempted as
/// JSON and fall back to plain text.
pub fn result_display(result: &Value) -> Option<ResultDisplay> {
    if !value_truthy(result) {
        return None;
    }

    let display = match result {
        Value::Object(_) | Value::Array(_) => ResultDisplay::Structured(result.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => ResultDisplay::Structured(parsed),
            Err(_) => ResultDisplay::Text(s.clone()),
        },
        other => ResultDisplay::Structured(other.clone()),
    };
    Some(display)
}

/// Metrics section content, or `None` when the mapping is empty.
pub fn metrics_display(metrics: &Map<String, Value>) -> Option<Value> {
    if metrics.is_empty() {
        None
    } else {
        Some(Value::Object(metrics.clone()))
    }
}

fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
