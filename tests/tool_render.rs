use finchat::models::{ToolArgs, ToolCall};
use finchat::ui::tool::{
    args_display, display_title, metrics_display, result_display, ArgsDisplay, ResultDisplay,
};
use serde_json::json;

fn tool_from(value: serde_json::Value) -> ToolCall {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_query_args_render_as_query_block() {
    let tool = tool_from(json!({"name": "run_sql", "args": {"query": "SELECT 1"}}));
    assert_eq!(
        args_display(&tool.args),
        ArgsDisplay::Query("SELECT 1".to_string())
    );
}

#[test]
fn test_text_args_fall_back_to_raw() {
    let tool = tool_from(json!({"name": "search", "args": "not json"}));
    assert_eq!(
        args_display(&tool.args),
        ArgsDisplay::Raw("not json".to_string())
    );
}

#[test]
fn test_text_args_parse_as_structured() {
    let tool = tool_from(json!({"name": "search", "args": "{\"a\":1}"}));
    assert_eq!(
        args_display(&tool.args),
        ArgsDisplay::Structured(json!({"a": 1}))
    );
}

#[test]
fn test_mapping_args_render_as_structured() {
    let tool = tool_from(json!({"name": "get_quote", "args": {"symbol": "AAPL"}}));
    assert_eq!(
        args_display(&tool.args),
        ArgsDisplay::Structured(json!({"symbol": "AAPL"}))
    );
}

#[test]
fn test_absent_args_hidden() {
    let tool = tool_from(json!({"name": "refresh"}));
    assert_eq!(args_display(&tool.args), ArgsDisplay::Hidden);
    assert_eq!(args_display(&ToolArgs::Text(String::new())), ArgsDisplay::Hidden);
}

#[test]
fn test_null_query_still_renders_query_block() {
    // The query key wins over the structured-mapping branch even when
    // its value is null
    let tool = tool_from(json!({"name": "run_sql", "args": {"query": null}}));
    assert_eq!(args_display(&tool.args), ArgsDisplay::Query(String::new()));
}

#[test]
fn test_display_title() {
    assert_eq!(display_title(Some("get_stock_price")), "Get Stock Price");
    assert_eq!(display_title(Some("search")), "Search");
    assert_eq!(display_title(None), "Tool Call");
    assert_eq!(display_title(Some("")), "Tool Call");
}

#[test]
fn test_structured_result_shown_directly() {
    assert_eq!(
        result_display(&json!({"price": 227.5})),
        Some(ResultDisplay::Structured(json!({"price": 227.5})))
    );
}

#[test]
fn test_string_result_attempted_as_json() {
    assert_eq!(
        result_display(&json!("{\"price\": 227.5}")),
        Some(ResultDisplay::Structured(json!({"price": 227.5})))
    );
    assert_eq!(
        result_display(&json!("AAPL closed at 227.50")),
        Some(ResultDisplay::Text("AAPL closed at 227.50".to_string()))
    );
}

#[test]
fn test_empty_result_omitted() {
    assert_eq!(result_display(&json!("")), None);
    assert_eq!(result_display(&serde_json::Value::Null), None);
    assert_eq!(result_display(&json!({})), None);
}

#[test]
fn test_metrics_display() {
    let tool = tool_from(json!({"name": "x", "metrics": {"input_tokens": 12}}));
    assert_eq!(
        metrics_display(tool.metrics.as_ref().unwrap()),
        Some(json!({"input_tokens": 12}))
    );

    let empty = tool_from(json!({"name": "x", "metrics": {}}));
    assert_eq!(metrics_display(empty.metrics.as_ref().unwrap()), None);
}

#[test]
fn test_both_wire_shapes_normalize_to_one_record() {
    let mapping = tool_from(json!({
        "name": "get_stock_price",
        "args": {"symbol": "AAPL"},
        "result": "227.50"
    }));
    let execution = tool_from(json!({
        "tool_name": "get_stock_price",
        "tool_args": {"symbol": "AAPL"},
        "result": "227.50"
    }));

    assert_eq!(mapping, execution);
    assert_eq!(mapping.name.as_deref(), Some("get_stock_price"));
}
