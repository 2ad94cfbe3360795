use finchat::models::{PersistedRun, Role};
use finchat::transcript::{rebuild_transcript, ChatContext, TranscriptStore};
use serde_json::json;

fn runs_from(value: serde_json::Value) -> Vec<PersistedRun> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_multi_message_run() {
    let runs = runs_from(json!([
        {
            "messages": [
                {"role": "system", "content": "You are a finance assistant."},
                {"role": "user", "content": "How did AAPL do today?"},
                {"role": "assistant", "content": "Apple closed up 2%."}
            ]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert_eq!(store.len(), 2);
    assert_eq!(store.messages()[0].role, Role::User);
    assert_eq!(store.messages()[0].content, "How did AAPL do today?");
    assert_eq!(store.messages()[1].role, Role::Assistant);
    assert_eq!(store.messages()[1].content, "Apple closed up 2%.");
}

#[test]
fn test_system_and_empty_messages_never_appear() {
    let runs = runs_from(json!([
        {
            "messages": [
                {"role": "system", "content": "You are a finance assistant."},
                {"role": "user", "content": ""},
                {"role": "assistant", "content": "Hello."},
                {"role": "user"}
            ]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert_eq!(store.len(), 1);
    assert_eq!(store.messages()[0].content, "Hello.");
    assert!(store
        .messages()
        .iter()
        .all(|m| !m.content.contains("finance assistant")));
}

#[test]
fn test_duplicate_messages_appended_once() {
    let runs = runs_from(json!([
        {
            "messages": [
                {"role": "user", "content": "Compare MSFT and GOOG."},
                {"role": "assistant", "content": "Both are up this quarter."}
            ]
        },
        {
            "messages": [
                {"role": "user", "content": "Compare MSFT and GOOG."},
                {"role": "assistant", "content": "Both are up this quarter."}
            ]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert_eq!(store.len(), 2);
}

#[test]
fn test_single_exchange_run() {
    let runs = runs_from(json!([
        {
            "message": {"content": "hi"},
            "content": "hello",
            "tools": [
                {"tool_name": "get_stock_price", "tool_args": {"symbol": "AAPL"}}
            ]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert_eq!(store.len(), 2);
    assert_eq!(store.messages()[0].role, Role::User);
    assert_eq!(store.messages()[0].content, "hi");
    assert_eq!(store.messages()[1].role, Role::Assistant);
    assert_eq!(store.messages()[1].content, "hello");

    let tools = store.messages()[1].tool_calls.as_ref().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name.as_deref(), Some("get_stock_price"));
}

#[test]
fn test_single_exchange_without_reply() {
    let runs = runs_from(json!([
        {"message": {"content": "anything moving today?"}}
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert_eq!(store.len(), 1);
    assert_eq!(store.messages()[0].role, Role::User);
}

#[test]
fn test_unrecognized_runs_contribute_nothing() {
    let runs = runs_from(json!([
        {"foo": "bar"},
        {"message": "not an object"},
        42,
        {
            "messages": [
                {"role": "user", "content": "still here?"}
            ]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert_eq!(store.len(), 1);
    assert_eq!(store.messages()[0].content, "still here?");
}

#[test]
fn test_assistant_tools_from_explicit_field() {
    let runs = runs_from(json!([
        {
            "messages": [
                {"role": "user", "content": "Screen for dividend stocks."},
                {
                    "role": "assistant",
                    "content": "Here are three candidates.",
                    "tool_calls": [{"name": "screen_stocks"}]
                }
            ],
            "tools": [{"name": "should_not_be_used"}]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    let tools = store.messages()[1].tool_calls.as_ref().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name.as_deref(), Some("screen_stocks"));
}

#[test]
fn test_assistant_tools_from_metrics_fallback() {
    let runs = runs_from(json!([
        {
            "messages": [
                {"role": "user", "content": "What's the P/E of NVDA?"},
                {
                    "role": "assistant",
                    "content": "Around 65.",
                    "metrics": {"input_tokens": 120}
                }
            ],
            "tools": [{"tool_name": "get_fundamentals", "tool_args": {"symbol": "NVDA"}}]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    let tools = store.messages()[1].tool_calls.as_ref().unwrap();
    assert_eq!(tools[0].name.as_deref(), Some("get_fundamentals"));
}

#[test]
fn test_assistant_without_metrics_gets_no_run_tools() {
    let runs = runs_from(json!([
        {
            "messages": [
                {"role": "user", "content": "Thanks."},
                {"role": "assistant", "content": "Anytime."}
            ],
            "tools": [{"name": "get_fundamentals"}]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert!(store.messages()[1].tool_calls.is_none());
}

#[test]
fn test_explicit_null_tool_calls_blocks_metrics_fallback() {
    // "tool_calls": null is still an explicit field; the run-level
    // tools must not leak in through the metrics fallback
    let runs = runs_from(json!([
        {
            "messages": [
                {"role": "user", "content": "Any news on TSLA?"},
                {
                    "role": "assistant",
                    "content": "Nothing major today.",
                    "tool_calls": null,
                    "metrics": {"input_tokens": 80}
                }
            ],
            "tools": [{"name": "search_news"}]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert!(store.messages()[1].tool_calls.is_none());
}

#[test]
fn test_dedup_spans_run_shapes() {
    let runs = runs_from(json!([
        {
            "message": {"content": "hi"},
            "content": "hello"
        },
        {
            "messages": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ]
        }
    ]));

    let mut store = TranscriptStore::new();
    rebuild_transcript(&mut store, &runs);

    assert_eq!(store.len(), 2);
}

#[test]
fn test_rebuild_clears_previous_transcript() {
    let mut store = TranscriptStore::new();
    store.append(Role::User, "stale message", None, None);

    rebuild_transcript(&mut store, &[]);

    assert!(store.is_empty());
}

#[test]
fn test_context_reset_swaps_session_and_clears_transcript() {
    let mut context = ChatContext::new("s-1");
    context
        .transcript
        .append(Role::User, "hello", None, Some("chart.png".to_string()));
    assert_eq!(context.transcript.messages()[0].image.as_deref(), Some("chart.png"));

    context.reset("s-2");

    assert_eq!(context.session_id, "s-2");
    assert!(context.transcript.is_empty());
}
