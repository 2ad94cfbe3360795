use finchat::models::{Role, ToolArgs, ToolCall};
use finchat::transcript::{export_transcript, TranscriptStore};

#[test]
fn test_export_plain_conversation() {
    let mut store = TranscriptStore::new();
    store.append(Role::User, "How did the market close?", None, None);
    store.append(Role::Assistant, "The S&P 500 closed up 0.4%.", None, None);

    let doc = export_transcript(&store);

    assert!(doc.starts_with("# Finance Agent - Chat History\n"));
    assert!(doc.contains("### 👤 User\nHow did the market close?"));
    assert!(doc.contains("### 🤖 Assistant\nThe S&P 500 closed up 0.4%."));
    assert!(!doc.contains("Tools Used"));
}

#[test]
fn test_export_lists_tool_names() {
    let mut store = TranscriptStore::new();
    store.append(Role::User, "Check AAPL for me.", None, None);
    store.append(
        Role::Assistant,
        "Apple is trading at 227.50.",
        Some(vec![
            ToolCall::named("get_stock_price"),
            ToolCall {
                name: None,
                args: ToolArgs::None,
                result: None,
                metrics: None,
            },
        ]),
        None,
    );

    let doc = export_transcript(&store);

    assert!(doc.contains("#### Tools Used:\n"));
    assert!(doc.contains("- get_stock_price\n"));
    assert!(doc.contains("- Unknown Tool\n"));
}

#[test]
fn test_export_empty_store_is_header_only() {
    let store = TranscriptStore::new();
    let doc = export_transcript(&store);
    assert_eq!(doc, "# Finance Agent - Chat History\n\n");
}

#[test]
fn test_export_skips_tools_section_for_empty_list() {
    let mut store = TranscriptStore::new();
    store.append(Role::Assistant, "No tools were needed.", Some(vec![]), None);

    let doc = export_transcript(&store);
    assert!(!doc.contains("Tools Used"));
}
