use colored::*;
use serde_json::Value;

use crate::models::{Role, ToolCall};
use crate::transcript::TranscriptStore;

use super::highlight::CodeBuffer;
use super::tool::{
    args_display, display_title, metrics_display, result_display, ArgsDisplay, ResultDisplay,
};

/// Display content with syntax highlighting
pub fn display_content(content: &str) {
    let mut code_buffer = CodeBuffer::new();
    let formatted = code_buffer.append(content);
    if !formatted.is_empty() {
        print!("{}", formatted);
    }
    let remaining = code_buffer.flush();
    if !remaining.is_empty() {
        print!("{}", remaining.trim_end());
    }
    println!();
}

/// Display a sequence of tool invocations
pub fn display_tool_calls(tools: &[ToolCall]) {
    for tool in tools {
        display_tool_call(tool);
    }
}

/// Display one tool invocation as a titled section. Absent fields
/// simply omit their part of the section.
pub fn display_tool_call(tool: &ToolCall) {
    println!("{}", display_title(tool.name.as_deref()).cyan().bold());

    match args_display(&tool.args) {
        ArgsDisplay::Query(query) => display_block("sql", &query),
        ArgsDisplay::Structured(args) => {
            println!("{}", "Arguments:".bold());
            display_json(&args);
        }
        ArgsDisplay::Raw(text) => {
            println!("{}", "Arguments:".bold());
            display_block("", &text);
        }
        ArgsDisplay::Hidden => {}
    }

    if let Some(result) = tool.result.as_ref().and_then(result_display) {
        println!("{}", "Results:".bold());
        match result {
            ResultDisplay::Structured(value) => display_json(&value),
            ResultDisplay::Text(text) => display_content(&text),
        }
    }

    if let Some(metrics) = tool.metrics.as_ref().and_then(metrics_display) {
        println!("{}", "Metrics:".bold());
        display_json(&metrics);
    }
}

/// Display a whole transcript: role headers, content, tool sections
pub fn display_transcript(store: &TranscriptStore) {
    for message in store.messages() {
        match message.role {
            Role::User => println!("{}", "You".yellow().bold()),
            Role::Assistant => println!("{}", "Assistant".green().bold()),
        }
        display_content(&message.content);
        if let Some(tools) = &message.tool_calls {
            display_tool_calls(tools);
        }
        println!();
    }
}

fn display_block(lang: &str, content: &str) {
    // Avoid a double newline if content already ends with one
    let sep = if content.ends_with('\n') { "" } else { "\n" };
    let block = format!("```{}\n{}{}```", lang, content, sep);
    let mut code_buffer = CodeBuffer::new();
    let formatted = code_buffer.append(&block);
    if !formatted.is_empty() {
        print!("{}", formatted);
    }
    let remaining = code_buffer.flush();
    if !remaining.is_empty() {
        print!("{}", remaining.trim_end());
    }
    println!();
}

fn display_json(value: &Value) {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    display_block("json", &pretty);
}
