use std::io::{self, Write};

use colored::*;
use futures::StreamExt;
use tokio::time::{timeout, Duration};

use crate::api::models::RunEvent;
use crate::error::{FinchatError, Result};
use crate::models::ToolCall;
use crate::ui::highlight::CodeBuffer;
use crate::ui::output::display_tool_call;

pub struct RunOutput {
    pub content: String,
    pub tools: Vec<ToolCall>,
}

/// Consume a streamed run response: content deltas go through the
/// highlighter to stdout as they arrive, completed tool calls render
/// as boxed sections, and the collected reply plus tool executions
/// come back to the caller once the run completes.
pub async fn process_run_stream(
    response: reqwest::Response,
    timeout_secs: u64,
    verbose: bool,
) -> Result<RunOutput> {
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut incomplete_line = String::new();
    let mut code_buffer = CodeBuffer::new();
    let mut last_flush = std::time::Instant::now();
    let flush_interval = std::time::Duration::from_millis(50);
    let mut assistant_response = String::new();
    let mut tools: Vec<ToolCall> = vec![];
    let chunk_timeout = Duration::from_secs(timeout_secs);

    loop {
        match timeout(chunk_timeout, stream.next()).await {
            Ok(Some(chunk)) => {
                let chunk = chunk.map_err(FinchatError::NetworkError)?;
                let text = String::from_utf8_lossy(&chunk);
                incomplete_line.push_str(&text);
            }
            Ok(None) => break,
            Err(_) => {
                eprintln!(
                    "{}",
                    format!(
                        "Error: Connection timeout - no data received for {} seconds",
                        timeout_secs
                    )
                    .red()
                );
                eprintln!(
                    "{}",
                    "The agent runtime may be experiencing issues or the connection was lost."
                        .dimmed()
                );

                let remaining = code_buffer.flush();
                if !remaining.is_empty() {
                    print!("{}", remaining.trim_end());
                    println!();
                }

                io::stdout().flush()?;
                return Err(FinchatError::Timeout);
            }
        }

        // Find last newline to ensure we only process complete lines
        if let Some(last_newline_pos) = incomplete_line.rfind('\n') {
            buffer.push_str(&incomplete_line[..=last_newline_pos]);
            incomplete_line = incomplete_line[last_newline_pos + 1..].to_string();
        } else {
            continue;
        }

        // Process complete lines
        while let Some(line_end) = buffer.find('\n') {
            let line = buffer[..line_end].to_string();
            buffer = buffer[line_end + 1..].to_string();

            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            // Parse SSE field
            if let Some(colon_pos) = line.find(':') {
                let field = line[..colon_pos].trim();
                let value = line[colon_pos + 1..].trim_start();

                match field {
                    "data" => {
                        if value == "[DONE]" {
                            return finish(&mut code_buffer, assistant_response, tools);
                        }

                        match serde_json::from_str::<RunEvent>(value) {
                            Ok(event) => match event.event.as_str() {
                                "RunContent" | "RunResponseContent" => {
                                    if let Some(content) = event.content {
                                        assistant_response.push_str(&content);

                                        let formatted = code_buffer.append(&content);
                                        if !formatted.is_empty() {
                                            print!("{}", formatted);

                                            if last_flush.elapsed() > flush_interval {
                                                io::stdout().flush()?;
                                                last_flush = std::time::Instant::now();
                                            }
                                        }
                                    }
                                }
                                "ToolCallStarted" => {
                                    let name = event
                                        .tool
                                        .as_ref()
                                        .and_then(|t| t.name.as_deref())
                                        .unwrap_or("tool");
                                    println!("{}", format!("Calling tool: {}...", name).cyan());
                                }
                                "ToolCallCompleted" => {
                                    if let Some(tool) = event.tool {
                                        // Flush pending prose so the tool box
                                        // lands after the text that led to it
                                        let remaining = code_buffer.flush();
                                        if !remaining.is_empty() {
                                            print!("{}", remaining);
                                        }
                                        display_tool_call(&tool);
                                        tools.push(tool);
                                    }
                                }
                                "RunCompleted" => {
                                    if assistant_response.is_empty() {
                                        if let Some(content) = event.content {
                                            assistant_response.push_str(&content);
                                            let formatted = code_buffer.append(&content);
                                            if !formatted.is_empty() {
                                                print!("{}", formatted);
                                            }
                                        }
                                    }
                                    if let Some(run_tools) = event.tools {
                                        if !run_tools.is_empty() {
                                            tools = run_tools;
                                        }
                                    }
                                    return finish(&mut code_buffer, assistant_response, tools);
                                }
                                "RunError" => {
                                    let message = event
                                        .content
                                        .unwrap_or_else(|| "run failed".to_string());
                                    return Err(FinchatError::Other(format!(
                                        "Agent run error: {}",
                                        message
                                    )));
                                }
                                other => {
                                    if verbose {
                                        eprintln!(
                                            "{}",
                                            format!("[fin] Unknown run event: {}", other).dimmed()
                                        );
                                    }
                                }
                            },
                            Err(e) => {
                                if verbose {
                                    eprintln!(
                                        "{}",
                                        format!("[fin] JSON parse error: {}", e).dimmed()
                                    );
                                }
                            }
                        }
                    }
                    "event" | "id" | "retry" => {
                        if verbose {
                            eprintln!("{}", format!("[fin] SSE {}: {}", field, value).dimmed());
                        }
                    }
                    _ => {
                        if verbose {
                            eprintln!("{}", format!("[fin] Unknown SSE field: {}", field).dimmed());
                        }
                    }
                }
            }
        }
    }

    // Stream ended without a completion event
    finish(&mut code_buffer, assistant_response, tools)
}

fn finish(
    code_buffer: &mut CodeBuffer,
    content: String,
    tools: Vec<ToolCall>,
) -> Result<RunOutput> {
    let remaining = code_buffer.flush();
    if !remaining.is_empty() {
        print!("{}", remaining.trim_end());
    }

    println!();
    io::stdout().flush()?;

    Ok(RunOutput { content, tools })
}
