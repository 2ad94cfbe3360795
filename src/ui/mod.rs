pub mod highlight;
pub mod output;
pub mod tool;

pub use output::{display_content, display_tool_call, display_tool_calls, display_transcript};
