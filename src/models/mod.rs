mod message;
mod run;
mod session;
mod tool;

pub use message::{Message, Role};
pub use run::{PersistedRun, RunMessage, RunPrompt, SessionMemory};
pub use session::{SessionData, SessionRecord};
pub use tool::{ToolArgs, ToolCall};
