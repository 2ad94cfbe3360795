pub mod client;
pub mod models;
pub mod streaming;

pub use client::post_run;
pub use models::{RunEvent, RunRequest};
pub use streaming::{process_run_stream, RunOutput};
