mod export;
mod reconstruct;
mod store;

pub use export::export_transcript;
pub use reconstruct::rebuild_transcript;
pub use store::{ChatContext, TranscriptStore};
