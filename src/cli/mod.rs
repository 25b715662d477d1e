pub mod commands;
pub mod transcript;
pub mod ui;

pub use transcript::{Role, TranscriptEntry};
pub use ui::Output;
