pub mod analytics;
pub mod event_sink;
pub mod loader;
pub mod sheets_client;
pub mod static_words;
pub mod word_source;

// Re-export main components
pub use analytics::*;
pub use event_sink::*;
pub use loader::*;
pub use sheets_client::*;
pub use word_source::*;
