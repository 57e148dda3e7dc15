pub mod errors;
pub mod events;
pub mod stats;
pub mod word;

// Re-export all types
pub use errors::*;
pub use events::*;
pub use stats::*;
pub use word::*;
