pub mod row;
pub mod selector;
pub mod session;

// Re-export main components
pub use row::*;
pub use selector::*;
pub use session::*;
