//! The two worker pools and the shared completion state between them.

pub mod completion;
pub mod generation;
pub mod persistence;

pub use completion::*;
pub use generation::*;
pub use persistence::*;
