//! System orchestration, startup, and shutdown logic.

pub mod logging;
pub mod pipeline_system;

pub use logging::*;
pub use pipeline_system::*;
