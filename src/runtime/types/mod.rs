//! Type definitions for the runtime
//!
//! - Runtime values (Val) and the RootValue marker
//! - Program counters (ProgramCounter)

pub mod pc;
pub mod values;

// Re-export all types for convenient access
pub use pc::ProgramCounter;
pub use values::{RootValue, Val};
