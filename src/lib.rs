pub mod cli;
pub mod config;
pub mod runtime;

// Re-export main types
pub use config::{Endianness, Platform, RuntimeConfig};
pub use runtime::{
    Callable, Computation, Coroutine, GuestError, Module, ProgramCounter, Resume, StepResult, Val,
    VM,
};
