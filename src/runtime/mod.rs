//! # Runtime - execution substrate
//!
//! The pieces every other part of the interpreter leans on without
//! re-checking them:
//!
//! 1. **Program counters**: one `ProgramCounter` type for "where execution
//!    resumes", whether that is bytecode or a host routine
//! 2. **Suspendable computations**: generators and one-shot procedures behind
//!    a single `advance → Produced | Exhausted` protocol
//! 3. **Index translation**: negative-index wraparound and slice validation
//!    (`< n` for elements, `<= n` for slice endpoints)
//!
//! Around them sit the `VM` (call stack, config, module cache), the pump
//! drivers, and the built-in modules that register host routines.

pub mod computation;
pub mod errors;
pub mod frames;
pub mod index;
pub mod module;
pub mod pump;
pub mod stdlib;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use computation::{Callable, Computation, Coroutine, Resume, StepResult};
pub use errors::{ErrorInfo, GuestError};
pub use frames::{CallStack, Frame, Location, TraceEntry};
pub use module::Module;
pub use pump::{collect, pump, run_until_exhausted};
pub use types::{ProgramCounter, RootValue, Val};
pub use vm::VM;
