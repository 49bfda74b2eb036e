//! Program counters
//!
//! A `ProgramCounter` says where a frame resumes. Bytecode and host routines
//! share the one type so the call stack, tracebacks, and error propagation
//! never special-case native calls.
//!
//! PCs are immutable. Moving execution forward means building a new PC.

use super::super::computation::Callable;
use super::super::module::Module;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum ProgramCounter {
    /// Offset into a module's compiled code
    Bytecode { module: Rc<Module>, offset: usize },
    /// Host-implemented routine owned by a module
    Native {
        module: Rc<Module>,
        routine: Rc<Callable>,
    },
}

impl ProgramCounter {
    /// Offset bounds are checked by the interpreter, not here.
    pub fn bytecode(module: Rc<Module>, offset: usize) -> Self {
        ProgramCounter::Bytecode { module, offset }
    }

    pub fn native(module: Rc<Module>, routine: Rc<Callable>) -> Self {
        ProgramCounter::Native { module, routine }
    }

    /// Module that globals and constants resolve against
    pub fn module(&self) -> &Rc<Module> {
        match self {
            ProgramCounter::Bytecode { module, .. } | ProgramCounter::Native { module, .. } => {
                module
            }
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            ProgramCounter::Bytecode { offset, .. } => Some(*offset),
            ProgramCounter::Native { .. } => None,
        }
    }

    pub fn routine(&self) -> Option<&Rc<Callable>> {
        match self {
            ProgramCounter::Bytecode { .. } => None,
            ProgramCounter::Native { routine, .. } => Some(routine),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, ProgramCounter::Native { .. })
    }
}

impl fmt::Display for ProgramCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramCounter::Bytecode { module, offset } => {
                write!(f, "{}@{}", module.name(), offset)
            }
            ProgramCounter::Native { module, routine } => {
                write!(f, "{}.{}", module.name(), routine.name())
            }
        }
    }
}
