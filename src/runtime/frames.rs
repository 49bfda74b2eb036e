//! Call stack
//!
//! One frame per active routine, bytecode or native alike. A frame's
//! resumption point is a `ProgramCounter`; moving a frame forward swaps in a
//! new PC rather than editing the old one.

use super::types::ProgramCounter;
use serde::{Deserialize, Serialize};

/* ===================== Frames ===================== */

#[derive(Debug, Clone)]
pub struct Frame {
    pub pc: ProgramCounter,
}

impl Frame {
    pub fn new(pc: ProgramCounter) -> Self {
        Frame { pc }
    }
}

#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Replace the resumption point of the innermost frame
    ///
    /// Returns false if the stack is empty.
    pub fn resume_at(&mut self, pc: ProgramCounter) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.pc = pc;
                true
            }
            None => false,
        }
    }

    /// Outermost frame first
    pub fn traceback(&self) -> Vec<TraceEntry> {
        self.frames.iter().map(|f| TraceEntry::from(&f.pc)).collect()
    }
}

/* ===================== Tracebacks ===================== */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Location {
    Offset(usize),
    Routine(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub module: String,
    pub location: Location,
}

impl From<&ProgramCounter> for TraceEntry {
    fn from(pc: &ProgramCounter) -> Self {
        let location = match pc {
            ProgramCounter::Bytecode { offset, .. } => Location::Offset(*offset),
            ProgramCounter::Native { routine, .. } => Location::Routine(routine.name().to_string()),
        };
        TraceEntry {
            module: pc.module().name().to_string(),
            location,
        }
    }
}
