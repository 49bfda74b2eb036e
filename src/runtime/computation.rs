//! Suspendable computations
//!
//! Host routines come in two shapes. A *generator* suspends at every value it
//! yields and is resumed later. A *procedure* runs to completion once and
//! returns one value. Both are wrapped into a `Callable`, and binding a
//! `Callable` to arguments gives a `Computation` that every driver (for-loops,
//! pumps, built-in consumers) steps the same way:
//!
//! ```text
//! advance → Produced(v) | Exhausted
//! ```
//!
//! Binding never runs routine code. Generators are explicit state machines
//! implementing `Coroutine`; dropping a `Computation` drops that state.

use super::errors::GuestError;
use super::module::Module;
use super::types::{ProgramCounter, RootValue, Val};
use super::vm::VM;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/* ===================== Step Protocol ===================== */

/// Result of advancing a computation by one step
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    Produced(Val),
    Exhausted,
}

/// Result of resuming a coroutine to its next suspension point
#[derive(Debug, Clone, PartialEq)]
pub enum Resume {
    Yield(Val),
    Complete,
}

/// Body of a generator-shaped routine, written as a resumable state machine
pub trait Coroutine {
    fn resume(&mut self, vm: &mut VM) -> Result<Resume, GuestError>;
}

impl<F> Coroutine for F
where
    F: FnMut(&mut VM) -> Result<Resume, GuestError>,
{
    fn resume(&mut self, vm: &mut VM) -> Result<Resume, GuestError> {
        self(vm)
    }
}

/* ===================== Callables ===================== */

/// Builds a generator's coroutine from its bound arguments (on first advance)
pub type StartFn = dyn Fn(Vec<Val>) -> Result<Box<dyn Coroutine>, GuestError>;

/// Body of a procedure-shaped routine
pub type ProcFn = dyn Fn(&mut VM, &[Val]) -> Result<Val, GuestError>;

enum Shape {
    Generator(Box<StartFn>),
    Procedure(Box<ProcFn>),
}

/// A host routine wrapped for the step protocol
pub struct Callable {
    name: String,
    shape: Shape,
}

impl Callable {
    /// Wrap a generator-shaped routine
    pub fn generator<F>(name: impl Into<String>, start: F) -> Rc<Self>
    where
        F: Fn(Vec<Val>) -> Result<Box<dyn Coroutine>, GuestError> + 'static,
    {
        Rc::new(Callable {
            name: name.into(),
            shape: Shape::Generator(Box::new(start)),
        })
    }

    /// Wrap a procedure-shaped routine
    pub fn procedure<F>(name: impl Into<String>, body: F) -> Rc<Self>
    where
        F: Fn(&mut VM, &[Val]) -> Result<Val, GuestError> + 'static,
    {
        Rc::new(Callable {
            name: name.into(),
            shape: Shape::Procedure(Box::new(body)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_generator(&self) -> bool {
        matches!(self.shape, Shape::Generator(_))
    }

    /// Bind arguments, producing an unstarted computation
    ///
    /// `module` anchors the native PC the routine runs under.
    pub fn bind(self: &Rc<Self>, module: Rc<Module>, args: Vec<Val>) -> Computation {
        Computation {
            routine: Rc::clone(self),
            module,
            state: State::Unstarted(args),
        }
    }
}

impl RootValue for Callable {}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = if self.is_generator() {
            "generator"
        } else {
            "procedure"
        };
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("shape", &shape)
            .finish()
    }
}

/// Callables compare by identity
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/* ===================== Computations ===================== */

enum State {
    /// Arguments bound, nothing run yet
    Unstarted(Vec<Val>),
    /// Generator suspended between yields
    Running(Box<dyn Coroutine>),
    /// Done, but no `advance` has reported `Exhausted` yet
    Finished,
    Exhausted,
}

/// One argument-bound invocation of a `Callable`
pub struct Computation {
    routine: Rc<Callable>,
    module: Rc<Module>,
    state: State,
}

impl Computation {
    pub fn routine(&self) -> &Rc<Callable> {
        &self.routine
    }

    /// Resumption point this computation runs under
    pub fn pc(&self) -> ProgramCounter {
        ProgramCounter::native(Rc::clone(&self.module), Rc::clone(&self.routine))
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.state, State::Unstarted(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Finished | State::Exhausted)
    }

    /// Run the computation to its next value
    ///
    /// A generator yields `Produced` per suspension and then `Exhausted`
    /// forever. A procedure yields its single value, then `Exhausted` once
    /// without re-running. Advancing a procedure past that point is a
    /// `Misuse` error when `strict_procedures` is configured and another
    /// `Exhausted` otherwise.
    pub fn advance(&mut self, vm: &mut VM) -> Result<StepResult, GuestError> {
        match self.state {
            State::Finished => {
                trace!(routine = self.routine.name(), "reporting exhaustion");
                self.state = State::Exhausted;
                return Ok(StepResult::Exhausted);
            }
            State::Exhausted => {
                if !self.routine.is_generator() {
                    if vm.config().strict_procedures {
                        return Err(GuestError::Misuse {
                            routine: self.routine.name().to_string(),
                        });
                    }
                    warn!(routine = self.routine.name(), "procedure advanced after exhaustion");
                }
                return Ok(StepResult::Exhausted);
            }
            State::Unstarted(_) | State::Running(_) => {}
        }

        vm.enter(self.pc())?;
        let result = self.step(vm);
        vm.leave(result.as_ref().err());
        result
    }

    fn step(&mut self, vm: &mut VM) -> Result<StepResult, GuestError> {
        // Leave the state finished unless the routine suspends again, so an
        // error anywhere below finishes the computation.
        match std::mem::replace(&mut self.state, State::Finished) {
            State::Unstarted(args) => {
                let routine = Rc::clone(&self.routine);
                match &routine.shape {
                    Shape::Generator(start) => {
                        trace!(routine = routine.name(), "starting generator");
                        self.state = State::Running(start(args)?);
                        self.resume(vm)
                    }
                    Shape::Procedure(body) => {
                        trace!(routine = routine.name(), "running procedure");
                        let v = body(vm, &args)?;
                        Ok(StepResult::Produced(v))
                    }
                }
            }

            State::Running(coroutine) => {
                self.state = State::Running(coroutine);
                self.resume(vm)
            }

            State::Finished | State::Exhausted => Ok(StepResult::Exhausted),
        }
    }

    fn resume(&mut self, vm: &mut VM) -> Result<StepResult, GuestError> {
        let State::Running(coroutine) = &mut self.state else {
            return Ok(StepResult::Exhausted);
        };

        match coroutine.resume(vm) {
            Ok(Resume::Yield(v)) => Ok(StepResult::Produced(v)),
            Ok(Resume::Complete) => {
                debug!(routine = self.routine.name(), "generator exhausted");
                self.state = State::Exhausted;
                Ok(StepResult::Exhausted)
            }
            Err(e) => {
                self.state = State::Finished;
                Err(e)
            }
        }
    }
}

impl RootValue for Computation {}

impl fmt::Debug for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Unstarted(_) => "unstarted",
            State::Running(_) => "running",
            State::Finished | State::Exhausted => "exhausted",
        };
        f.debug_struct("Computation")
            .field("routine", &self.routine.name())
            .field("module", &self.module.name())
            .field("state", &state)
            .finish()
    }
}
