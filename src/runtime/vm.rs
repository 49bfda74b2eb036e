//! Virtual Machine state
//!
//! The VM holds the state shared by everything a routine can touch:
//! - config: runtime configuration and the platform it was resolved to
//! - frames: stack of active routines, each resuming at a ProgramCounter
//! - modules: built-in modules imported so far

use super::computation::Computation;
use super::errors::GuestError;
use super::frames::{CallStack, Frame, TraceEntry};
use super::module::Module;
use super::stdlib;
use super::types::{ProgramCounter, Val};
use crate::config::{Platform, RuntimeConfig};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/* ===================== VM ===================== */

#[derive(Debug)]
pub struct VM {
    config: RuntimeConfig,
    platform: Platform,
    frames: CallStack,
    modules: HashMap<String, Rc<Module>>,
    last_traceback: Vec<TraceEntry>,
    /// Set while an error unwinds, so outer frames keep the innermost traceback
    unwinding: bool,
}

impl VM {
    /// Create a VM, resolving the platform from the configuration
    pub fn new(config: RuntimeConfig) -> Self {
        let platform = config.platform();
        Self::with_platform(config, platform)
    }

    pub fn with_platform(config: RuntimeConfig, platform: Platform) -> Self {
        VM {
            config,
            platform,
            frames: CallStack::new(),
            modules: HashMap::new(),
            last_traceback: vec![],
            unwinding: false,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn frames(&self) -> &CallStack {
        &self.frames
    }

    /// Traceback captured when the most recent guest error escaped a routine
    pub fn last_traceback(&self) -> &[TraceEntry] {
        &self.last_traceback
    }

    /// Module of the innermost frame
    pub fn current_module(&self) -> Option<Rc<Module>> {
        self.frames.current().map(|f| Rc::clone(f.pc.module()))
    }

    /* ===================== Frame Management ===================== */

    /// Push a frame resuming at `pc`
    pub fn enter(&mut self, pc: ProgramCounter) -> Result<(), GuestError> {
        if self.frames.depth() >= self.config.max_frames {
            self.last_traceback = self.frames.traceback();
            self.unwinding = true;
            return Err(GuestError::RecursionDepth {
                limit: self.config.max_frames,
            });
        }
        self.unwinding = false;
        self.frames.push(Frame::new(pc));
        Ok(())
    }

    /// Pop the innermost frame, recording a traceback if `error` escapes it
    pub fn leave(&mut self, error: Option<&GuestError>) {
        match error {
            Some(e) if !self.unwinding => {
                self.last_traceback = self.frames.traceback();
                self.unwinding = true;
                debug!(
                    kind = e.kind(),
                    depth = self.frames.depth(),
                    "guest error escaped routine"
                );
            }
            Some(_) => {}
            None => self.unwinding = false,
        }
        self.frames.pop();
    }

    /* ===================== Modules ===================== */

    /// Import a built-in module, running its import routine on first use
    pub fn import(&mut self, name: &str) -> Result<Rc<Module>, GuestError> {
        if let Some(module) = self.modules.get(name) {
            return Ok(Rc::clone(module));
        }

        let def = stdlib::lookup(name)
            .ok_or_else(|| GuestError::import(name, "no such built-in module"))?;
        debug!(module = def.name, "importing built-in module");

        let module = Rc::new(Module::new(def.name, def.identifier, def.exports.iter().copied()));
        let mut init = def.importer().bind(Rc::clone(&module), vec![]);
        init.advance(self)?;

        let missing = module.missing_exports();
        if !missing.is_empty() {
            return Err(GuestError::import(
                name,
                format!("import did not define {}", missing.join(", ")),
            ));
        }

        self.modules.insert(name.to_string(), Rc::clone(&module));
        Ok(module)
    }

    /// Bind a module's function to arguments without running it
    pub fn call(
        &mut self,
        module_name: &str,
        func: &str,
        args: Vec<Val>,
    ) -> Result<Computation, GuestError> {
        let module = self.import(module_name)?;
        match module.get_global(func) {
            Some(Val::Func(callable)) => Ok(callable.bind(module, args)),
            Some(other) => Err(GuestError::type_error("function", other.type_name())),
            None => Err(GuestError::import(
                module_name,
                format!("no attribute '{}'", func),
            )),
        }
    }

    /// Iteration computation for a sequence value
    pub fn iter(&mut self, value: &Val) -> Result<Computation, GuestError> {
        self.call(stdlib::BUILTINS, "iter", vec![value.clone()])
    }
}
