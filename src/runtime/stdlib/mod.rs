//! Built-in modules
//!
//! Each built-in module is declared with its exported names and an import
//! routine. `VM::import` wraps the import routine as a procedure, runs it
//! under the new module's PC, and checks that every export got defined.

pub mod builtins;
pub mod platform;
pub mod strings;

use super::computation::Callable;
use super::errors::GuestError;
use super::module::Module;
use super::types::Val;
use super::vm::VM;
use std::rc::Rc;

pub const BUILTINS: &str = "Builtins";
pub const STRINGS: &str = "Strings";
pub const PLATFORM: &str = "Platform";

/* ===================== Module Table ===================== */

pub type ImportFn = fn(&mut VM, &[Val]) -> Result<Val, GuestError>;

/// Declaration of a built-in module
pub struct BuiltinModule {
    pub name: &'static str,
    pub identifier: &'static str,
    pub exports: &'static [&'static str],
    pub import: ImportFn,
}

impl BuiltinModule {
    /// Import routine wrapped for the step protocol
    pub fn importer(&self) -> Rc<Callable> {
        Callable::procedure(format!("{}.import", self.name), self.import)
    }
}

static MODULES: &[BuiltinModule] = &[
    BuiltinModule {
        name: BUILTINS,
        identifier: "builtin:Builtins",
        exports: &["iter", "range"],
        import: builtins::import,
    },
    BuiltinModule {
        name: STRINGS,
        identifier: "builtin:Strings",
        exports: &["join"],
        import: strings::import,
    },
    BuiltinModule {
        name: PLATFORM,
        identifier: "builtin:Platform",
        exports: &["case_sensitive_filenames", "endianness"],
        import: platform::import,
    },
];

pub fn lookup(name: &str) -> Option<&'static BuiltinModule> {
    MODULES.iter().find(|m| m.name == name)
}

pub fn module_names() -> impl Iterator<Item = &'static str> {
    MODULES.iter().map(|m| m.name)
}

/* ===================== Helpers ===================== */

/// Module whose import routine is currently running
fn importing_module(vm: &VM) -> Result<Rc<Module>, GuestError> {
    vm.current_module()
        .ok_or_else(|| GuestError::import("<unknown>", "import routine run outside a frame"))
}

/// Validate argument count
pub fn expect_args(routine: &str, args: &[Val], expected: usize) -> Result<(), GuestError> {
    if args.len() != expected {
        return Err(GuestError::ArgCount {
            routine: routine.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}
