//! Platform module: read-only view of the resolved platform configuration

use super::importing_module;
use crate::runtime::errors::GuestError;
use crate::runtime::types::Val;
use crate::runtime::vm::VM;

pub fn import(vm: &mut VM, _args: &[Val]) -> Result<Val, GuestError> {
    let module = importing_module(vm)?;
    let platform = *vm.platform();

    module.set_global(
        "case_sensitive_filenames",
        Val::Bool(platform.case_sensitive_filenames),
    );
    module.set_global("endianness", Val::Str(platform.endianness.as_str().to_string()));
    Ok(Val::Null)
}
