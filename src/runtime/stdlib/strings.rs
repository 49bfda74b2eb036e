//! Strings module

use super::{expect_args, importing_module};
use crate::runtime::computation::Callable;
use crate::runtime::errors::GuestError;
use crate::runtime::pump::pump;
use crate::runtime::types::Val;
use crate::runtime::vm::VM;

pub fn import(vm: &mut VM, _args: &[Val]) -> Result<Val, GuestError> {
    let module = importing_module(vm)?;
    module.define_func(Callable::procedure("join", join));
    Ok(Val::Null)
}

/// join(seq, sep) - concatenate the strings of any iterable with `sep`
///
/// Pulls elements through the pump, so anything `iter` accepts works.
pub fn join(vm: &mut VM, args: &[Val]) -> Result<Val, GuestError> {
    expect_args("join", args, 2)?;
    let sep = args[1].as_str()?;

    let mut out = Vec::new();
    let mut elems = vm.iter(&args[0])?;
    while let Some(e) = pump(vm, &mut elems)? {
        out.push(e.as_str()?.to_string());
    }

    Ok(Val::Str(out.join(sep)))
}
