//! Test helpers for runtime tests

use crate::config::{Endianness, Platform, RuntimeConfig};
use crate::runtime::{Callable, Coroutine, GuestError, Module, Resume, Val, VM};
use std::cell::Cell;
use std::rc::Rc;

/// VM with default configuration and a fixed little-endian, case-sensitive platform
pub fn new_vm() -> VM {
    new_vm_with(RuntimeConfig::default())
}

pub fn new_vm_with(config: RuntimeConfig) -> VM {
    VM::with_platform(
        config,
        Platform {
            case_sensitive_filenames: true,
            endianness: Endianness::LittleEndian,
        },
    )
}

pub fn test_module(name: &str) -> Rc<Module> {
    Rc::new(Module::new(name, format!("test:{}", name), Vec::<String>::new()))
}

/// Generator yielding its bound arguments in order
///
/// `starts` counts coroutine construction, `resumes` counts resume calls.
pub fn echo_generator(starts: Rc<Cell<usize>>, resumes: Rc<Cell<usize>>) -> Rc<Callable> {
    Callable::generator("echo", move |args: Vec<Val>| {
        starts.set(starts.get() + 1);
        let resumes = Rc::clone(&resumes);
        let mut items = args.into_iter();
        let body = move |_vm: &mut VM| -> Result<Resume, GuestError> {
            resumes.set(resumes.get() + 1);
            Ok(match items.next() {
                Some(v) => Resume::Yield(v),
                None => Resume::Complete,
            })
        };
        Ok(Box::new(body) as Box<dyn Coroutine>)
    })
}

/// Procedure returning a fixed string, counting invocations
pub fn counting_procedure(result: &'static str, calls: Rc<Cell<usize>>) -> Rc<Callable> {
    Callable::procedure("done", move |_vm: &mut VM, _args: &[Val]| {
        calls.set(calls.get() + 1);
        Ok(Val::Str(result.to_string()))
    })
}

pub fn ints(values: &[i64]) -> Vec<Val> {
    values.iter().map(|i| Val::Int(*i)).collect()
}
