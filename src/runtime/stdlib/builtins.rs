//! Builtins module: iteration sources

use super::{expect_args, importing_module};
use crate::runtime::computation::{Callable, Coroutine, Resume};
use crate::runtime::errors::GuestError;
use crate::runtime::types::Val;
use crate::runtime::vm::VM;

pub fn import(vm: &mut VM, _args: &[Val]) -> Result<Val, GuestError> {
    let module = importing_module(vm)?;
    module.define_func(Callable::generator("iter", start_iter));
    module.define_func(Callable::generator("range", start_range));
    Ok(Val::Null)
}

/* ===================== iter ===================== */

/// Cursor over a snapshot of a sequence's elements
struct SeqCursor {
    items: Vec<Val>,
    next: usize,
}

impl Coroutine for SeqCursor {
    fn resume(&mut self, _vm: &mut VM) -> Result<Resume, GuestError> {
        match self.items.get(self.next) {
            Some(v) => {
                self.next += 1;
                Ok(Resume::Yield(v.clone()))
            }
            None => Ok(Resume::Complete),
        }
    }
}

/// iter(seq) - lists yield elements, strings yield one-character strings
fn start_iter(args: Vec<Val>) -> Result<Box<dyn Coroutine>, GuestError> {
    expect_args("iter", &args, 1)?;
    let items = match args.into_iter().next() {
        Some(Val::List(items)) => items,
        Some(Val::Str(s)) => s.chars().map(|c| Val::Str(c.to_string())).collect(),
        Some(other) => return Err(GuestError::type_error("sequence", other.type_name())),
        None => vec![],
    };
    Ok(Box::new(SeqCursor { items, next: 0 }))
}

/* ===================== range ===================== */

struct RangeCursor {
    next: i64,
    end: i64,
}

impl Coroutine for RangeCursor {
    fn resume(&mut self, _vm: &mut VM) -> Result<Resume, GuestError> {
        if self.next >= self.end {
            return Ok(Resume::Complete);
        }
        let v = self.next;
        self.next += 1;
        Ok(Resume::Yield(Val::Int(v)))
    }
}

/// range(start, end) - integers in `[start, end)`
fn start_range(args: Vec<Val>) -> Result<Box<dyn Coroutine>, GuestError> {
    expect_args("range", &args, 2)?;
    let start = args[0].as_int()?;
    let end = args[1].as_int()?;
    Ok(Box::new(RangeCursor { next: start, end }))
}
