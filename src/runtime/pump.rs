//! Pump drivers
//!
//! The pump is how for-loops, spreads, and built-in consumers iterate: step a
//! computation until it reports exhaustion. Exhaustion means "stop", never
//! failure; errors come only from the routine itself.

use super::computation::{Computation, StepResult};
use super::errors::GuestError;
use super::types::Val;
use super::vm::VM;

/// Advance once, mapping exhaustion to `None`
pub fn pump(vm: &mut VM, computation: &mut Computation) -> Result<Option<Val>, GuestError> {
    match computation.advance(vm)? {
        StepResult::Produced(v) => Ok(Some(v)),
        StepResult::Exhausted => Ok(None),
    }
}

/// Drive a computation to exhaustion, keeping every produced value
pub fn collect(vm: &mut VM, mut computation: Computation) -> Result<Vec<Val>, GuestError> {
    let mut out = Vec::new();
    while let Some(v) = pump(vm, &mut computation)? {
        out.push(v);
    }
    Ok(out)
}

/// Drive a computation to exhaustion, discarding values
///
/// Returns how many values were produced.
pub fn run_until_exhausted(vm: &mut VM, computation: &mut Computation) -> Result<usize, GuestError> {
    let mut produced = 0;
    loop {
        match computation.advance(vm)? {
            StepResult::Produced(_) => produced += 1,
            StepResult::Exhausted => break,
        }
    }
    Ok(produced)
}
