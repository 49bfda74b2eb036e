//! Tests for the runtime
//!
//! Organized by component

mod error_tests;
mod helpers;
mod index_tests;
