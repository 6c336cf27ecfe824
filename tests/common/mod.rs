//! Common test utilities for adapter integration tests

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::{adapter_over, init_tracing, settings, table, CountingSource};
