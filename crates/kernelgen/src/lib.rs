//! i915 perf OA metric set kernel code generator.

use clap as _;

/// Line-oriented text writer for generated artifacts.
pub mod codegen;
/// C rendering of resolved metric sets.
pub mod emit;
/// Generator error types.
pub mod error;
/// Top-level generation driver.
pub mod generate;
/// Diagnostic logging setup.
pub mod logging;

pub use error::GenerateError;
pub use generate::{generate, GenerateRequest, GenerateResult};
