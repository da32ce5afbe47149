/// Harness Generation Core
///
/// **Core Responsibility:**
/// Turn (user code, hidden adapter code, one test case input) into a single
/// runnable program that feeds the parsed arguments to the canonical entry
/// point and writes the serialized result to standard output.
///
/// **Critical Properties:**
/// - Pure: no I/O, no clocks, no randomness
/// - Deterministic: identical inputs produce byte-identical source
/// - Per-language: five builders behind one flat dispatch
///
/// **Why This Exists:**
/// User submissions, adapters and test inputs are authored independently;
/// this crate is the only place that knows how to combine them per language.

pub mod args;
pub mod builders;
pub mod escape;
pub mod imports;
pub mod splitter;

pub use args::{parse_arguments, ParsedArguments};
pub use builders::build_harness;
pub use imports::merge_fragments;
pub use splitter::{split_source, SplitSource};

use thiserror::Error;

/// Failures raised while constructing a harnessed program.
/// These are per-test-case failures - the evaluator records them on the
/// affected test case and moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    #[error("code cannot be empty")]
    EmptyCode,
    #[error("test input exceeds maximum size of {limit} bytes")]
    InputTooLarge { limit: usize },
}
