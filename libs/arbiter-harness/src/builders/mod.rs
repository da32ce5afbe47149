/// Per-Language Harness Builders
///
/// Five code generators behind one flat dispatch. The builders share almost
/// nothing beyond their contract - string formatting, escaping and calling
/// conventions differ per language - so this is a closed match over
/// `Language`, not a trait hierarchy.
///
/// Contract: given user code, optional hidden adapter code and one test
/// case input, emit a complete program that calls the canonical entry point
/// with the parsed arguments and writes the serialized result to standard
/// output with no extraneous text.

mod c;
mod cpp;
mod java;
mod javascript;
mod python;

use crate::args::parse_arguments;
use crate::HarnessError;
use arbiter_common::types::{Language, MAX_TEST_INPUT_BYTES};

/// Build the runnable source for one (submission, test case) pair.
///
/// Deterministic: repeated calls with identical inputs produce byte-identical
/// output. Fails fast - before any queue or network activity - when the user
/// code is empty or the test input is oversized.
///
/// `entry_override` replaces the default entry-point invocation expression;
/// the generated driver binds the parsed arguments to `__args` either way.
pub fn build_harness(
    language: Language,
    user_code: &str,
    input: &str,
    adapter_code: Option<&str>,
    entry_override: Option<&str>,
) -> Result<String, HarnessError> {
    if user_code.trim().is_empty() {
        return Err(HarnessError::EmptyCode);
    }
    if input.len() > MAX_TEST_INPUT_BYTES {
        return Err(HarnessError::InputTooLarge {
            limit: MAX_TEST_INPUT_BYTES,
        });
    }

    let adapter = adapter_code.map(str::trim).filter(|code| !code.is_empty());
    let args = parse_arguments(input);

    let source = match language {
        Language::Javascript => javascript::build(user_code, &args, adapter, entry_override),
        Language::Python => python::build(user_code, &args, adapter, entry_override),
        Language::Java => java::build(user_code, &args, adapter, entry_override),
        Language::Cpp => cpp::build(user_code, &args, adapter, entry_override),
        Language::C => c::build(user_code, &args, adapter, entry_override),
    };
    Ok(source)
}
