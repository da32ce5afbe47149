/// C++ harness.
///
/// String-serialized calling convention with error containment: the entry
/// call is wrapped in try/catch and any exception prints a sentinel-prefixed
/// message to standard output, so the judge always gets text to compare (a
/// clean wrong answer) instead of a trapped signal.

use crate::args::ParsedArguments;
use crate::escape::c_string_literal;
use crate::imports::{import_key, upsert};
use crate::splitter::split_source;
use arbiter_common::types::Language;

/// Prefix for exceptions escaping the entry point.
pub const HARNESS_ERROR_SENTINEL: &str = "__HARNESS_ERROR__";

const DRIVER_INCLUDES: [&str; 3] = [
    "#include <iostream>",
    "#include <string>",
    "#include <vector>",
];

pub(crate) fn build(
    user_code: &str,
    args: &ParsedArguments,
    adapter: Option<&str>,
    entry_override: Option<&str>,
) -> String {
    let user = split_source(Language::Cpp, user_code);
    let adapter = split_source(Language::Cpp, adapter.unwrap_or(""));

    let mut includes: Vec<(String, String)> = Vec::new();
    for line in DRIVER_INCLUDES
        .iter()
        .copied()
        .chain(adapter.imports.iter().map(String::as_str))
        .chain(user.imports.iter().map(String::as_str))
    {
        if let Some(key) = import_key(Language::Cpp, line) {
            upsert(&mut includes, key, line.to_string());
        }
    }

    let items: Vec<String> = args
        .string_args
        .iter()
        .map(|arg| c_string_literal(arg))
        .collect();
    let array_literal = if items.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", items.join(", "))
    };

    let call = entry_override
        .map(str::to_string)
        .unwrap_or_else(|| "solve(__args)".to_string());

    let include_block: Vec<&str> = includes.iter().map(|(_, stmt)| stmt.as_str()).collect();

    let mut sections = vec![include_block.join("\n")];
    if !user.body.is_empty() {
        sections.push(user.body);
    }
    if !adapter.body.is_empty() {
        sections.push(adapter.body);
    }
    sections.push(format!(
        r#"int main() {{
    const std::vector<std::string> __args = {array_literal};
    try {{
        std::cout << {call};
    }} catch (const std::exception &err) {{
        std::cout << "{HARNESS_ERROR_SENTINEL}" << err.what();
    }} catch (...) {{
        std::cout << "{HARNESS_ERROR_SENTINEL}" << "unknown error";
    }}
    return 0;
}}"#
    ));

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}
