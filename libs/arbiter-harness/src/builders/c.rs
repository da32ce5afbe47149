/// C harness.
///
/// No exception model: the entry point returns a `const char *` and NULL is
/// treated as empty output. Arguments arrive argv-style; with zero arguments
/// the entry point is called as `solve(0, NULL)` since an empty array
/// initializer is not valid C.

use crate::args::ParsedArguments;
use crate::escape::c_string_literal;
use crate::imports::{import_key, upsert};
use crate::splitter::split_source;
use arbiter_common::types::Language;

const DRIVER_INCLUDES: [&str; 2] = ["#include <stdio.h>", "#include <stddef.h>"];

pub(crate) fn build(
    user_code: &str,
    args: &ParsedArguments,
    adapter: Option<&str>,
    entry_override: Option<&str>,
) -> String {
    let user = split_source(Language::C, user_code);
    let adapter = split_source(Language::C, adapter.unwrap_or(""));

    let mut includes: Vec<(String, String)> = Vec::new();
    for line in DRIVER_INCLUDES
        .iter()
        .copied()
        .chain(adapter.imports.iter().map(String::as_str))
        .chain(user.imports.iter().map(String::as_str))
    {
        if let Some(key) = import_key(Language::C, line) {
            upsert(&mut includes, key, line.to_string());
        }
    }

    let items: Vec<String> = args
        .string_args
        .iter()
        .map(|arg| c_string_literal(arg))
        .collect();

    let (argv_decl, default_call) = if items.is_empty() {
        (String::new(), "solve(0, NULL)".to_string())
    } else {
        (
            format!(
                "    const char *__argv[] = {{ {} }};\n",
                items.join(", ")
            ),
            format!("solve({}, __argv)", items.len()),
        )
    };
    let call = entry_override.map(str::to_string).unwrap_or(default_call);

    let include_block: Vec<&str> = includes.iter().map(|(_, stmt)| stmt.as_str()).collect();

    let mut sections = vec![include_block.join("\n")];
    if !user.body.is_empty() {
        sections.push(user.body);
    }
    if !adapter.body.is_empty() {
        sections.push(adapter.body);
    }
    sections.push(format!(
        "int main(void) {{\n{argv_decl}    const char *__output = {call};\n    if (__output != NULL) {{\n        fputs(__output, stdout);\n    }}\n    return 0;\n}}"
    ));

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}
