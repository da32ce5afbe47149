/// JavaScript harness.
///
/// JSON-native: the driver decodes the parsed arguments from a JSON literal
/// and spreads them into the entry point. With an adapter the entry point is
/// `__entry`; without one the user's own `solve` is called behind a guard.

use crate::args::ParsedArguments;
use crate::escape::json_string_literal;
use crate::imports::merge_fragments;
use arbiter_common::types::Language;
use serde_json::Value;

pub(crate) fn build(
    user_code: &str,
    args: &ParsedArguments,
    adapter: Option<&str>,
    entry_override: Option<&str>,
) -> String {
    let merged = merge_fragments(Language::Javascript, adapter.unwrap_or(""), "", user_code);

    let args_json = Value::Array(args.json_args.clone()).to_string();
    let args_literal = json_string_literal(&args_json);

    let call = match (entry_override, adapter) {
        (Some(expr), _) => expr.to_string(),
        (None, Some(_)) => "__entry(...__args)".to_string(),
        (None, None) => "solve(...__args)".to_string(),
    };
    let guard = if entry_override.is_none() && adapter.is_none() {
        "if (typeof solve !== \"function\") {\n    throw new TypeError(\"solve is not defined\");\n}\n"
    } else {
        ""
    };

    format!(
        r#"{merged}

const __args = JSON.parse({args_literal});
{guard}const __result = {call};
let __output;
if (__result === null || __result === undefined) {{
    __output = "";
}} else if (typeof __result === "string") {{
    __output = __result;
}} else {{
    try {{
        __output = JSON.stringify(__result);
    }} catch (err) {{
        __output = String(__result);
    }}
}}
process.stdout.write(__output);
"#
    )
}
