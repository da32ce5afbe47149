/// Python harness.
///
/// JSON-native like JavaScript: arguments are decoded from a JSON literal
/// and unpacked into the entry point. Driver imports are aliased (`__json`,
/// `__sys`) so they cannot collide with user imports.

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
    let merged = merge_fragments(Language::Python, adapter.unwrap_or(""), "", user_code);

    let args_json = Value::Array(args.json_args.clone()).to_string();
    let args_literal = json_string_literal(&args_json);

    let call = match (entry_override, adapter) {
        (Some(expr), _) => expr.to_string(),
        (None, Some(_)) => "__entry(*__args)".to_string(),
        (None, None) => "solve(*__args)".to_string(),
    };
    let guard = if entry_override.is_none() && adapter.is_none() {
        "if \"solve\" not in globals():\n    raise NameError(\"solve is not defined\")\n"
    } else {
        ""
    };

    format!(
        r#"{merged}

import json as __json
import sys as __sys

__args = __json.loads({args_literal})
{guard}__result = {call}
if __result is None:
    __output = ""
elif isinstance(__result, str):
    __output = __result
else:
    try:
        __output = __json.dumps(__result, separators=(",", ":"))
    except (TypeError, ValueError):
        __output = str(__result)
__sys.stdout.write(__output)
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse_arguments;

    const USER: &str = "def solve(nums, target):\n    return [0, 1]";

    #[test]
    fn test_driver_without_adapter_guards_solve() {
        let args = parse_arguments("[[2,7,11,15], 9]");
        let source = build(USER, &args, None, None);
        assert!(source.contains("__args = __json.loads(\"[[2,7,11,15],9]\")"));
        assert!(source.contains("if \"solve\" not in globals():"));
        assert!(source.contains("__result = solve(*__args)"));
        assert!(source.contains("__sys.stdout.write(__output)"));
    }

    #[test]
    fn test_driver_with_adapter_calls_entry() {
        let adapter = "def __entry(*args):\n    return solve(args[0], args[1])";
        let args = parse_arguments("[[2,7,11,15], 9]");
        let source = build(USER, &args, Some(adapter), None);
        assert!(source.contains("__result = __entry(*__args)"));
        assert!(!source.contains("globals()"));
    }

    #[test]
    fn test_compact_json_serialization_in_driver() {
        let args = parse_arguments("[1]");
        let source = build(USER, &args, None, None);
        // Matches the JavaScript JSON.stringify convention: no spaces
        assert!(source.contains("separators=(\",\", \":\")"));
    }

    #[test]
    fn test_user_imports_are_hoisted_above_code() {
        let user = "import math\ndef solve(n):\n    return math.isqrt(n)";
        let args = parse_arguments("[16]");
        let source = build(user, &args, None, None);
        assert!(source.starts_with("import math"));
    }
}
