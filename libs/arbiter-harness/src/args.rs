/// Test-Case Argument Parser
///
/// Problem authors write test inputs informally: sometimes a JSON array
/// (`[[2,7,11,15], 9]`), sometimes assignment lists
/// (`nums = [2,7,11,15], target = 9`), sometimes plain text. Every harness
/// invokes the entry point positionally, so this module recovers one
/// consistent ordered argument list regardless of authoring style.
///
/// Parse ambiguity is never an error: inputs that match no recognized shape
/// fall back to a single verbatim string argument.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[A-Za-z_$][A-Za-z0-9_$]*\s*=\s*(.+)$").expect("valid regex"));

/// Arguments recovered from one test case input.
/// `json_args` feeds the JSON-native harnesses (JavaScript, Python);
/// `string_args` feeds the string-serialized ones (Java, C++, C).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArguments {
    pub json_args: Vec<Value>,
    pub string_args: Vec<String>,
}

impl ParsedArguments {
    fn from_values(json_args: Vec<Value>) -> Self {
        let string_args = json_args.iter().map(stringify_arg).collect();
        ParsedArguments {
            json_args,
            string_args,
        }
    }
}

/// Convert a free-form test case input into an ordered argument list.
///
/// Priority order:
/// 1. empty input -> no arguments
/// 2. JSON array -> its elements; JSON object with an `args` array -> that
///    array; any other JSON value -> a single argument
/// 3. top-level comma split with `name = value` extraction
/// 4. the whole input as one verbatim string argument
pub fn parse_arguments(raw: &str) -> ParsedArguments {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedArguments::default();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let json_args = match value {
            Value::Array(items) => items,
            Value::Object(map) => {
                if let Some(Value::Array(items)) = map.get("args") {
                    items.clone()
                } else {
                    vec![Value::Object(map)]
                }
            }
            other => vec![other],
        };
        return ParsedArguments::from_values(json_args);
    }

    let segments = split_top_level(trimmed);
    let mut saw_assignment = false;
    let mut values = Vec::with_capacity(segments.len());
    for segment in &segments {
        if let Some(captures) = ASSIGNMENT.captures(segment) {
            saw_assignment = true;
            values.push(literal_or_string(&captures[1]));
        } else {
            values.push(literal_or_string(segment));
        }
    }
    if saw_assignment {
        return ParsedArguments::from_values(values);
    }

    ParsedArguments::from_values(vec![Value::String(raw.to_string())])
}

/// Split on commas at bracket depth zero. Unmatched closing brackets are
/// ignored (depth floor of 0) so malformed input still yields a best-effort
/// split instead of an error.
pub(crate) fn split_top_level(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth: u32 = 0;

    for ch in input.chars() {
        match ch {
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                segments.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    segments.push(current.trim().to_string());
    segments
}

fn literal_or_string(segment: &str) -> Value {
    let trimmed = segment.trim();
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

fn stringify_arg(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_array_input() {
        let parsed = parse_arguments("[[2,7,11,15], 9]");
        assert_eq!(parsed.json_args, vec![json!([2, 7, 11, 15]), json!(9)]);
        assert_eq!(parsed.string_args, vec!["[2,7,11,15]", "9"]);
    }

    #[test]
    fn test_json_object_with_args() {
        let parsed = parse_arguments(r#"{"args": ["abc", 3]}"#);
        assert_eq!(parsed.json_args, vec![json!("abc"), json!(3)]);
        assert_eq!(parsed.string_args, vec!["abc", "3"]);
    }

    #[test]
    fn test_json_object_without_args_is_single_argument() {
        let parsed = parse_arguments(r#"{"n": 5}"#);
        assert_eq!(parsed.json_args, vec![json!({"n": 5})]);
    }

    #[test]
    fn test_json_scalar_is_single_argument() {
        let parsed = parse_arguments("42");
        assert_eq!(parsed.json_args, vec![json!(42)]);
        assert_eq!(parsed.string_args, vec!["42"]);
    }

    #[test]
    fn test_assignment_list() {
        let parsed = parse_arguments("nums = [2,7,11,15], target = 9");
        assert_eq!(parsed.json_args, vec![json!([2, 7, 11, 15]), json!(9)]);
    }

    #[test]
    fn test_assignment_with_string_rhs() {
        let parsed = parse_arguments(r#"s = "hello", k = 2"#);
        assert_eq!(parsed.json_args, vec![json!("hello"), json!(2)]);
    }

    #[test]
    fn test_assignment_rhs_that_is_not_json_stays_raw() {
        let parsed = parse_arguments("head = 1->2->3");
        assert_eq!(parsed.json_args, vec![json!("1->2->3")]);
    }

    #[test]
    fn test_empty_input_yields_no_arguments() {
        assert_eq!(parse_arguments("").json_args, Vec::<Value>::new());
        assert_eq!(parse_arguments("   ").json_args, Vec::<Value>::new());
    }

    #[test]
    fn test_raw_string_fallback() {
        let parsed = parse_arguments("hello world");
        assert_eq!(parsed.json_args, vec![json!("hello world")]);
        assert_eq!(parsed.string_args, vec!["hello world"]);
    }

    #[test]
    fn test_split_respects_nesting() {
        assert_eq!(split_top_level("a(1,2), b"), vec!["a(1,2)", "b"]);
        assert_eq!(
            split_top_level("[1, [2, 3]], {\"a\": 1}, x"),
            vec!["[1, [2, 3]]", "{\"a\": 1}", "x"]
        );
    }

    #[test]
    fn test_split_tolerates_unbalanced_brackets() {
        // Depth never goes negative; stray closers are ignored
        assert_eq!(split_top_level("a)), b"), vec!["a))", "b"]);
        assert_eq!(split_top_level("a((1, b"), vec!["a((1, b"]);
    }

    #[test]
    fn test_stringify_rules() {
        let parsed = parse_arguments(r#"[null, "s", 1.5, true, [1,2], {"k":1}]"#);
        assert_eq!(
            parsed.string_args,
            vec!["", "s", "1.5", "true", "[1,2]", "{\"k\":1}"]
        );
    }
}
