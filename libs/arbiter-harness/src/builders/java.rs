/// Java harness.
///
/// String-serialized calling convention: the driver hands `Solution.solve`
/// a `String[]` of serialized arguments and the adapter rebuilds whatever
/// structures the user's signature needs. Assembly order is package lines,
/// deduplicated imports, user body, adapter body, then the `Main` driver -
/// Java requires `package` before `import` before type declarations.

use crate::args::ParsedArguments;
use crate::escape::json_string_literal;
use crate::imports::{import_key, upsert};
use crate::splitter::split_source;
use arbiter_common::types::Language;

pub(crate) fn build(
    user_code: &str,
    args: &ParsedArguments,
    adapter: Option<&str>,
    entry_override: Option<&str>,
) -> String {
    let user = split_source(Language::Java, user_code);
    let adapter = split_source(Language::Java, adapter.unwrap_or(""));

    let mut imports: Vec<(String, String)> = Vec::new();
    for line in adapter.imports.iter().chain(user.imports.iter()) {
        if let Some(key) = import_key(Language::Java, line) {
            upsert(&mut imports, key, line.clone());
        }
    }

    // JSON string escaping is valid in Java string literals
    let items: Vec<String> = args
        .string_args
        .iter()
        .map(|arg| json_string_literal(arg))
        .collect();
    let array_literal = if items.is_empty() {
        "new String[] {}".to_string()
    } else {
        format!("new String[] {{ {} }}", items.join(", "))
    };

    let call = entry_override
        .map(str::to_string)
        .unwrap_or_else(|| "Solution.solve(__args)".to_string());

    let mut sections = Vec::new();
    let package_line = user
        .package_lines
        .first()
        .or_else(|| adapter.package_lines.first());
    if let Some(package) = package_line {
        sections.push(package.clone());
    }
    if !imports.is_empty() {
        let block: Vec<&str> = imports.iter().map(|(_, stmt)| stmt.as_str()).collect();
        sections.push(block.join("\n"));
    }
    if !user.body.is_empty() {
        sections.push(user.body);
    }
    if !adapter.body.is_empty() {
        sections.push(adapter.body);
    }
    sections.push(format!(
        "public class Main {{\n    public static void main(String[] args) {{\n        String[] __args = {array_literal};\n        System.out.print({call});\n    }}\n}}"
    ));

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse_arguments;

    const USER: &str =
        "class Helper {\n    static int[] twoSum(int[] nums, int target) { return new int[] {0, 1}; }\n}";
    const ADAPTER: &str = "import java.util.Arrays;\n\nclass Solution {\n    static String solve(String[] args) {\n        return Arrays.toString(Helper.twoSum(new int[] {}, 0));\n    }\n}";

    #[test]
    fn test_driver_passes_string_args() {
        let args = parse_arguments("[[2,7,11,15], 9]");
        let source = build(USER, &args, Some(ADAPTER), None);
        assert!(source.contains("String[] __args = new String[] { \"[2,7,11,15]\", \"9\" };"));
        assert!(source.contains("System.out.print(Solution.solve(__args));"));
    }

    #[test]
    fn test_assembly_order() {
        let user = "package com.example;\nimport java.util.List;\nclass Helper {}";
        let args = parse_arguments("[1]");
        let source = build(user, &args, Some(ADAPTER), None);
        let package_pos = source.find("package com.example;").unwrap();
        let import_pos = source.find("import java.util.Arrays;").unwrap();
        let helper_pos = source.find("class Helper").unwrap();
        let adapter_pos = source.find("class Solution").unwrap();
        let main_pos = source.find("public class Main").unwrap();
        assert!(package_pos < import_pos);
        assert!(import_pos < helper_pos);
        assert!(helper_pos < adapter_pos);
        assert!(adapter_pos < main_pos);
    }

    #[test]
    fn test_duplicate_imports_collapse() {
        let user = "import java.util.Arrays;\nclass Helper {}";
        let args = parse_arguments("[1]");
        let source = build(user, &args, Some(ADAPTER), None);
        assert_eq!(source.matches("import java.util.Arrays;").count(), 1);
    }

    #[test]
    fn test_empty_args_array() {
        let args = parse_arguments("");
        let source = build(USER, &args, Some(ADAPTER), None);
        assert!(source.contains("String[] __args = new String[] {};"));
    }

    #[test]
    fn test_quotes_in_args_are_escaped() {
        let args = parse_arguments(r#"["a \"b\""]"#);
        let source = build(USER, &args, Some(ADAPTER), None);
        assert!(source.contains(r#"new String[] { "a \"b\"" };"#));
    }
}
