/// Import/Include Deduplication
///
/// Adapter, starter and user code are authored independently and routinely
/// declare the same imports. This module recognizes import statements with
/// per-language regular expressions (a heuristic - a full lexer per language
/// is out of proportion here), keys them by imported module, and merges the
/// fragments so each module is imported exactly once.
///
/// Precedence on key collisions: user > starter > adapter. The user can
/// override an adapter import while still inheriting the ones it left alone.

use arbiter_common::types::Language;
use once_cell::sync::Lazy;
use regex::Regex;

static JS_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*import\s+(?:.+?\s+from\s+)?['"]([^'"]+)['"]\s*;?\s*$"#).expect("valid regex")
});
static JS_REQUIRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:const|let|var)\s+.+?=\s*require\(\s*['"]([^'"]+)['"]\s*\)\s*;?\s*$"#)
        .expect("valid regex")
});
static PY_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+([A-Za-z_][\w.]*)(?:\s+as\s+\w+)?\s*$").expect("valid regex")
});
static PY_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*from\s+([A-Za-z_][\w.]*)\s+import\s+.+$").expect("valid regex")
});
static JAVA_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;\s*$").expect("valid regex")
});
static C_INCLUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#\s*include\s*([<"][^>"]+[>"])\s*$"#).expect("valid regex")
});

/// Module key for an import statement, or None when the line is not an
/// import in the given language. C and C++ keys keep their delimiters:
/// `<vector>` and `"vector"` name different headers.
pub(crate) fn import_key(language: Language, line: &str) -> Option<String> {
    let captures = match language {
        Language::Javascript => JS_IMPORT.captures(line).or_else(|| JS_REQUIRE.captures(line)),
        Language::Python => PY_FROM.captures(line).or_else(|| PY_IMPORT.captures(line)),
        Language::Java => JAVA_IMPORT.captures(line),
        Language::Cpp | Language::C => C_INCLUDE.captures(line),
    };
    captures.map(|c| c[1].to_string())
}

/// Keyed import list preserving first-seen order; a later write for an
/// existing key replaces the statement text in place.
pub(crate) fn upsert(imports: &mut Vec<(String, String)>, key: String, statement: String) {
    if let Some(entry) = imports.iter_mut().find(|(k, _)| *k == key) {
        entry.1 = statement;
    } else {
        imports.push((key, statement));
    }
}

fn extract(language: Language, fragment: &str, imports: &mut Vec<(String, String)>) -> String {
    let mut body_lines = Vec::new();
    for line in fragment.lines() {
        match import_key(language, line) {
            Some(key) => upsert(imports, key, line.trim().to_string()),
            None => body_lines.push(line),
        }
    }
    body_lines.join("\n").trim_matches('\n').to_string()
}

/// Merge three independently authored fragments into one source text:
/// a single deduplicated import block followed by the non-empty bodies.
/// Adapter code lands after user code so user declarations are in scope
/// before the adapter that calls them.
pub fn merge_fragments(language: Language, adapter: &str, starter: &str, user: &str) -> String {
    let mut imports: Vec<(String, String)> = Vec::new();

    // Insertion order adapter -> starter -> user gives user the last write
    let adapter_body = extract(language, adapter, &mut imports);
    let starter_body = extract(language, starter, &mut imports);
    let user_body = extract(language, user, &mut imports);

    let mut sections = Vec::new();
    if !imports.is_empty() {
        let block: Vec<&str> = imports.iter().map(|(_, stmt)| stmt.as_str()).collect();
        sections.push(block.join("\n"));
    }
    for body in [user_body, starter_body, adapter_body] {
        if !body.trim().is_empty() {
            sections.push(body);
        }
    }
    sections.join("\n\n")
}
