/// Source Header Splitter
///
/// Separates a source file's leading import/package header from its body so
/// builders can merge independently authored files without breaking language
/// ordering rules (Java wants `package` before `import` before types).
///
/// Only the leading header is hoisted: once a non-blank, non-header line is
/// seen, every later line - import-shaped or not - is body text. Stray
/// import-like text mid-body is just body text, matching normal language
/// semantics.

use crate::imports::import_key;
use arbiter_common::types::Language;
use once_cell::sync::Lazy;
use regex::Regex;

static JAVA_PACKAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*package\s+[\w.]+\s*;\s*$").expect("valid regex"));

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitSource {
    pub package_lines: Vec<String>,
    pub imports: Vec<String>,
    pub body: String,
}

pub fn split_source(language: Language, source: &str) -> SplitSource {
    let mut split = SplitSource::default();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_header = true;

    for line in source.lines() {
        if in_header {
            if line.trim().is_empty() {
                // Preserve intentional spacing without ending header mode
                body_lines.push(line);
                continue;
            }
            if language == Language::Java && JAVA_PACKAGE.is_match(line) {
                split.package_lines.push(line.trim().to_string());
                continue;
            }
            if import_key(language, line).is_some() {
                split.imports.push(line.trim().to_string());
                continue;
            }
            in_header = false;
        }
        body_lines.push(line);
    }

    split.body = body_lines.join("\n").trim_matches('\n').to_string();
    split
}
