//! Structural pipeline: Python analysis over a tree-sitter syntax tree.

use std::path::Path;
use std::time::Instant;

use lazy_static::lazy_static;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, Tree};

use crate::analysis::{
    format_byte_size, AnalyzeError, ComplexityClass, FileStats, FunctionDetail, SourceAnalyzer,
};

/// Declaration counters collected in one full-tree pass.
///
/// While-loops are deliberately absent from the loop capture: the loop
/// counter tracks `for` statements only, matching the stat the nesting
/// walk does NOT use. The pattern pipeline counts both kinds.
const COUNTER_QUERY: &str = r#"
(class_definition) @class
(for_statement) @for
(import_statement) @import
(import_from_statement) @import
(assignment) @assign
"#;

/// Function definitions anywhere in the tree, nested ones included.
const FUNCTION_QUERY: &str = r#"
(function_definition
  name: (identifier) @func_name
) @function
"#;

/// Literal connection calls, checked in order of first detection.
const DB_KEYWORDS: &[&str] = &[
    "mysql.connector.connect",
    "sqlite3.connect",
    "psycopg2.connect",
];

lazy_static! {
    /// Word-boundary presence checks for each connection call.
    static ref DB_CALL_PATTERNS: Vec<(&'static str, Regex)> = DB_KEYWORDS
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(kw))).unwrap();
            (*kw, re)
        })
        .collect();

    /// Database-name patterns, tried in priority order; first match wins
    /// and later patterns are not tried.
    static ref MYSQL_DB_NAME: Regex = Regex::new(
        r#"(?s)mysql\.connector\.connect\([^)]*database\s*=\s*['"](\w+)['"]"#
    ).unwrap();
    static ref SQLITE_DB_NAME: Regex = Regex::new(
        r#"sqlite3\.connect\(\s*['"]([\w.-]+)['"]\s*\)"#
    ).unwrap();
    static ref PSYCOPG_DB_NAME: Regex = Regex::new(
        r#"(?s)psycopg2\.connect\([^)]*database\s*=\s*['"](\w+)['"]"#
    ).unwrap();
}

/// A function pulled out of the tree together with its source slice.
#[derive(Debug, Clone)]
pub struct ExtractedFunction {
    /// The function's source text, sliced by line span.
    pub code: String,
    /// Name, parameters, docstring and line span.
    pub detail: FunctionDetail,
}

pub struct PythonAnalyzer {
    language: Language,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn parse_tree(&self, source: &str) -> anyhow::Result<Tree> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source"))
    }

    /// Single pre-order pass filling the declaration counters.
    fn count_declarations(
        &self,
        root: Node,
        source: &str,
        stats: &mut FileStats,
    ) -> anyhow::Result<()> {
        let query = Query::new(&self.language, COUNTER_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, source.as_bytes());

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let name = query.capture_names()[capture.index as usize];
                match name {
                    "class" => stats.classes += 1,
                    "for" => stats.loops += 1,
                    "import" => stats.imports += 1,
                    "assign" => stats.variables += 1,
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Estimate the complexity class from loop nesting and recursion.
    ///
    /// Two independent walks: maximum for/while nesting depth, and a
    /// per-function scan for self-calls. Recursion takes absolute
    /// priority over nesting depth.
    fn estimate_complexity(&self, root: Node, source: &str) -> ComplexityClass {
        if has_recursion(root, source) {
            return ComplexityClass::Exponential;
        }
        ComplexityClass::from_nesting(max_loop_depth(root, 0))
    }

    /// Extract every function definition in the tree, nested ones
    /// included, with its source slice and metadata.
    pub fn extract_functions(
        &self,
        root: Node,
        source: &str,
    ) -> anyhow::Result<Vec<ExtractedFunction>> {
        let query = Query::new(&self.language, FUNCTION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, source.as_bytes());

        let source_lines: Vec<&str> = source.lines().collect();
        let mut functions = Vec::new();

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut func_node = None;

            for capture in m.captures {
                let capture_name = query.capture_names()[capture.index as usize];
                match capture_name {
                    "func_name" => name = node_text(capture.node, source).to_string(),
                    "function" => func_node = Some(capture.node),
                    _ => {}
                }
            }

            let node = match func_node {
                Some(n) if !name.is_empty() => n,
                _ => continue,
            };

            let line_start = node.start_position().row + 1;
            let line_end = Some(node.end_position().row + 1);
            let code = function_source(&source_lines, line_start, line_end);

            functions.push(ExtractedFunction {
                code,
                detail: FunctionDetail {
                    name,
                    args: parameter_names(node, source),
                    docstring: docstring(node, source),
                    line_start,
                    line_end,
                },
            });
        }

        functions.sort_by_key(|f| (f.detail.line_start, f.detail.name.clone()));
        Ok(functions)
    }

    fn collect_metrics(&self, root: Node, source: &str, stats: &mut FileStats) -> anyhow::Result<()> {
        self.count_declarations(root, source, stats)?;
        stats.time_complexity = self.estimate_complexity(root, source);
        stats.function_details = self
            .extract_functions(root, source)?
            .into_iter()
            .map(|f| f.detail)
            .collect();
        stats.functions = stats.function_details.len();
        Ok(())
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAnalyzer for PythonAnalyzer {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn analyze(&self, _path: &Path, source: &str) -> (FileStats, Vec<AnalyzeError>) {
        let start = Instant::now();
        let mut stats = FileStats::default();
        let mut errors = Vec::new();

        // Size and line count are early passes, reported even when
        // parsing fails.
        stats.file_bytes = format_byte_size(source.len() as u64);
        stats.lines = source.lines().count();

        for (kw, re) in DB_CALL_PATTERNS.iter() {
            if re.is_match(source) {
                stats.database.push((*kw).to_string());
            }
        }
        if let Some(name) = detect_db_name(source) {
            stats.database_name.push(name);
        }

        match self.parse_tree(source) {
            Ok(tree) => {
                let root = tree.root_node();
                if root.has_error() {
                    // No fallback to the pattern pipeline.
                    errors.push(AnalyzeError::Syntax {
                        line: first_error_line(root),
                    });
                } else if let Err(e) = self.collect_metrics(root, source, &mut stats) {
                    errors.push(AnalyzeError::Analysis(e.to_string()));
                }
            }
            Err(e) => errors.push(AnalyzeError::Analysis(e.to_string())),
        }

        stats.elapsed = start.elapsed().as_secs_f64();
        (stats, errors)
    }
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Pre-order visit of every node under `node`, inclusive.
fn walk<'a, F: FnMut(Node<'a>)>(node: Node<'a>, f: &mut F) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, f);
    }
}

/// Try the database-name patterns in priority order.
fn detect_db_name(source: &str) -> Option<String> {
    for re in [&*MYSQL_DB_NAME, &*SQLITE_DB_NAME, &*PSYCOPG_DB_NAME] {
        if let Some(cap) = re.captures(source) {
            return Some(cap[1].to_string());
        }
    }
    None
}

/// Maximum nesting depth of for/while constructs.
///
/// While IS counted here, unlike the declaration-counter pass.
fn max_loop_depth(node: Node, depth: u32) -> u32 {
    let depth = if matches!(node.kind(), "for_statement" | "while_statement") {
        depth + 1
    } else {
        depth
    };

    let mut max = depth;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        max = max.max(max_loop_depth(child, depth));
    }
    max
}

/// Whether any function in the tree calls itself by name.
fn has_recursion(root: Node, source: &str) -> bool {
    let mut functions = Vec::new();
    walk(root, &mut |n| {
        if n.kind() == "function_definition" {
            functions.push(n);
        }
    });
    functions.iter().any(|f| calls_itself(*f, source))
}

/// Scan a function's entire subtree for a call whose target identifier
/// equals the function's own name.
fn calls_itself(func: Node, source: &str) -> bool {
    let name_node = match func.child_by_field_name("name") {
        Some(n) => n,
        None => return false,
    };
    let name = node_text(name_node, source);

    let mut found = false;
    walk(func, &mut |n| {
        if found || n.kind() != "call" {
            return;
        }
        if let Some(callee) = n.child_by_field_name("function") {
            if callee.kind() == "identifier" && node_text(callee, source) == name {
                found = true;
            }
        }
    });
    found
}

/// Line of the first ERROR or missing node, 1-based.
fn first_error_line(root: Node) -> usize {
    let mut line = None;
    walk(root, &mut |n| {
        if line.is_none() && (n.is_error() || n.is_missing()) {
            line = Some(n.start_position().row + 1);
        }
    });
    line.unwrap_or(1)
}

/// Slice a function's source text by line span.
///
/// `line_start` is 1-based; the slice runs to `line_end` inclusive.
/// When the end line is unknown the slice falls back to ten lines past
/// the start, an acknowledged approximation.
fn function_source(lines: &[&str], line_start: usize, line_end: Option<usize>) -> String {
    let start = line_start.saturating_sub(1).min(lines.len());
    let end = line_end.unwrap_or(start + 10).min(lines.len());
    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n")
}

/// Positional parameter names in declaration order.
///
/// `*args` / `**kwargs` are not positional parameters and are skipped.
fn parameter_names(func: Node, source: &str) -> Vec<String> {
    let params = match func.child_by_field_name("parameters") {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut names = Vec::new();
    let mut cursor = params.walk();
    for child in params.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => names.push(node_text(child, source).to_string()),
            "typed_parameter" => {
                if let Some(id) = child.named_child(0) {
                    if id.kind() == "identifier" {
                        names.push(node_text(id, source).to_string());
                    }
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                if let Some(id) = child.child_by_field_name("name") {
                    if id.kind() == "identifier" {
                        names.push(node_text(id, source).to_string());
                    }
                }
            }
            _ => {}
        }
    }
    names
}

/// Docstring of a function: a string literal as the first body
/// statement, with quotes stripped.
fn docstring(func: Node, source: &str) -> String {
    let body = match func.child_by_field_name("body") {
        Some(b) => b,
        None => return String::new(),
    };
    let first = match body.named_child(0) {
        Some(n) if n.kind() == "expression_statement" => n,
        _ => return String::new(),
    };
    let expr = match first.named_child(0) {
        Some(e) if e.kind() == "string" => e,
        _ => return String::new(),
    };
    strip_string_quotes(node_text(expr, source)).trim().to_string()
}

fn strip_string_quotes(raw: &str) -> &str {
    for q in ["\"\"\"", "'''", "\"", "'"] {
        if raw.len() >= 2 * q.len() && raw.starts_with(q) && raw.ends_with(q) {
            return &raw[q.len()..raw.len() - q.len()];
        }
    }
    raw
}
