//! Entry-point classification for a batch of files.
//!
//! Runs before per-file analysis so the caller can group results into
//! "main" and "library" buckets. Classification fails open toward
//! "library file": unreadable or unparsable input never becomes an
//! entry point, and I/O errors are swallowed here rather than
//! propagated.

use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser};

/// Literal marker for a runnable Java file.
const JAVA_MAIN_MARKER: &str = "public static void main";

/// Partition paths into (library files, entry-point files).
///
/// Relative order is preserved within each partition. The entry-point
/// test depends on the file kind: literal marker containment for Java,
/// a module-level `__name__` comparison for Python.
pub fn split_entry_points(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut sub = Vec::new();
    let mut main = Vec::new();

    for path in paths {
        if is_entry_point(path) {
            main.push(path.clone());
        } else {
            sub.push(path.clone());
        }
    }

    (sub, main)
}

/// Whether a single file contains a recognized program-entry marker.
pub fn is_entry_point(path: &Path) -> bool {
    let code = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return false,
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some("java") => code.contains(JAVA_MAIN_MARKER),
        Some("py") => python_has_main_guard(&code),
        _ => false,
    }
}

/// Whether Python source has a top-level `if __name__ == ...:` guard.
fn python_has_main_guard(code: &str) -> bool {
    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .is_err()
    {
        return false;
    }
    let tree = match parser.parse(code, None) {
        Some(t) => t,
        None => return false,
    };

    let root = tree.root_node();
    if root.has_error() {
        return false;
    }

    let mut cursor = root.walk();
    let has_guard = root
        .named_children(&mut cursor)
        .any(|n| is_main_guard(n, code));
    has_guard
}

/// An if-statement whose condition compares the identifier `__name__`.
fn is_main_guard(node: Node, code: &str) -> bool {
    if node.kind() != "if_statement" {
        return false;
    }
    let cond = match node.child_by_field_name("condition") {
        Some(c) => c,
        None => return false,
    };
    if cond.kind() != "comparison_operator" {
        return false;
    }
    let left = match cond.named_child(0) {
        Some(l) => l,
        None => return false,
    };
    left.kind() == "identifier" && left.utf8_text(code.as_bytes()).unwrap_or("") == "__name__"
}
