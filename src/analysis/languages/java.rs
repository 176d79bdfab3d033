//! Pattern pipeline: Java analysis over raw text with regular expressions.
//!
//! No parse step: a fixed battery of regexes approximates the structural
//! pipeline's metric set. The heuristics are intentionally rough - the
//! method signature pattern is not a parser, and the nested-loop check
//! can false-positive on sequential loops. Recursion is never detected
//! here.

use std::path::Path;
use std::time::Instant;

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{
    format_byte_size, AnalyzeError, ComplexityClass, FileStats, FunctionDetail, SourceAnalyzer,
};

lazy_static! {
    /// `class <identifier>` tokens.
    static ref CLASS_PATTERN: Regex = Regex::new(r"\bclass\s+\w+").unwrap();

    /// Method-signature shape: optional modifier, a return-type token,
    /// a name, an argument list, then `{` or anything but `;`.
    static ref METHOD_PATTERN: Regex =
        Regex::new(r"(public|protected|private|static|\s) +[\w<>\[\]]+\s+(\w+) *\([^)]*\) *(\{?|[^;])")
            .unwrap();

    /// Primitive or common container type followed by an identifier.
    static ref VARIABLE_PATTERN: Regex =
        Regex::new(r"\b(int|String|boolean|double|float|long|char|List|Map|Set)\s+\w+").unwrap();

    /// `import <dotted.path>`.
    static ref IMPORT_PATTERN: Regex = Regex::new(r"import\s+[\w.]+").unwrap();

    static ref FOR_PATTERN: Regex = Regex::new(r"\bfor\s*\(").unwrap();
    static ref WHILE_PATTERN: Regex = Regex::new(r"\bwhile\s*\(").unwrap();

    /// JDBC-style connection string; first capture is the database name.
    static ref JDBC_URL_PATTERN: Regex = Regex::new(r"jdbc:\w+://[^/]+/(\w+)").unwrap();

    /// Nested-loop shapes, checked triple first. Dotall: the loops may
    /// span lines, and need only reappear somewhere after each other.
    static ref TRIPLE_LOOP_PATTERN: Regex =
        Regex::new(r"(?s)for\s*\(.*for\s*\(.*for\s*\(").unwrap();
    static ref DOUBLE_LOOP_PATTERN: Regex = Regex::new(r"(?s)for\s*\(.*for\s*\(").unwrap();
}

pub struct JavaAnalyzer;

impl JavaAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAnalyzer for JavaAnalyzer {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn analyze(&self, _path: &Path, source: &str) -> (FileStats, Vec<AnalyzeError>) {
        let start = Instant::now();
        let mut stats = FileStats::default();

        stats.lines = source.lines().count();
        stats.file_bytes = format_byte_size(source.len() as u64);

        stats.classes = CLASS_PATTERN.find_iter(source).count();

        // One detail per signature match, name only - parameters,
        // docstring and line numbers stay empty for this pipeline.
        for cap in METHOD_PATTERN.captures_iter(source) {
            stats.function_details.push(FunctionDetail {
                name: cap[2].to_string(),
                args: Vec::new(),
                docstring: String::new(),
                line_start: 0,
                line_end: None,
            });
        }
        stats.functions = stats.function_details.len();

        stats.variables = VARIABLE_PATTERN.find_iter(source).count();
        stats.imports = IMPORT_PATTERN.find_iter(source).count();
        stats.loops =
            FOR_PATTERN.find_iter(source).count() + WHILE_PATTERN.find_iter(source).count();

        if source.contains("DriverManager.getConnection") || source.contains("DataSource") {
            stats.database.push("JDBC".to_string());
        }
        if source.contains("EntityManager") || source.contains("@Entity") {
            stats.database.push("JPA/Hibernate".to_string());
        }

        if let Some(cap) = JDBC_URL_PATTERN.captures(source) {
            stats.database_name.push(cap[1].to_string());
        }

        stats.time_complexity = if TRIPLE_LOOP_PATTERN.is_match(source) {
            ComplexityClass::Cubic
        } else if DOUBLE_LOOP_PATTERN.is_match(source) {
            ComplexityClass::Quadratic
        } else if stats.loops > 0 {
            ComplexityClass::Linear
        } else {
            ComplexityClass::Constant
        };

        stats.elapsed = start.elapsed().as_secs_f64();
        (stats, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> FileStats {
        let (stats, errors) = JavaAnalyzer::new().analyze(Path::new("Test.java"), source);
        assert!(errors.is_empty());
        stats
    }

    #[test]
    fn test_class_and_method_counts() {
        let source = r#"
import java.util.List;
import java.util.Map;

public class Inventory {
    private int count;

    public int getCount() {
        return count;
    }

    public void setCount(int value) {
        count = value;
    }
}
"#;
        let stats = analyze(source);
        assert_eq!(stats.classes, 1);
        assert_eq!(stats.imports, 2);
        assert_eq!(stats.functions, stats.function_details.len());
        assert!(stats
            .function_details
            .iter()
            .any(|f| f.name == "getCount" && f.args.is_empty() && f.line_end.is_none()));
    }

    #[test]
    fn test_nested_loops_are_quadratic() {
        let source = r#"
public class Grid {
    public void fill(int[][] cells) {
        for (int i = 0; i < cells.length; i++) {
            for (int j = 0; j < cells[i].length; j++) {
                cells[i][j] = 0;
            }
        }
    }
}
"#;
        let stats = analyze(source);
        assert_eq!(stats.time_complexity, ComplexityClass::Quadratic);
        assert_eq!(stats.loops, 2);
    }

    #[test]
    fn test_triple_nested_loops_are_cubic() {
        let source = "for (a) { for (b) { for (c) { } } }";
        let stats = analyze(source);
        assert_eq!(stats.time_complexity, ComplexityClass::Cubic);
    }

    #[test]
    fn test_while_only_is_linear() {
        let source = r#"
public class Spin {
    public void spin() {
        while (true) {
            break;
        }
    }
}
"#;
        let stats = analyze(source);
        assert_eq!(stats.loops, 1);
        assert_eq!(stats.time_complexity, ComplexityClass::Linear);
    }

    #[test]
    fn test_jdbc_detection() {
        let source = r#"
import java.sql.DriverManager;

public class Db {
    public void connect() throws Exception {
        var conn = DriverManager.getConnection("jdbc:mysql://host/mydb", "u", "p");
    }
}
"#;
        let stats = analyze(source);
        assert_eq!(stats.database, vec!["JDBC"]);
        assert_eq!(stats.database_name, vec!["mydb"]);
    }

    #[test]
    fn test_both_database_indicators() {
        let source = r#"
@Entity
public class User {
    void save(DataSource ds) {}
}
"#;
        let stats = analyze(source);
        assert_eq!(stats.database, vec!["JDBC", "JPA/Hibernate"]);
        assert!(stats.database_name.is_empty());
    }

    #[test]
    fn test_variable_count() {
        let source = "int a = 1; String b = \"x\"; boolean c = true; Object d = null;";
        let stats = analyze(source);
        assert_eq!(stats.variables, 3);
    }

    #[test]
    fn test_empty_source_is_constant() {
        let stats = analyze("");
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.time_complexity, ComplexityClass::Constant);
        assert_eq!(stats.file_bytes, "0 B");
    }
}
