//! Pipeline implementations and the extension registry.

mod java;
mod python;

pub use java::JavaAnalyzer;
pub use python::{ExtractedFunction, PythonAnalyzer};

use once_cell::sync::OnceCell;

use super::SourceAnalyzer;

/// Static storage for the structural (Python) analyzer.
static PYTHON_ANALYZER: OnceCell<PythonAnalyzer> = OnceCell::new();

/// Static storage for the pattern (Java) analyzer.
static JAVA_ANALYZER: OnceCell<JavaAnalyzer> = OnceCell::new();

/// Get the analyzer for the given file extension.
///
/// Returns None for unsupported extensions.
pub fn analyzer_for(ext: &str) -> Option<&'static dyn SourceAnalyzer> {
    match ext {
        "py" => Some(PYTHON_ANALYZER.get_or_init(PythonAnalyzer::new) as &dyn SourceAnalyzer),
        "java" => Some(JAVA_ANALYZER.get_or_init(JavaAnalyzer::new) as &dyn SourceAnalyzer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_dispatch() {
        assert_eq!(analyzer_for("py").unwrap().language_id(), "python");
        assert_eq!(analyzer_for("java").unwrap().language_id(), "java");
        assert!(analyzer_for("rb").is_none());
        assert!(analyzer_for("").is_none());
    }

    #[test]
    fn test_handles_extension() {
        let py = analyzer_for("py").unwrap();
        assert!(py.handles_extension("py"));
        assert!(!py.handles_extension("java"));
    }
}
