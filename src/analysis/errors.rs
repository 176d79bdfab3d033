//! Error taxonomy for per-file analysis.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A failure recorded while analyzing one file.
///
/// These never propagate as `Err` past the analyzer boundary; they ride
/// alongside the partially-filled stats so the caller always has a
/// result object. One file's errors never affect sibling files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The source could not be parsed. Fatal for that file's structural
    /// analysis; tree-derived counters stay at their zero defaults.
    #[error("Syntax Error: line {line}")]
    Syntax { line: usize },
    /// Any other failure during analysis.
    #[error("Error: {0}")]
    Analysis(String),
}

impl Serialize for AnalyzeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyzeError::Syntax { line: 7 };
        assert_eq!(err.to_string(), "Syntax Error: line 7");

        let err = AnalyzeError::Analysis("boom".to_string());
        assert_eq!(err.to_string(), "Error: boom");
    }

    #[test]
    fn test_error_serializes_as_string() {
        let json = serde_json::to_string(&AnalyzeError::Syntax { line: 3 }).unwrap();
        assert_eq!(json, "\"Syntax Error: line 3\"");
    }
}
