//! Metric structures shared by both analysis pipelines.

use std::fmt;

use serde::{Serialize, Serializer};

/// Time-complexity estimate for a file.
///
/// This is an ordinal tag derived from loop nesting (and, for the
/// structural pipeline, recursion), not a measured runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplexityClass {
    /// No loops: `O(1)`.
    #[default]
    Constant,
    /// One loop level: `O(n)`.
    Linear,
    /// Two nested loop levels: `O(n²)`.
    Quadratic,
    /// Three nested loop levels: `O(n³)`.
    Cubic,
    /// Nesting depth beyond three: `O(n^k)`.
    Polynomial(u32),
    /// Recursion detected: `O(2^n)`. Overrides any nesting-based estimate.
    Exponential,
}

impl ComplexityClass {
    /// Map a maximum loop-nesting depth to a complexity class.
    pub fn from_nesting(depth: u32) -> Self {
        match depth {
            0 => ComplexityClass::Constant,
            1 => ComplexityClass::Linear,
            2 => ComplexityClass::Quadratic,
            3 => ComplexityClass::Cubic,
            k => ComplexityClass::Polynomial(k),
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexityClass::Constant => write!(f, "O(1)"),
            ComplexityClass::Linear => write!(f, "O(n)"),
            ComplexityClass::Quadratic => write!(f, "O(n²)"),
            ComplexityClass::Cubic => write!(f, "O(n³)"),
            ComplexityClass::Polynomial(k) => write!(f, "O(n^{})", k),
            ComplexityClass::Exponential => write!(f, "O(2^n)"),
        }
    }
}

impl Serialize for ComplexityClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Metadata for one declared function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDetail {
    /// The function name.
    pub name: String,
    /// Parameter names in declaration order. Always empty for the
    /// pattern pipeline.
    pub args: Vec<String>,
    /// Docstring text, empty when the function has none.
    pub docstring: String,
    /// Start line, 1-based. Zero for the pattern pipeline.
    pub line_start: usize,
    /// End line, 1-based inclusive. None when unknown.
    pub line_end: Option<usize>,
}

/// Metrics for one analyzed file.
///
/// Created once per analysis call and immutable after return. A result
/// with zeroed counters alongside a non-empty error list is the
/// soft-failure signal; there is no separate success flag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileStats {
    /// Line count.
    pub lines: usize,
    /// Declared function/method count. Always equals
    /// `function_details.len()`.
    pub functions: usize,
    /// Class declaration count.
    pub classes: usize,
    /// Import statement count.
    pub imports: usize,
    /// Variable/assignment count.
    pub variables: usize,
    /// Loop count. The structural pipeline counts `for` loops only;
    /// the pattern pipeline counts both `for` and `while`.
    pub loops: usize,
    /// Estimated time-complexity class.
    pub time_complexity: ComplexityClass,
    /// Human-readable byte size, e.g. `"512 B"` or `"1.00 KB"`.
    pub file_bytes: String,
    /// Wall-clock analysis duration in seconds. Unrelated to
    /// `time_complexity`.
    pub elapsed: f64,
    /// Database-access indicators, in order of first detection.
    pub database: Vec<String>,
    /// Detected database names. At most one entry.
    pub database_name: Vec<String>,
    /// Per-function metadata.
    pub function_details: Vec<FunctionDetail>,
}

/// Format a byte count as a human string.
///
/// Up to 1024 bytes inclusive stays in bytes; up to a mebibyte inclusive
/// is kibibytes with two decimals; above that, mebibytes.
pub fn format_byte_size(bytes: u64) -> String {
    if bytes <= 1024 {
        format!("{} B", bytes)
    } else if bytes <= 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size_thresholds() {
        assert_eq!(format_byte_size(0), "0 B");
        assert_eq!(format_byte_size(512), "512 B");
        // 1024 is still bytes; 1025 crosses into KB
        assert_eq!(format_byte_size(1024), "1024 B");
        assert_eq!(format_byte_size(1025), "1.00 KB");
        assert_eq!(format_byte_size(1536), "1.50 KB");
        assert_eq!(format_byte_size(1024 * 1024), "1024.00 KB");
        assert_eq!(format_byte_size(1024 * 1024 + 1), "1.00 MB");
        assert_eq!(format_byte_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_complexity_labels() {
        assert_eq!(ComplexityClass::from_nesting(0).to_string(), "O(1)");
        assert_eq!(ComplexityClass::from_nesting(1).to_string(), "O(n)");
        assert_eq!(ComplexityClass::from_nesting(2).to_string(), "O(n²)");
        assert_eq!(ComplexityClass::from_nesting(3).to_string(), "O(n³)");
        assert_eq!(ComplexityClass::from_nesting(5).to_string(), "O(n^5)");
        assert_eq!(ComplexityClass::Exponential.to_string(), "O(2^n)");
    }

    #[test]
    fn test_complexity_serializes_as_label() {
        let json = serde_json::to_string(&ComplexityClass::Quadratic).unwrap();
        assert_eq!(json, "\"O(n²)\"");
    }

    #[test]
    fn test_default_stats_are_zeroed() {
        let stats = FileStats::default();
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.functions, 0);
        assert_eq!(stats.time_complexity, ComplexityClass::Constant);
        assert!(stats.database.is_empty());
        assert!(stats.function_details.is_empty());
    }
}
