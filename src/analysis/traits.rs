//! Core trait for the analysis pipelines.

use std::path::Path;

use super::{AnalyzeError, FileStats};

/// One per-file metrics pipeline.
///
/// Two implementations exist: the structural pipeline walks a parsed
/// syntax tree, the pattern pipeline matches regexes over raw text.
/// Both converge on the same `FileStats` schema, selected by file
/// extension through `analyzer_for`.
///
/// # Thread Safety
///
/// Implementations hold no per-call state, so one analyzer may serve
/// many files concurrently. tree_sitter::Parser is not Sync; structural
/// implementations create a parser per call.
pub trait SourceAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g. "python", "java").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Analyze one file's source text.
    ///
    /// Never fails past this boundary: parse and internal errors become
    /// `AnalyzeError` entries, and the stats object is returned
    /// regardless, with unreachable counters left at zero. The path is
    /// a label for diagnostics only; no I/O happens here.
    fn analyze(&self, path: &Path, source: &str) -> (FileStats, Vec<AnalyzeError>);

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
