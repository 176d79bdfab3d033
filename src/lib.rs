//! Codescope - per-file source code metrics.
//!
//! Codescope ingests a source file (Python or Java) and derives a
//! bundle of metrics: function/class/variable/import counts, a
//! loop-nesting-based time-complexity estimate, database-connection
//! detection, and per-function metadata.
//!
//! # Architecture
//!
//! Two pipelines converge on one output schema, selected by file
//! extension:
//!
//! - `analysis`: the `SourceAnalyzer` trait, the `FileStats` schema,
//!   and the two pipeline implementations (structural for Python via
//!   tree-sitter, pattern for Java via regexes)
//! - `classify`: entry-point classification of a file batch
//! - `batch`: rayon-parallel batch analysis with main/sub grouping
//! - `report`: output formatting (pretty, JSON)
//!
//! Each per-file analysis is a pure function of (file content, file
//! kind): no shared mutable state, so batches parallelize without
//! coordination. Failures stay local to one file and are reported as
//! error entries next to a partially-filled result.

pub mod analysis;
pub mod batch;
pub mod classify;
pub mod cli;
pub mod report;

pub use analysis::{
    analyzer_for, AnalyzeError, ComplexityClass, FileStats, FunctionDetail, JavaAnalyzer,
    PythonAnalyzer, SourceAnalyzer,
};
pub use batch::{analyze_batch, analyze_path, BatchReport, FileReport};
pub use classify::{is_entry_point, split_entry_points};
