//! Per-file metrics extraction.
//!
//! One capability - "extract code metrics from source text" - with two
//! variants behind the `SourceAnalyzer` trait:
//!
//! - the structural pipeline (`languages/python.rs`) walks a tree-sitter
//!   syntax tree;
//! - the pattern pipeline (`languages/java.rs`) matches a regex battery
//!   over raw text, for languages without an available parser.
//!
//! Both produce the same `FileStats` schema and never fail past the
//! trait boundary: problems are returned as `AnalyzeError` entries next
//! to a partially-filled result. The two pipelines' complexity
//! estimates are derived differently and may disagree on the same
//! semantic program; that divergence is intentional.

mod errors;
mod languages;
mod metrics;
mod traits;

pub use errors::AnalyzeError;
pub use languages::{analyzer_for, ExtractedFunction, JavaAnalyzer, PythonAnalyzer};
pub use metrics::{format_byte_size, ComplexityClass, FileStats, FunctionDetail};
pub use traits::SourceAnalyzer;
