//! Parallel batch analysis with main/sub grouping.
//!
//! Each per-file analysis is self-contained and touches no shared
//! state, so a batch is plain data parallelism: one rayon task per
//! file, no locks. All workers of a batch complete before the grouped
//! report is assembled; there is no partial-result streaming.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{analyzer_for, AnalyzeError, FileStats};
use crate::classify::split_entry_points;

/// One analyzed file: metrics plus any errors local to it.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Base name of the analyzed file.
    pub file_name: String,
    pub stats: FileStats,
    pub errors: Vec<AnalyzeError>,
}

/// A batch of analyzed files, grouped by entry-point classification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Files containing a program entry point.
    pub main: Vec<FileReport>,
    /// Library/sub files.
    pub sub: Vec<FileReport>,
}

impl BatchReport {
    pub fn total_files(&self) -> usize {
        self.main.len() + self.sub.len()
    }
}

/// Read and analyze one file.
///
/// Read failures and unsupported extensions become error entries on a
/// zero-valued result; this never panics and never aborts a batch.
pub fn analyze_path(path: &Path) -> FileReport {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let analyzer = match analyzer_for(ext) {
        Some(a) => a,
        None => {
            return FileReport {
                file_name,
                stats: FileStats::default(),
                errors: vec![AnalyzeError::Analysis(format!(
                    "unsupported file extension {:?}",
                    ext
                ))],
            }
        }
    };

    match fs::read_to_string(path) {
        Ok(source) => {
            let (stats, errors) = analyzer.analyze(path, &source);
            FileReport {
                file_name,
                stats,
                errors,
            }
        }
        Err(e) => FileReport {
            file_name,
            stats: FileStats::default(),
            errors: vec![AnalyzeError::Analysis(e.to_string())],
        },
    }
}

/// Classify and analyze a batch of files.
///
/// Files are analyzed in parallel; result order matches input order
/// within each group.
pub fn analyze_batch(paths: &[PathBuf]) -> BatchReport {
    let (sub, main) = split_entry_points(paths);

    BatchReport {
        main: main.par_iter().map(|p| analyze_path(p)).collect(),
        sub: sub.par_iter().map(|p| analyze_path(p)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unreadable_file_yields_error_report() {
        let report = analyze_path(Path::new("/nonexistent/gone.py"));
        assert_eq!(report.file_name, "gone.py");
        assert_eq!(report.stats.functions, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].to_string().starts_with("Error:"));
    }

    #[test]
    fn test_unsupported_extension() {
        let report = analyze_path(Path::new("notes.txt"));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].to_string().contains("unsupported"));
    }

    #[test]
    fn test_batch_groups_and_preserves_order() {
        let temp = TempDir::new().unwrap();
        let lib_a = temp.path().join("alpha.py");
        let lib_b = temp.path().join("beta.py");
        let app = temp.path().join("app.py");
        fs::write(&lib_a, "def a():\n    pass\n").unwrap();
        fs::write(&lib_b, "def b():\n    pass\n").unwrap();
        fs::write(&app, "if __name__ == \"__main__\":\n    print(\"hi\")\n").unwrap();

        let report = analyze_batch(&[lib_a, app, lib_b]);
        assert_eq!(report.total_files(), 3);
        assert_eq!(report.main.len(), 1);
        assert_eq!(report.main[0].file_name, "app.py");
        assert_eq!(report.sub[0].file_name, "alpha.py");
        assert_eq!(report.sub[1].file_name, "beta.py");
    }

    #[test]
    fn test_one_broken_file_does_not_abort_siblings() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.py");
        let bad = temp.path().join("bad.py");
        fs::write(&good, "def ok():\n    pass\n").unwrap();
        fs::write(&bad, "def broken(:\n").unwrap();

        let report = analyze_batch(&[good, bad]);
        assert_eq!(report.total_files(), 2);

        let good_report = report.sub.iter().find(|r| r.file_name == "good.py").unwrap();
        assert!(good_report.errors.is_empty());
        assert_eq!(good_report.stats.functions, 1);

        let bad_report = report.sub.iter().find(|r| r.file_name == "bad.py").unwrap();
        assert!(bad_report.errors[0].to_string().starts_with("Syntax Error:"));
        assert_eq!(bad_report.stats.functions, 0);
    }
}
