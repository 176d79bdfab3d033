//! Command-line interface for codescope.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::batch;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Extensions the analysis pipelines accept.
const SUPPORTED_EXTENSIONS: &[&str] = &["py", "java"];

/// Per-file source metrics for Python and Java.
///
/// Codescope parses Python with tree-sitter and approximates the same
/// metric set for Java with a regex battery: declaration counts, a
/// loop-nesting time-complexity estimate, database-access detection,
/// and per-function metadata. Files are grouped by whether they contain
/// a program entry point.
#[derive(Parser)]
#[command(name = "codescope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files or directories and print per-file metrics
    #[command(visible_alias = "scan")]
    Analyze(AnalyzeArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Paths to analyze (files or directories)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Validate an explicitly named file before analysis.
///
/// Rejects empty names, traversal attempts, hidden files, and
/// unsupported extensions. Returns the sanitized base name.
pub fn validate_file_name(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("Empty filename".to_string());
    }

    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if base.contains("..") || base.starts_with('.') {
        return Err("Invalid filename".to_string());
    }

    let ext = Path::new(base)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err("Only .py and .java files".to_string());
    }

    Ok(base.to_string())
}

/// Collect supported source files under a directory.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden directories, but never the walk root itself
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if SUPPORTED_EXTENSIONS.contains(&ext) {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let mut files = Vec::new();
    for path in &args.paths {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: cannot access path {:?}: {}", path, e);
                return Ok(EXIT_ERROR);
            }
        };

        if metadata.is_dir() {
            files.extend(collect_files(path)?);
        } else {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if let Err(e) = validate_file_name(name) {
                eprintln!("Error: {}: {}", path.display(), e);
                return Ok(EXIT_ERROR);
            }
            files.push(path.clone());
        }
    }

    if files.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let batch_report = batch::analyze_batch(&files);

    match args.format.as_str() {
        "json" => report::write_json(&batch_report)?,
        _ => report::write_pretty(&batch_report),
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_name() {
        assert_eq!(validate_file_name("app.py").unwrap(), "app.py");
        assert_eq!(validate_file_name("Main.java").unwrap(), "Main.java");
        assert_eq!(validate_file_name("dir/app.PY").unwrap(), "app.PY");

        assert_eq!(validate_file_name("").unwrap_err(), "Empty filename");
        assert_eq!(validate_file_name(".hidden.py").unwrap_err(), "Invalid filename");
        assert_eq!(
            validate_file_name("notes.txt").unwrap_err(),
            "Only .py and .java files"
        );
        assert_eq!(
            validate_file_name("script.sh").unwrap_err(),
            "Only .py and .java files"
        );
    }

    #[test]
    fn test_collect_files_filters_extensions() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        fs::write(temp.path().join("B.java"), "class B {}\n").unwrap();
        fs::write(temp.path().join("readme.md"), "# no\n").unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".git").join("c.py"), "x = 1\n").unwrap();

        let files = collect_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["B.java", "a.py"]);
    }

    #[test]
    fn test_run_analyze_rejects_bad_format() {
        let temp = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            paths: vec![temp.path().to_path_buf()],
            format: "xml".to_string(),
        };
        assert_eq!(run_analyze(&args).unwrap(), EXIT_ERROR);
    }
}
