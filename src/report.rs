//! Output formatting for batch results.
//!
//! Two formats: pretty colored terminal output for humans, and JSON for
//! programmatic consumption (the serialized `BatchReport` schema).

use colored::*;

use crate::batch::{BatchReport, FileReport};

/// Write the batch report as pretty-printed JSON to stdout.
pub fn write_json(report: &BatchReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

/// Write a colored human-readable report to stdout.
pub fn write_pretty(report: &BatchReport) {
    println!("{}", "Codescope Report".bold());
    println!(
        "  {} file(s): {} entry-point, {} library",
        report.total_files(),
        report.main.len(),
        report.sub.len()
    );
    println!();

    write_section("Entry-point files", &report.main);
    write_section("Library files", &report.sub);
}

fn write_section(title: &str, files: &[FileReport]) {
    if files.is_empty() {
        return;
    }

    println!("{}", title.bold().underline());
    for file in files {
        write_file(file);
    }
    println!();
}

fn write_file(file: &FileReport) {
    println!(
        "  {} ({}, {} lines, {:.4}s)",
        file.file_name.cyan(),
        file.stats.file_bytes,
        file.stats.lines,
        file.stats.elapsed
    );
    println!(
        "    functions: {}  classes: {}  imports: {}  variables: {}  loops: {}",
        file.stats.functions,
        file.stats.classes,
        file.stats.imports,
        file.stats.variables,
        file.stats.loops
    );
    println!(
        "    time complexity: {}",
        file.stats.time_complexity.to_string().yellow()
    );

    if !file.stats.database.is_empty() {
        println!("    database: {}", file.stats.database.join(", "));
    }
    if !file.stats.database_name.is_empty() {
        println!("    database name: {}", file.stats.database_name.join(", "));
    }

    for func in &file.stats.function_details {
        let span = match func.line_end {
            Some(end) => format!("{}..{}", func.line_start, end),
            None => format!("{}..?", func.line_start),
        };
        println!("      fn {}({}) [{}]", func.name, func.args.join(", "), span);
    }

    for err in &file.errors {
        println!("    {}", err.to_string().red());
    }
}
