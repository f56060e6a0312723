//! Output formatting for structscan results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal outline for human readability
//! - JSON: the summaries as structured data for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::analysis::{ClassInfo, ClassMember, FunctionInfo, Imports, StructuralSummary};

/// The analysis result for one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    /// Language id of the analyzer that produced the summary.
    pub language: String,
    pub summary: StructuralSummary,
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON document.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<FileReport>,
}

/// Render reports as a pretty-printed JSON document.
pub fn to_json(reports: &[FileReport]) -> serde_json::Result<String> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files: reports.to_vec(),
    };
    serde_json::to_string_pretty(&report)
}

/// Write results in JSON format.
pub fn write_json(reports: &[FileReport]) -> anyhow::Result<()> {
    let json = to_json(reports)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results as an indented outline.
pub fn write_pretty(reports: &[FileReport]) {
    print!("{}", format_pretty(reports));
}

/// Render reports as an indented outline, one block per file.
pub fn format_pretty(reports: &[FileReport]) -> String {
    let mut out = String::new();

    out.push('\n');
    let _ = writeln!(
        out,
        "  {} v{}",
        "structscan".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    out.push('\n');

    for report in reports {
        write_file(&mut out, report);
        out.push('\n');
    }

    out
}

fn write_file(out: &mut String, report: &FileReport) {
    let summary = &report.summary;
    let _ = writeln!(
        out,
        "  {} {}",
        report.path.bold(),
        format!("({})", report.language).dimmed()
    );
    let _ = writeln!(out, "    {}", summary.to_string().dimmed());

    if summary.is_empty() {
        return;
    }

    write_imports(out, &summary.imports);

    if !summary.variables.is_empty() {
        let _ = writeln!(
            out,
            "    {} {}",
            "vars".yellow(),
            summary.variables.join(", ")
        );
    }

    for function in &summary.functions {
        write_function(out, function, 2, "fn");
    }

    for class in &summary.classes {
        write_class(out, class, 2);
    }
}

fn write_imports(out: &mut String, imports: &Imports) {
    match imports {
        Imports::Qualified(names) => {
            for name in names {
                let _ = writeln!(out, "    {} {}", "import".magenta(), name);
            }
        }
        Imports::Statements(statements) => {
            for import in statements {
                let mut bindings: Vec<String> = Vec::new();
                if let Some(ref default) = import.default_import {
                    bindings.push(default.clone());
                }
                if let Some(ref namespace) = import.namespace_import {
                    bindings.push(format!("* as {}", namespace));
                }
                if !import.named_imports.is_empty() {
                    bindings.push(format!("{{ {} }}", import.named_imports.join(", ")));
                }

                let _ = write!(out, "    {} {}", "import".magenta(), import.module);
                if !bindings.is_empty() {
                    let _ = write!(out, " {}", format!("({})", bindings.join(", ")).dimmed());
                }
                let _ = writeln!(out, "  {}", format!("line {}", import.line).dimmed());
            }
        }
    }
}

fn write_class(out: &mut String, class: &ClassInfo, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}{} {}", indent, "class".blue().bold(), class.name.bold());
    if !class.bases.is_empty() {
        let _ = write!(out, "({})", class.bases.join(", "));
    }
    let _ = writeln!(out, "  {}", format!("line {}", class.line).dimmed());
    write_doc(out, &class.docstring, depth + 1);

    for member in &class.members {
        match member {
            ClassMember::Method(method) => write_function(out, method, depth + 1, "def"),
            ClassMember::NestedClass(nested) => write_class(out, nested, depth + 1),
        }
    }
}

fn write_function(out: &mut String, function: &FunctionInfo, depth: usize, keyword: &str) {
    let indent = "  ".repeat(depth);
    let args: Vec<String> = function
        .args
        .iter()
        .map(|p| match p.annotation {
            Some(ref ty) => format!("{}: {}", p.name, ty),
            None => p.name.clone(),
        })
        .collect();

    let _ = write!(out, "{}", indent);
    if function.is_async == Some(true) {
        let _ = write!(out, "{} ", "async".green());
    }
    let _ = write!(
        out,
        "{} {}({})",
        keyword.green(),
        function.name.bold(),
        args.join(", ")
    );
    if let Some(ref returns) = function.returns {
        let _ = write!(out, " -> {}", returns);
    }
    let _ = writeln!(out, "  {}", format!("line {}", function.line).dimmed());
    write_doc(out, &function.docstring, depth + 1);
}

/// First line of a docstring, indented under its declaration.
fn write_doc(out: &mut String, docstring: &str, depth: usize) {
    if let Some(first) = docstring.lines().find(|l| !l.trim().is_empty()) {
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), first.trim().italic().dimmed());
    }
}
