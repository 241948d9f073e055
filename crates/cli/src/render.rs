//! Report rendering.
//!
//! The text layout has one section per analysis stage. JSON output is the
//! serialized [`AnalysisReport`].

use std::io::{self, Write};
use tasklens_core::{AnalysisReport, ComplexityReport, ProgressSummary, Severity, TaskStatus};

/// Project name shown when the document declares none.
pub const UNNAMED_PROJECT: &str = "unnamed";

const RULE_WIDTH: usize = 50;

/// Write the report as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Propagates write failures.
pub fn json(report: &AnalysisReport, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Write the sectioned text report.
///
/// # Errors
///
/// Propagates write failures.
pub fn text(report: &AnalysisReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Project: {}",
        report.project.as_deref().unwrap_or(UNNAMED_PROJECT)
    )?;
    if let Some(description) = report.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(out, "Description: {description}")?;
    }

    schema_section(report, out)?;
    complexity_section(&report.complexity, out)?;
    dependency_section(report, out)?;
    progress_section(report.progress.as_ref(), out)?;

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Analysis complete")
}

fn heading(title: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn schema_section(report: &AnalysisReport, out: &mut impl Write) -> io::Result<()> {
    heading("Schema", out)?;
    if report.schema.is_empty() {
        return writeln!(out, "✅ Schema valid");
    }
    writeln!(out, "❌ Schema problems found:")?;
    for finding in &report.schema {
        writeln!(out, "   - {finding}")?;
    }
    Ok(())
}

const fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::MissingSteps => "⚠️ ",
        Severity::Normal => "✅",
        Severity::Elevated => "🟡",
        Severity::OverComplex => "🔴",
    }
}

fn complexity_section(complexity: &ComplexityReport, out: &mut impl Write) -> io::Result<()> {
    heading("Complexity", out)?;
    let ComplexityReport::Analyzed { entries, issues } = complexity else {
        return writeln!(out, "⚠️  No tasks defined");
    };

    for entry in entries {
        writeln!(
            out,
            "{} Task {}: {}",
            severity_marker(entry.severity),
            entry.id,
            entry.title
        )?;
        writeln!(
            out,
            "   steps: {} | criteria: {} | priority: {}",
            entry.steps, entry.criteria, entry.priority
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Total: {} tasks", entries.len())?;

    if !issues.is_empty() {
        writeln!(out)?;
        writeln!(out, "⚠️  {} issues found:", issues.len())?;
        for issue in issues {
            writeln!(out, "   - {issue}")?;
        }
    }
    Ok(())
}

fn dependency_section(report: &AnalysisReport, out: &mut impl Write) -> io::Result<()> {
    heading("Dependencies", out)?;
    let deps = &report.dependencies;

    for dangling in &deps.dangling {
        writeln!(
            out,
            "❌ Task {} references unknown dependency: {}",
            dangling.task, dangling.dependency
        )?;
    }
    match &deps.cycle {
        Some(cycle) => writeln!(out, "❌ Dependency cycle detected: {cycle}")?,
        None => writeln!(out, "✅ No dependency cycles")?,
    }

    writeln!(out)?;
    writeln!(out, "Execution levels:")?;
    for (index, level) in deps.levels.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "  Level {}:", index + 1)?;
        for task in level {
            let marker = match task.status {
                TaskStatus::Done => "✓",
                TaskStatus::Pending => "○",
            };
            writeln!(out, "    {marker} [{}] {}", task.id, task.title)?;
        }
    }
    Ok(())
}

fn progress_section(progress: Option<&ProgressSummary>, out: &mut impl Write) -> io::Result<()> {
    heading("Progress", out)?;
    let Some(progress) = progress else {
        return Ok(());
    };

    writeln!(out, "  Total: {}", progress.total)?;
    writeln!(
        out,
        "  ✓ Completed: {} ({:.0}%)",
        progress.completed, progress.completed_percent
    )?;
    writeln!(out, "  ○ Pending: {}", progress.pending)?;
    writeln!(out, "  ⚠ Blocked: {}", progress.blocked)?;
    writeln!(out)?;
    writeln!(out, "  [{}]", progress.bar)?;

    if !progress.blocked_tasks.is_empty() {
        writeln!(out)?;
        writeln!(out, "Blocked tasks:")?;
        for task in &progress.blocked_tasks {
            writeln!(out, "  ⚠️  [{}] {}", task.id, task.title)?;
            writeln!(out, "      Reason: {}", task.reason)?;
        }
    }
    Ok(())
}
