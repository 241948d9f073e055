//! Report driver.
//!
//! [`Analyzer::analyze`] runs every check over one task document and
//! gathers the results. It holds no analysis logic of its own.

use crate::complexity::{ComplexityReport, analyze_complexity};
use crate::config::AnalyzerConfig;
use crate::dependencies::{DependencyReport, analyze_dependencies};
use crate::model::TaskList;
use crate::progress::{ProgressSummary, summarize_progress};
use crate::schema::{SchemaViolation, validate_schema};
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

/// Everything found in one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Project name, if declared.
    pub project: Option<String>,
    /// Project description, if declared.
    pub description: Option<String>,
    /// Structural findings on the raw document.
    pub schema: Vec<SchemaViolation>,
    /// Step-count classification.
    pub complexity: ComplexityReport,
    /// Graph health and execution levels.
    pub dependencies: DependencyReport,
    /// Completion figures; absent when there are no tasks.
    pub progress: Option<ProgressSummary>,
}

impl AnalysisReport {
    /// Whether anything worth attention was found: a schema finding, a
    /// complexity issue, a dangling reference or a cycle.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.schema.is_empty()
            || !self.complexity.issues().is_empty()
            || !self.dependencies.dangling.is_empty()
            || self.dependencies.cycle.is_some()
    }
}

/// Runs the analysis pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer.
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a parsed task document.
    ///
    /// Schema checks run on the raw document first; the document is then
    /// interpreted as a [`TaskList`] and every other check runs on that.
    /// Nothing found inside a well-formed task list aborts the pass.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] when the document cannot be
    /// interpreted as a task list. The error carries the schema findings.
    #[instrument(name = "analyze", skip_all)]
    pub fn analyze(&self, document: &Value) -> Result<AnalysisReport> {
        let schema = validate_schema(document);
        let list = TaskList::from_value(document).map_err(|err| err.with_findings(schema.clone()))?;

        info!(
            project = list.project.as_deref().unwrap_or_default(),
            tasks = list.tasks.len(),
            "Analyzing task list"
        );

        let complexity = analyze_complexity(&list.tasks, &self.config.complexity);
        let dependencies = analyze_dependencies(&list.tasks);
        let progress = summarize_progress(&list.tasks, &self.config.progress);

        let report = AnalysisReport {
            project: list.project,
            description: list.description,
            schema,
            complexity,
            dependencies,
            progress,
        };
        info!(findings = report.has_findings(), "Analysis finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_clean_document_has_no_findings() {
        let doc = json!({
            "project": "demo",
            "description": "a demo",
            "tasks": [
                {"id": 1, "title": "setup", "steps": ["a"], "passes": true},
                {"id": 2, "title": "build", "steps": ["a", "b"], "passes": false, "depends_on": [1]}
            ]
        });
        let report = Analyzer::default().analyze(&doc).unwrap();

        assert!(!report.has_findings());
        assert_eq!(report.project.as_deref(), Some("demo"));
        assert_eq!(report.description.as_deref(), Some("a demo"));
        assert_eq!(report.dependencies.levels.len(), 2);
        assert_eq!(report.progress.map(|p| p.completed), Some(1));
    }

    #[test]
    fn test_malformed_document_keeps_schema_findings() {
        let doc = json!({"tasks": 5});
        let err = Analyzer::default().analyze(&doc).unwrap_err();

        assert!(matches!(err, Error::Malformed { .. }));
        assert_eq!(
            err.findings(),
            &[SchemaViolation::MissingProject, SchemaViolation::TasksNotArray]
        );
    }

    #[test]
    fn test_missing_tasks_is_an_empty_report() {
        let report = Analyzer::default().analyze(&json!({"project": "p"})).unwrap();

        assert_eq!(report.schema, vec![SchemaViolation::MissingTasks]);
        assert_eq!(report.complexity, ComplexityReport::NoTasks);
        assert!(report.progress.is_none());
        assert!(report.dependencies.levels.is_empty());
        assert!(report.has_findings());
    }

    #[test]
    fn test_config_reaches_components() {
        let mut config = AnalyzerConfig::default();
        config.progress.bar_width = 10;
        let analyzer = Analyzer::new(config);
        let doc = json!({
            "project": "p",
            "tasks": [{"id": "a", "title": "a", "steps": ["s"], "passes": true}]
        });
        let report = analyzer.analyze(&doc).unwrap();

        assert_eq!(report.progress.map(|p| p.bar.completed), Some(10));
        assert_eq!(analyzer.config().progress.bar_width, 10);
    }
}
