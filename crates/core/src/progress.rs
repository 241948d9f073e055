//! Completion progress aggregation.
//!
//! `passes` and `blocked` are counted independently. A task flagged both ways
//! increments both counters, so `pending` can go negative; the value is kept
//! as computed rather than clamped.

use crate::config::ProgressConfig;
use crate::model::Task;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Reason shown for blocked tasks that do not give one.
pub const NO_REASON: &str = "no reason given";

/// Segment widths of a proportional progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressBar {
    /// Total number of segments.
    pub width: usize,
    /// Segments for completed tasks, truncated.
    pub completed: usize,
    /// Segments for blocked tasks, truncated.
    pub blocked: usize,
    /// Segments left over; negative when both counters overlap.
    pub remaining: i64,
}

impl ProgressBar {
    fn new(width: usize, completed: usize, blocked: usize, total: usize) -> Self {
        let completed = completed * width / total;
        let blocked = blocked * width / total;
        Self {
            width,
            completed,
            blocked,
            remaining: signed(width) - signed(completed) - signed(blocked),
        }
    }
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remaining = usize::try_from(self.remaining).unwrap_or(0);
        write!(
            f,
            "{}{}{}",
            "█".repeat(self.completed),
            "▓".repeat(self.blocked),
            "░".repeat(remaining)
        )
    }
}

/// A blocked task and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedTask {
    /// Task id, `?` when absent.
    pub id: String,
    /// Task title, `untitled` when absent.
    pub title: String,
    /// Declared reason or [`NO_REASON`].
    pub reason: String,
}

/// Aggregate completion figures for a non-empty task list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    /// Number of tasks.
    pub total: usize,
    /// Tasks with `passes` set.
    pub completed: usize,
    /// Tasks with `blocked` set.
    pub blocked: usize,
    /// `total - completed - blocked`; may be negative.
    pub pending: i64,
    /// Share of completed tasks, 0 to 100.
    pub completed_percent: f64,
    /// Proportional bar.
    pub bar: ProgressBar,
    /// Blocked tasks in file order.
    pub blocked_tasks: Vec<BlockedTask>,
}

/// Summarise completion progress.
///
/// Returns `None` for an empty task list.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_progress(tasks: &[Task], config: &ProgressConfig) -> Option<ProgressSummary> {
    if tasks.is_empty() {
        return None;
    }

    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.passes).count();
    let blocked_tasks: Vec<BlockedTask> = tasks
        .iter()
        .filter(|t| t.blocked)
        .map(|t| BlockedTask {
            id: t.display_id().to_string(),
            title: t.display_title().to_string(),
            reason: t.blocked_reason.as_deref().unwrap_or(NO_REASON).to_string(),
        })
        .collect();
    let blocked = blocked_tasks.len();

    debug!(total, completed, blocked, "Progress aggregated");

    Some(ProgressSummary {
        total,
        completed,
        blocked,
        pending: signed(total) - signed(completed) - signed(blocked),
        completed_percent: completed as f64 / total as f64 * 100.0,
        bar: ProgressBar::new(config.bar_width, completed, blocked, total),
        blocked_tasks,
    })
}

fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(total: usize, passing: usize, blocked: usize) -> Vec<Task> {
        (0..total)
            .map(|i| Task {
                passes: i < passing,
                blocked: i >= passing && i < passing + blocked,
                ..Task::new(i.to_string(), format!("task {i}"))
            })
            .collect()
    }

    #[test]
    fn test_empty_is_skipped() {
        assert!(summarize_progress(&[], &ProgressConfig::default()).is_none());
    }

    #[test]
    fn test_ten_tasks_four_done_one_blocked() {
        let summary = summarize_progress(&tasks(10, 4, 1), &ProgressConfig::default()).unwrap();

        assert_eq!(summary.total, 10);
        assert_eq!(summary.completed, 4);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.pending, 5);
        assert!((summary.completed_percent - 40.0).abs() < f64::EPSILON);
        assert_eq!(
            summary.bar,
            ProgressBar {
                width: 40,
                completed: 16,
                blocked: 4,
                remaining: 20,
            }
        );
        assert_eq!(summary.bar.to_string().chars().count(), 40);
    }

    #[test]
    fn test_segments_truncate() {
        // 1/3 of 40 = 13.33, 1/3 of 40 = 13.33 -> 13 + 13 + 14
        let summary = summarize_progress(&tasks(3, 1, 1), &ProgressConfig::default()).unwrap();
        assert_eq!(summary.bar.completed, 13);
        assert_eq!(summary.bar.blocked, 13);
        assert_eq!(summary.bar.remaining, 14);
    }

    #[test]
    fn test_double_flagged_task_goes_negative() {
        let both = Task {
            passes: true,
            blocked: true,
            ..Task::new("a", "both")
        };
        let summary = summarize_progress(&[both], &ProgressConfig::default()).unwrap();

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.pending, -1);
        assert_eq!(summary.bar.remaining, -40);
        assert_eq!(summary.bar.to_string().chars().count(), 80);
    }

    #[test]
    fn test_blocked_tasks_listed_with_reason() {
        let list = vec![
            Task {
                blocked: true,
                blocked_reason: Some("waiting on API keys".to_string()),
                ..Task::new("1", "deploy")
            },
            Task {
                blocked: true,
                ..Task::new("2", "docs")
            },
        ];
        let summary = summarize_progress(&list, &ProgressConfig::default()).unwrap();

        assert_eq!(summary.blocked_tasks[0].reason, "waiting on API keys");
        assert_eq!(summary.blocked_tasks[1].reason, NO_REASON);
    }

    #[test]
    fn test_custom_width() {
        let summary = summarize_progress(&tasks(4, 2, 0), &ProgressConfig { bar_width: 10 }).unwrap();
        assert_eq!(summary.bar.completed, 5);
        assert_eq!(summary.bar.remaining, 5);
    }
}
