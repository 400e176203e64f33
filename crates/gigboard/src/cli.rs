//! CLI formatting for project listings
//!
//! Table and JSON rendering for the `projects` subcommand, plus the
//! errors the query subcommands report.

use chrono::{NaiveDate, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use gigboard_core::models::Project;
use std::sync::Arc;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    InvalidStatus {
        message: String,
    },
    NoProjects {
        filter: Option<String>,
        tracked: usize,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidStatus { message } => write!(f, "{}", message),
            CliError::NoProjects {
                filter: Some(status),
                tracked,
            } => {
                write!(
                    f,
                    "No projects with status '{}' ({} tracked)",
                    status, tracked
                )
            }
            CliError::NoProjects { filter: None, .. } => {
                write!(f, "No projects tracked (store is empty)")
            }
        }
    }
}

impl std::error::Error for CliError {}

// ============================================================================
// Formatters
// ============================================================================

/// Format projects as table (human) or JSON
pub fn format_project_table(
    projects: &[Arc<Project>],
    currency: &str,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        let refs: Vec<&Project> = projects.iter().map(|p| p.as_ref()).collect();
        return serde_json::to_string_pretty(&refs).unwrap_or_else(|_| "[]".to_string());
    }

    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Apply colors only if enabled
    if no_color {
        table.set_header(vec![
            "ID", "Title", "Client", "Status", "Package", "Due", "Progress", "Price",
        ]);
    } else {
        table.set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Client").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Package").fg(Color::Cyan),
            Cell::new("Due").fg(Color::Cyan),
            Cell::new("Progress").fg(Color::Cyan),
            Cell::new("Price").fg(Color::Cyan),
        ]);
    }

    let today = Utc::now().date_naive();

    for project in projects {
        let id = project.id.to_string();
        let title = truncate(&project.title, 32);
        let client = truncate(&project.client, 20);
        let due = format_due(project, today);
        let progress = format!("{}%", project.progress);
        let price = format!("{}{:.0}", currency, project.price);

        table.add_row(Row::from(vec![
            id.as_str(),
            title.as_str(),
            client.as_str(),
            project.status.label(),
            project.package_type.as_str(),
            due.as_str(),
            progress.as_str(),
            price.as_str(),
        ]));
    }

    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

fn format_due(project: &Project, today: NaiveDate) -> String {
    let date = project.due_date.format("%Y-%m-%d").to_string();
    if project.is_overdue(today) {
        format!("{} (overdue)", date)
    } else {
        date
    }
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        // Char-based truncation so multi-byte titles never split mid-character
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gigboard_core::models::ProjectStatus;
    use gigboard_core::sample::sample_data;

    fn sample_projects() -> Vec<Arc<Project>> {
        sample_data().projects.into_iter().map(Arc::new).collect()
    }

    #[test]
    fn test_format_project_table_empty() {
        let projects: Vec<Arc<Project>> = vec![];
        let output = format_project_table(&projects, "$", false, false);
        assert!(output.contains("No projects found"));
    }

    #[test]
    fn test_format_project_table_contains_rows() {
        let projects = sample_projects();
        let output = format_project_table(&projects, "$", false, true);

        assert!(output.contains("E-commerce Market Analysis"));
        assert!(output.contains("TechStart Inc."));
        assert!(output.contains("In Progress"));
        assert!(output.contains("$520"));
        assert!(output.contains("75%"));
    }

    #[test]
    fn test_format_project_table_json() {
        let projects = sample_projects();
        let output = format_project_table(&projects, "$", true, false);
        assert!(output.starts_with('['));
        assert!(output.contains("\"Customer Behavior Dashboard\""));
    }

    #[test]
    fn test_overdue_marker_only_for_open_projects() {
        let projects = sample_projects();
        // Every sample due date is in 2025, so open projects read as
        // overdue from this later vantage point
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let open = projects
            .iter()
            .find(|p| p.status != ProjectStatus::Completed)
            .unwrap();
        assert!(format_due(open, today).contains("(overdue)"));

        let completed = projects
            .iter()
            .find(|p| p.status == ProjectStatus::Completed)
            .unwrap();
        assert_eq!(format_due(completed, today), "2025-08-05");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello world", 20), "hello world");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("café", 10), "café");
        assert_eq!(truncate("café", 3), "ca…");
        assert_eq!(truncate("日本語テスト", 4), "日本語…");
    }

    #[test]
    fn test_cli_error_display() {
        let err = CliError::NoProjects {
            filter: Some("active".to_string()),
            tracked: 4,
        };
        assert!(err.to_string().contains("status 'active'"));
        assert!(err.to_string().contains("4 tracked"));

        let err = CliError::InvalidStatus {
            message: "unknown status 'archived'".to_string(),
        };
        assert!(err.to_string().contains("archived"));
    }
}
