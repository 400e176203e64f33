//! Project and client models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a project
///
/// Statuses advance Pending -> Active -> InProgress -> Completed; each
/// advance can trigger an automated communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    Active,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// All statuses in workflow order
    pub fn all() -> [ProjectStatus; 4] {
        [
            ProjectStatus::Pending,
            ProjectStatus::Active,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
        ]
    }

    /// Human label as shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::Active => "Active",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }

    /// Next status in the workflow, None once completed
    pub fn next(&self) -> Option<ProjectStatus> {
        match self {
            ProjectStatus::Pending => Some(ProjectStatus::Active),
            ProjectStatus::Active => Some(ProjectStatus::InProgress),
            ProjectStatus::InProgress => Some(ProjectStatus::Completed),
            ProjectStatus::Completed => None,
        }
    }

    /// Parse a status string leniently: case-insensitive, spaces and
    /// underscores both accepted. Unrecognized input falls back to
    /// Pending (neutral styling).
    pub fn parse_lenient(s: &str) -> ProjectStatus {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "active" => ProjectStatus::Active,
            "in_progress" => ProjectStatus::InProgress,
            "completed" | "complete" | "done" => ProjectStatus::Completed,
            "pending" => ProjectStatus::Pending,
            _ => ProjectStatus::Pending,
        }
    }

    /// Strict parse for CLI filters: unrecognized input is an error
    pub fn parse_strict(s: &str) -> Result<ProjectStatus, String> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "active" => Ok(ProjectStatus::Active),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "pending" => Ok(ProjectStatus::Pending),
            other => Err(format!(
                "unknown status '{}' (expected: pending, active, in_progress, completed)",
                other
            )),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ProjectStatus::Completed)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A client project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    /// Client display name (usually the company)
    pub client: String,
    pub project_type: String,
    pub status: ProjectStatus,
    pub package_type: String,
    pub due_date: NaiveDate,
    /// Completion in percent, 0-100
    #[serde(default)]
    pub progress: u8,
    pub price: f64,
}

impl Project {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Days from `today` to the due date; negative when past due
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }
}

/// A client record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u32,
    pub name: String,
    pub company: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_lenient_parse_accepts_dashboard_labels() {
        assert_eq!(
            ProjectStatus::parse_lenient("In Progress"),
            ProjectStatus::InProgress
        );
        assert_eq!(
            ProjectStatus::parse_lenient("in_progress"),
            ProjectStatus::InProgress
        );
        assert_eq!(
            ProjectStatus::parse_lenient("Completed"),
            ProjectStatus::Completed
        );
        assert_eq!(ProjectStatus::parse_lenient("ACTIVE"), ProjectStatus::Active);
    }

    #[test]
    fn test_status_lenient_parse_falls_back_to_pending() {
        assert_eq!(
            ProjectStatus::parse_lenient("archived"),
            ProjectStatus::Pending
        );
        assert_eq!(ProjectStatus::parse_lenient(""), ProjectStatus::Pending);
    }

    #[test]
    fn test_status_strict_parse_rejects_unknown() {
        assert!(ProjectStatus::parse_strict("archived").is_err());
        assert_eq!(
            ProjectStatus::parse_strict("in progress").unwrap(),
            ProjectStatus::InProgress
        );
    }

    #[test]
    fn test_status_workflow_order() {
        assert_eq!(
            ProjectStatus::Pending.next(),
            Some(ProjectStatus::Active)
        );
        assert_eq!(
            ProjectStatus::InProgress.next(),
            Some(ProjectStatus::Completed)
        );
        assert_eq!(ProjectStatus::Completed.next(), None);
    }

    #[test]
    fn test_overdue_only_applies_to_open_projects() {
        let mut project = Project {
            id: 1,
            title: "Churn analysis".to_string(),
            client: "RetailCorp".to_string(),
            project_type: "Data Analysis".to_string(),
            status: ProjectStatus::Active,
            package_type: "Standard".to_string(),
            due_date: date(2025, 8, 5),
            progress: 40,
            price: 450.0,
        };

        let today = date(2025, 8, 10);
        assert!(project.is_overdue(today));
        assert_eq!(project.days_until_due(today), -5);

        project.status = ProjectStatus::Completed;
        assert!(!project.is_overdue(today));
    }
}
