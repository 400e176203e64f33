//! Communication log and follow-up models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of automated communication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationKind {
    InitialInquiry,
    ProjectKickoff,
    ProgressUpdate,
    DeliveryNotification,
    FollowUp,
}

impl CommunicationKind {
    /// Slug of the template this kind renders
    pub fn template_id(&self) -> &'static str {
        match self {
            CommunicationKind::InitialInquiry => "initial_inquiry",
            CommunicationKind::ProjectKickoff => "project_kickoff",
            CommunicationKind::ProgressUpdate => "progress_update",
            CommunicationKind::DeliveryNotification => "delivery_notification",
            CommunicationKind::FollowUp => "follow_up",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommunicationKind::InitialInquiry => "Initial Inquiry",
            CommunicationKind::ProjectKickoff => "Project Kickoff",
            CommunicationKind::ProgressUpdate => "Progress Update",
            CommunicationKind::DeliveryNotification => "Delivery Notification",
            CommunicationKind::FollowUp => "Follow-up",
        }
    }
}

impl fmt::Display for CommunicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rendered message recorded in the communications log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    pub project_id: u32,
    pub project_title: String,
    pub client: String,
    pub kind: CommunicationKind,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// A scheduled follow-up for a delivered project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub project_id: u32,
    pub project_title: String,
    pub due: NaiveDate,
    #[serde(default)]
    pub done: bool,
}

impl FollowUp {
    pub fn is_due(&self, today: NaiveDate) -> bool {
        !self.done && self.due <= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_template_ids_match_builtin_slugs() {
        assert_eq!(CommunicationKind::ProjectKickoff.template_id(), "project_kickoff");
        assert_eq!(
            CommunicationKind::DeliveryNotification.template_id(),
            "delivery_notification"
        );
    }

    #[test]
    fn test_follow_up_due_check() {
        let follow_up = FollowUp {
            project_id: 2,
            project_title: "Customer Behavior Dashboard".to_string(),
            due: NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            done: false,
        };

        let before = NaiveDate::from_ymd_opt(2025, 8, 11).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 8, 13).unwrap();
        assert!(!follow_up.is_due(before));
        assert!(follow_up.is_due(after));

        let done = FollowUp {
            done: true,
            ..follow_up
        };
        assert!(!done.is_due(after));
    }
}
