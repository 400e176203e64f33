//! Status-driven client communication
//!
//! Moving a project into a new status sends the matching templated
//! message: kickoff on Active, update on In Progress, delivery note on
//! Completed. Completion also schedules a follow-up a week out.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::info;

use crate::config::SellerProfile;
use crate::error::CoreError;
use crate::models::{Communication, CommunicationKind, FollowUp, Project, ProjectStatus};
use crate::templates::{TemplateStore, TemplateVars};

/// Days between delivery and the scheduled follow-up
pub const FOLLOW_UP_DELAY_DAYS: i64 = 7;

const DEFAULT_CURRENT_TASK: &str = "Data analysis and insights generation";
const DEFAULT_NEXT_STEPS: &str =
    "• Complete analysis\n• Generate recommendations\n• Prepare final report";
const DEFAULT_DELIVERABLES: &str = "• Comprehensive analysis report\n• Executive summary\n• Data visualizations\n• Strategic recommendations";
const DEFAULT_KEY_FINDINGS: &str =
    "Key insights and actionable recommendations included in the full report.";

/// Communication triggered by entering `status`, if any
pub fn trigger_for(status: ProjectStatus) -> Option<CommunicationKind> {
    match status {
        ProjectStatus::Active => Some(CommunicationKind::ProjectKickoff),
        ProjectStatus::InProgress => Some(CommunicationKind::ProgressUpdate),
        ProjectStatus::Completed => Some(CommunicationKind::DeliveryNotification),
        ProjectStatus::Pending => None,
    }
}

/// Base variables shared by every automated message for a project
pub fn vars_for(project: &Project, profile: &SellerProfile) -> TemplateVars {
    TemplateVars::new()
        .with("client_name", &project.client)
        .with("seller_name", &profile.seller_name)
        .with(
            "service_type",
            profile
                .service_type
                .clone()
                .unwrap_or_else(|| project.project_type.clone()),
        )
        .with("project_title", &project.title)
        .with("project_type", &project.project_type)
        .with("package_type", &project.package_type)
        .with("due_date", project.due_date.format("%Y-%m-%d").to_string())
}

/// Fill in the variables a particular message kind needs beyond the base
/// set. Values mirror what a seller would type for a typical engagement.
fn enrich(kind: CommunicationKind, project: &Project, vars: TemplateVars) -> TemplateVars {
    match kind {
        CommunicationKind::ProgressUpdate => vars
            .with("progress_percentage", project.progress.to_string())
            .with("current_task", DEFAULT_CURRENT_TASK)
            .with("next_steps", DEFAULT_NEXT_STEPS),
        CommunicationKind::DeliveryNotification => vars
            .with("deliverables_list", DEFAULT_DELIVERABLES)
            .with("key_findings", DEFAULT_KEY_FINDINGS),
        _ => vars,
    }
}

/// What an automation run produced
#[derive(Debug, Clone)]
pub struct AutomationOutcome {
    pub communication: Communication,
    pub follow_up: Option<FollowUp>,
}

/// Run the automation for a project that just entered its current status.
///
/// Returns `Ok(None)` when the status has no trigger. `now` stamps the
/// communication and anchors the follow-up date.
pub fn run_automation(
    project: &Project,
    profile: &SellerProfile,
    templates: &TemplateStore,
    now: DateTime<Utc>,
) -> Result<Option<AutomationOutcome>, CoreError> {
    let Some(kind) = trigger_for(project.status) else {
        return Ok(None);
    };

    let vars = enrich(kind, project, vars_for(project, profile));
    let message = templates.render(kind.template_id(), &vars)?;

    info!(
        project = project.id,
        template = kind.template_id(),
        "Automated communication sent"
    );

    let communication = Communication {
        project_id: project.id,
        project_title: project.title.clone(),
        client: project.client.clone(),
        kind,
        subject: message.subject,
        body: message.body,
        sent_at: now,
    };

    let follow_up = (kind == CommunicationKind::DeliveryNotification).then(|| FollowUp {
        project_id: project.id,
        project_title: project.title.clone(),
        due: (now + Duration::days(FOLLOW_UP_DELAY_DAYS)).date_naive(),
        done: false,
    });

    Ok(Some(AutomationOutcome {
        communication,
        follow_up,
    }))
}

/// Counts for the automation summary row, shown on the automation tab
/// and in `gigboard stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomationSummary {
    /// Statuses that trigger a message when entered
    pub active_rules: usize,
    pub messages_sent: usize,
    pub templates_available: usize,
    pub reports_generated: u32,
    pub open_follow_ups: usize,
    pub completed_follow_ups: usize,
    /// Open follow-ups whose date has arrived
    pub due_follow_ups: usize,
}

impl AutomationSummary {
    pub fn compute(
        communications: &[Communication],
        follow_ups: &[FollowUp],
        templates_available: usize,
        reports_generated: u32,
        today: NaiveDate,
    ) -> Self {
        let active_rules = ProjectStatus::all()
            .iter()
            .filter(|status| trigger_for(**status).is_some())
            .count();
        let open_follow_ups = follow_ups.iter().filter(|f| !f.done).count();

        Self {
            active_rules,
            messages_sent: communications.len(),
            templates_available,
            reports_generated,
            open_follow_ups,
            completed_follow_ups: follow_ups.len() - open_follow_ups,
            due_follow_ups: follow_ups.iter().filter(|f| f.is_due(today)).count(),
        }
    }
}
