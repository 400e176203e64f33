//! Business report generation
//!
//! Renders a Markdown summary of the whole dashboard: lifetime figures,
//! revenue history, the project table, template usage, recent messages
//! and open follow-ups. Rendering is pure so the same report backs the
//! file export and the `report` subcommand's stdout mode.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

use crate::analytics::AnalyticsData;
use crate::progress::normalize_percent;
use crate::store::DashboardSnapshot;

/// Render the full report as Markdown
pub fn render_report(
    snapshot: &DashboardSnapshot,
    analytics: &AnalyticsData,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let currency = snapshot.currency.as_str();

    // Infallible writes into a String, results discarded
    let _ = writeln!(out, "# Freelance Business Report");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "**Generated**: {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "**Seller**: {}", snapshot.profile.seller_name);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(
        out,
        "| Total Revenue | {}{:.2} |",
        currency, snapshot.stats.total_revenue
    );
    let _ = writeln!(
        out,
        "| Active Projects | {} |",
        snapshot.stats.active_projects
    );
    let _ = writeln!(
        out,
        "| Completed Projects | {} |",
        snapshot.stats.completed_projects
    );
    let _ = writeln!(out, "| Clients | {} |", snapshot.stats.total_clients);
    let _ = writeln!(
        out,
        "| Avg Project Value | {}{:.2} |",
        currency, analytics.avg_project_value
    );
    let _ = writeln!(
        out,
        "| Pipeline Value | {}{:.2} |",
        currency, analytics.pipeline_value
    );
    let _ = writeln!(
        out,
        "| Completion Rate | {:.0}% |",
        analytics.completion_rate
    );
    let _ = writeln!(
        out,
        "| Avg Response Time | {} |",
        snapshot.stats.response_display()
    );
    let _ = writeln!(
        out,
        "| Satisfaction | {}% |",
        snapshot.stats.satisfaction_rate
    );
    let _ = writeln!(
        out,
        "| Client Retention | {}% |",
        snapshot.stats.client_retention
    );
    let _ = writeln!(out);

    if !analytics.monthly_revenue.is_empty() {
        let _ = writeln!(out, "## Monthly Revenue");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Month | Revenue |");
        let _ = writeln!(out, "|-------|---------|");
        for point in &analytics.monthly_revenue {
            let _ = writeln!(out, "| {} | {}{:.0} |", point.month, currency, point.revenue);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Last month: {}", analytics.revenue_trend);
        if let Some(best) = &analytics.best_month {
            let _ = writeln!(
                out,
                "Best month: {} ({}{:.0})",
                best.month, currency, best.revenue
            );
        }
        let _ = writeln!(out);
    }

    if !snapshot.projects.is_empty() {
        let _ = writeln!(out, "## Projects");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Title | Client | Status | Due | Progress | Price |");
        let _ = writeln!(out, "|-------|--------|--------|-----|----------|-------|");

        for project in &snapshot.projects {
            let progress = normalize_percent(Some(project.progress as f64), false);
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {}{:.0} |",
                project.title,
                project.client,
                project.status.label(),
                project.due_date.format("%Y-%m-%d"),
                progress.display_text,
                currency,
                project.price
            );
        }
        let _ = writeln!(out);
    }

    if !analytics.service_mix.is_empty() {
        let _ = writeln!(out, "## Service Mix");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Service | Share |");
        let _ = writeln!(out, "|---------|-------|");
        for slice in &analytics.service_mix {
            let _ = writeln!(out, "| {} | {}% |", slice.name, slice.share);
        }
        let _ = writeln!(out);
    }

    if !snapshot.top_templates.is_empty() {
        let _ = writeln!(out, "## Top Templates");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Template | Renders |");
        let _ = writeln!(out, "|----------|---------|");
        for template in &snapshot.top_templates {
            let _ = writeln!(out, "| {} | {} |", template.name, template.usage_count);
        }
        let _ = writeln!(out);
    }

    if !snapshot.communications.is_empty() {
        let _ = writeln!(out, "## Recent Communications");
        let _ = writeln!(out);
        for comm in snapshot.communications.iter().take(5) {
            let _ = writeln!(
                out,
                "- {} {} to {} ({})",
                comm.sent_at.format("%Y-%m-%d"),
                comm.kind.label(),
                comm.client,
                comm.project_title
            );
        }
        let _ = writeln!(out);
    }

    let open_follow_ups: Vec<_> = snapshot.follow_ups.iter().filter(|f| !f.done).collect();
    if !open_follow_ups.is_empty() {
        let _ = writeln!(out, "## Open Follow-ups");
        let _ = writeln!(out);
        for follow_up in open_follow_ups {
            let _ = writeln!(
                out,
                "- {} ({}) due {}",
                follow_up.project_title,
                follow_up.project_id,
                follow_up.due.format("%Y-%m-%d")
            );
        }
        let _ = writeln!(out);
    }

    out
}

/// Write the report to a file, creating parent directories as needed
pub fn write_report(
    snapshot: &DashboardSnapshot,
    analytics: &AnalyticsData,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let report = render_report(snapshot, analytics, Utc::now());

    std::fs::write(path, report)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;

    Ok(())
}
