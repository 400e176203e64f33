//! Integration tests for the full status workflow through the public API

use gigboard_core::analytics::AnalyticsData;
use gigboard_core::export::export_projects_to_csv;
use gigboard_core::models::{CommunicationKind, ProjectStatus};
use gigboard_core::report::write_report;
use gigboard_core::{CoreError, DataStore, DataStoreConfig};
use tempfile::TempDir;

#[test]
fn test_full_project_lifecycle() {
    let store = DataStore::with_defaults();
    let summary = store.load();
    assert!(!summary.has_warnings(), "{:?}", summary.warnings);

    // Project 4 is Pending in the demo data; walk it through the workflow
    let stats_start = store.stats();
    let comms_start = store.communications().len();

    let kinds: Vec<_> = (0..3)
        .map(|_| store.advance_project_status(4).unwrap())
        .collect();

    assert_eq!(
        kinds,
        vec![
            Some(CommunicationKind::ProjectKickoff),
            Some(CommunicationKind::ProgressUpdate),
            Some(CommunicationKind::DeliveryNotification),
        ]
    );

    let project = store.get_project(4).unwrap();
    assert_eq!(project.status, ProjectStatus::Completed);
    assert_eq!(project.progress, 100);

    // Completed is terminal, another advance changes nothing
    assert_eq!(store.advance_project_status(4).unwrap(), None);

    let stats = store.stats();
    assert_eq!(
        stats.completed_projects,
        stats_start.completed_projects + 1
    );
    assert!(
        (stats.total_revenue - (stats_start.total_revenue + project.price)).abs() < f64::EPSILON
    );
    assert_eq!(stats.active_projects, stats_start.active_projects);

    let communications = store.communications();
    assert_eq!(communications.len(), comms_start + 3);
    // Most recent first
    assert_eq!(
        communications[0].kind,
        CommunicationKind::DeliveryNotification
    );
    assert!(communications[0].body.contains(&project.client));

    // Delivery scheduled a follow-up a week out
    let follow_up = store
        .follow_ups()
        .into_iter()
        .find(|f| f.project_id == 4)
        .expect("completion schedules a follow-up");
    assert!(!follow_up.done);
    assert_eq!(
        follow_up.due,
        (chrono::Utc::now() + chrono::Duration::days(7)).date_naive()
    );
}

#[test]
fn test_custom_template_drives_automation() {
    let templates_dir = TempDir::new().unwrap();
    std::fs::write(
        templates_dir.path().join("project_kickoff.md"),
        "---\nname: Short Kickoff\nsubject: Starting {project_title}\n---\nOn it, {client_name}!",
    )
    .unwrap();

    let store = DataStore::new(DataStoreConfig {
        templates_dir: Some(templates_dir.path().to_path_buf()),
        ..DataStoreConfig::default()
    });
    let summary = store.load();
    assert_eq!(summary.custom_templates, 1);

    let kind = store.advance_project_status(4).unwrap();
    assert_eq!(kind, Some(CommunicationKind::ProjectKickoff));

    let latest = &store.communications()[0];
    assert!(latest.subject.starts_with("Starting "));
    assert_eq!(latest.body, "On it, GrowthCo!");
}

#[test]
fn test_failed_render_keeps_status_change() {
    let templates_dir = TempDir::new().unwrap();
    std::fs::write(
        templates_dir.path().join("project_kickoff.md"),
        "---\nname: Broken Kickoff\nsubject: Starting {project_title}\n---\nHi {signature_block}",
    )
    .unwrap();

    let store = DataStore::new(DataStoreConfig {
        templates_dir: Some(templates_dir.path().to_path_buf()),
        ..DataStoreConfig::default()
    });
    store.load();
    let comms_before = store.communications().len();

    let err = store.advance_project_status(4).unwrap_err();
    assert!(matches!(
        err,
        CoreError::MissingVariable { ref variable, .. } if variable == "signature_block"
    ));

    // The transition stands, only the send was lost
    assert_eq!(
        store.get_project(4).unwrap().status,
        ProjectStatus::Active
    );
    assert_eq!(store.communications().len(), comms_before);
}

#[test]
fn test_snapshot_feeds_report_and_export() {
    let store = DataStore::with_defaults();
    store.load();
    store
        .set_project_status(3, ProjectStatus::Completed)
        .unwrap();

    let snapshot = store.snapshot();
    let analytics = AnalyticsData::compute(
        &snapshot.stats,
        &snapshot.revenue,
        &snapshot.projects,
        &snapshot.service_mix,
    );

    // Two of four demo projects completed after the transition above
    assert!((analytics.completion_rate - 50.0).abs() < f64::EPSILON);

    let out_dir = TempDir::new().unwrap();

    let report_path = out_dir.path().join("report.md");
    write_report(&snapshot, &analytics, &report_path).unwrap();
    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("| Completion Rate | 50% |"));

    let csv_path = out_dir.path().join("projects.csv");
    export_projects_to_csv(&snapshot.projects, &csv_path).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.contains("Completed"));
}
