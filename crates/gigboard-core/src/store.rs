//! Data store with DashMap + parking_lot::RwLock
//!
//! Uses DashMap for projects (per-entry locking) and parking_lot::RwLock
//! for stats, config and the append-only logs (low contention).
//!
//! All mutation goes through the store so that stats stay consistent with
//! the project list and every change reaches the EventBus.

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::automation::run_automation;
use crate::config::{AppConfig, SellerProfile};
use crate::error::{CoreError, LoadSummary};
use crate::event::{DataEvent, EventBus};
use crate::models::{
    BusinessStats, Client, Communication, CommunicationKind, FollowUp, MessageTemplate, Project,
    ProjectStatus, RevenuePoint, ServiceSlice,
};
use crate::sample::sample_data;
use crate::templates::{RenderedMessage, TemplateStore, TemplateVars};

/// Configuration for DataStore initialization
#[derive(Debug, Clone)]
pub struct DataStoreConfig {
    /// Explicit config file path (overrides the platform default)
    pub config_path: Option<PathBuf>,
    /// Explicit custom templates directory (overrides the config file)
    pub templates_dir: Option<PathBuf>,
    /// Seed the built-in demo dataset on load
    pub seed_demo_data: bool,
}

impl Default for DataStoreConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            templates_dir: None,
            seed_demo_data: true,
        }
    }
}

/// Consistent view of the store for rendering, reports and export
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub stats: BusinessStats,
    pub revenue: Vec<RevenuePoint>,
    pub service_mix: Vec<ServiceSlice>,
    /// Sorted by id
    pub projects: Vec<Arc<Project>>,
    pub clients: Vec<Client>,
    /// Most recent first
    pub communications: Vec<Communication>,
    pub follow_ups: Vec<FollowUp>,
    /// Most-rendered templates, for the report
    pub top_templates: Vec<MessageTemplate>,
    pub profile: SellerProfile,
    pub currency: String,
}

/// Central state for the dashboard
pub struct DataStore {
    config: DataStoreConfig,

    /// Application config (profile, template dir, currency)
    app_config: RwLock<AppConfig>,

    /// Lifetime business figures
    stats: RwLock<BusinessStats>,

    /// Monthly revenue history, chronological
    revenue: RwLock<Vec<RevenuePoint>>,

    /// Revenue share per service category
    service_mix: RwLock<Vec<ServiceSlice>>,

    clients: RwLock<Vec<Client>>,

    /// Sent communications, most recent first
    communications: RwLock<Vec<Communication>>,

    follow_ups: RwLock<Vec<FollowUp>>,

    /// Tracked projects keyed by id
    projects: DashMap<u32, Arc<Project>>,

    templates: TemplateStore,

    event_bus: EventBus,

    reports_generated: RwLock<u32>,
}

impl DataStore {
    pub fn new(config: DataStoreConfig) -> Self {
        Self {
            config,
            app_config: RwLock::new(AppConfig::default()),
            stats: RwLock::new(BusinessStats::default()),
            revenue: RwLock::new(Vec::new()),
            service_mix: RwLock::new(Vec::new()),
            clients: RwLock::new(Vec::new()),
            communications: RwLock::new(Vec::new()),
            follow_ups: RwLock::new(Vec::new()),
            projects: DashMap::new(),
            templates: TemplateStore::with_builtins(),
            event_bus: EventBus::default_capacity(),
            reports_generated: RwLock::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DataStoreConfig::default())
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Load everything, collecting warnings instead of failing.
    ///
    /// Order matters: the config file names the custom templates
    /// directory, so it loads first.
    pub fn load(&self) -> LoadSummary {
        let mut summary = LoadSummary::new();

        info!("Starting data load");

        self.load_config(&mut summary);
        self.load_templates(&mut summary);

        if self.config.seed_demo_data {
            self.seed_demo(&mut summary);
        }

        self.event_bus.publish(DataEvent::Loaded);

        info!(
            config_loaded = summary.config_loaded,
            projects = summary.projects_seeded,
            templates = summary.templates_loaded(),
            warnings = summary.warnings.len(),
            "Data load complete"
        );

        summary
    }

    fn load_config(&self, summary: &mut LoadSummary) {
        let loaded = AppConfig::load_or_default(self.config.config_path.as_deref(), summary);
        let mut guard = self.app_config.write();
        *guard = loaded;
    }

    fn load_templates(&self, summary: &mut LoadSummary) {
        summary.builtin_templates = self.templates.builtin_count();

        let custom_dir = self
            .config
            .templates_dir
            .clone()
            .or_else(|| self.app_config.read().templates_dir.clone());

        if let Some(dir) = custom_dir {
            self.templates.load_custom_dir(&dir, summary);
        }

        debug!(count = self.templates.len(), "Templates ready");
    }

    fn seed_demo(&self, summary: &mut LoadSummary) {
        let data = sample_data();

        *self.stats.write() = data.stats;
        *self.revenue.write() = data.revenue;
        *self.service_mix.write() = data.service_mix;
        *self.clients.write() = data.clients;
        *self.follow_ups.write() = data.follow_ups;

        let mut communications = data.communications;
        communications.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        *self.communications.write() = communications;

        for project in data.projects {
            summary.projects_seeded += 1;
            self.projects.insert(project.id, Arc::new(project));
        }

        debug!(count = self.projects.len(), "Demo data seeded");
    }

    // ===================
    // Read accessors
    // ===================

    pub fn stats(&self) -> BusinessStats {
        self.stats.read().clone()
    }

    pub fn profile(&self) -> SellerProfile {
        self.app_config.read().profile.clone()
    }

    pub fn currency(&self) -> String {
        self.app_config.read().currency.clone()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn get_project(&self, id: u32) -> Option<Arc<Project>> {
        self.projects.get(&id).map(|p| Arc::clone(p.value()))
    }

    /// All projects sorted by id
    pub fn projects(&self) -> Vec<Arc<Project>> {
        let mut projects: Vec<Arc<Project>> =
            self.projects.iter().map(|p| Arc::clone(p.value())).collect();
        projects.sort_by_key(|p| p.id);
        projects
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn communications(&self) -> Vec<Communication> {
        self.communications.read().clone()
    }

    pub fn follow_ups(&self) -> Vec<FollowUp> {
        self.follow_ups.read().clone()
    }

    pub fn reports_generated(&self) -> u32 {
        *self.reports_generated.read()
    }

    /// One consistent view of everything the UI and exporters need
    pub fn snapshot(&self) -> DashboardSnapshot {
        let config = self.app_config.read();
        DashboardSnapshot {
            stats: self.stats.read().clone(),
            revenue: self.revenue.read().clone(),
            service_mix: self.service_mix.read().clone(),
            projects: self.projects(),
            clients: self.clients.read().clone(),
            communications: self.communications.read().clone(),
            follow_ups: self.follow_ups.read().clone(),
            top_templates: self.templates.top_by_usage(5),
            profile: config.profile.clone(),
            currency: config.currency.clone(),
        }
    }

    // ===================
    // Mutations
    // ===================

    /// Move a project along its workflow and run the automation for the
    /// new status. Returns the communication kind that was sent, if any.
    /// Completed projects have nowhere to go and advance to nothing.
    pub fn advance_project_status(&self, id: u32) -> Result<Option<CommunicationKind>, CoreError> {
        let project = self
            .get_project(id)
            .ok_or(CoreError::ProjectNotFound { id })?;

        let Some(next) = project.status.next() else {
            debug!(project = id, "Already completed, nothing to advance");
            return Ok(None);
        };
        self.set_project_status(id, next)
    }

    /// Put a project into `status`, updating stats and triggering the
    /// matching communication. A transition into the current status is a
    /// no-op. A failed message render surfaces its error after the status
    /// change has been committed; the transition stands.
    pub fn set_project_status(
        &self,
        id: u32,
        status: ProjectStatus,
    ) -> Result<Option<CommunicationKind>, CoreError> {
        let current = self
            .get_project(id)
            .ok_or(CoreError::ProjectNotFound { id })?;

        if current.status == status {
            debug!(project = id, status = %status, "Status unchanged, skipping");
            return Ok(None);
        }

        let mut updated = (*current).clone();
        updated.status = status;
        if status == ProjectStatus::Completed {
            updated.progress = 100;
        }
        let updated = Arc::new(updated);

        self.apply_stats_delta(current.status, &updated);

        info!(project = id, from = %current.status, to = %status, "Project status changed");
        self.projects.insert(id, Arc::clone(&updated));
        self.event_bus.publish(DataEvent::ProjectChanged(id));

        let profile = self.profile();
        let outcome = run_automation(&updated, &profile, &self.templates, Utc::now())?;

        let Some(outcome) = outcome else {
            return Ok(None);
        };

        let kind = outcome.communication.kind;
        self.communications.write().insert(0, outcome.communication);
        if let Some(follow_up) = outcome.follow_up {
            self.follow_ups.write().push(follow_up);
        }
        self.event_bus.publish(DataEvent::CommunicationLogged(id));

        Ok(Some(kind))
    }

    /// Keep lifetime counters in sync with a status transition
    fn apply_stats_delta(&self, old: ProjectStatus, updated: &Project) {
        fn counts_active(status: ProjectStatus) -> bool {
            matches!(status, ProjectStatus::Active | ProjectStatus::InProgress)
        }

        let mut stats = self.stats.write();

        if counts_active(old) && !counts_active(updated.status) {
            stats.active_projects = stats.active_projects.saturating_sub(1);
        } else if !counts_active(old) && counts_active(updated.status) {
            stats.active_projects += 1;
        }

        if updated.status == ProjectStatus::Completed && old != ProjectStatus::Completed {
            stats.completed_projects += 1;
            stats.total_revenue += updated.price;
        } else if old == ProjectStatus::Completed && updated.status != ProjectStatus::Completed {
            // Revenue already earned stays on the books
            stats.completed_projects = stats.completed_projects.saturating_sub(1);
        }
    }

    /// Render a template through the store so usage counts and events
    /// stay consistent
    pub fn render_template(
        &self,
        id: &str,
        vars: &TemplateVars,
    ) -> Result<RenderedMessage, CoreError> {
        let message = self.templates.render(id, vars)?;
        self.event_bus.publish(DataEvent::TemplatesChanged);
        Ok(message)
    }

    /// Mark the earliest open follow-up for a project as done
    pub fn complete_follow_up(&self, project_id: u32) -> bool {
        let mut follow_ups = self.follow_ups.write();
        let Some(entry) = follow_ups
            .iter_mut()
            .filter(|f| f.project_id == project_id && !f.done)
            .min_by_key(|f| f.due)
        else {
            return false;
        };
        entry.done = true;
        debug!(project = project_id, "Follow-up completed");
        true
    }

    pub fn note_report_generated(&self) {
        *self.reports_generated.write() += 1;
        self.event_bus.publish(DataEvent::ReportGenerated);
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_store() -> DataStore {
        let store = DataStore::with_defaults();
        store.load();
        store
    }

    #[test]
    fn test_load_seeds_demo_data() {
        let store = loaded_store();
        assert_eq!(store.project_count(), 4);
        assert!(store.templates().len() >= 6);
        assert!(!store.communications().is_empty());
    }

    #[test]
    fn test_load_summary_counts() {
        let store = DataStore::with_defaults();
        let summary = store.load();
        assert_eq!(summary.projects_seeded, 4);
        assert_eq!(summary.builtin_templates, 6);
    }

    #[test]
    fn test_no_demo_data_when_disabled() {
        let store = DataStore::new(DataStoreConfig {
            seed_demo_data: false,
            ..DataStoreConfig::default()
        });
        store.load();
        assert_eq!(store.project_count(), 0);
        assert!(store.communications().is_empty());
    }

    #[test]
    fn test_advance_status_sends_communication() {
        let store = loaded_store();
        // Project 4 is Pending in the demo data
        let before = store.communications().len();

        let kind = store.advance_project_status(4).unwrap();
        assert_eq!(kind, Some(CommunicationKind::ProjectKickoff));

        let project = store.get_project(4).unwrap();
        assert_eq!(project.status, ProjectStatus::Active);

        let communications = store.communications();
        assert_eq!(communications.len(), before + 1);
        assert_eq!(communications[0].project_id, 4);
    }

    #[test]
    fn test_completion_updates_stats_and_schedules_follow_up() {
        let store = loaded_store();
        let stats_before = store.stats();
        let follow_ups_before = store.follow_ups().len();
        let project = store.get_project(3).unwrap();

        store
            .set_project_status(3, ProjectStatus::Completed)
            .unwrap();

        let stats = store.stats();
        assert_eq!(stats.completed_projects, stats_before.completed_projects + 1);
        assert!(
            (stats.total_revenue - (stats_before.total_revenue + project.price)).abs()
                < f64::EPSILON
        );
        assert_eq!(
            stats.active_projects,
            stats_before.active_projects.saturating_sub(1)
        );

        let updated = store.get_project(3).unwrap();
        assert_eq!(updated.progress, 100);

        assert_eq!(store.follow_ups().len(), follow_ups_before + 1);
    }

    #[test]
    fn test_same_status_is_noop() {
        let store = loaded_store();
        let before = store.communications().len();

        // Project 1 is already InProgress in the demo data
        let kind = store
            .set_project_status(1, ProjectStatus::InProgress)
            .unwrap();
        assert_eq!(kind, None);
        assert_eq!(store.communications().len(), before);
    }

    #[test]
    fn test_unknown_project() {
        let store = loaded_store();
        let err = store.advance_project_status(999).unwrap_err();
        assert!(matches!(err, CoreError::ProjectNotFound { id: 999 }));
    }

    #[tokio::test]
    async fn test_status_change_publishes_events() {
        let store = loaded_store();
        let mut rx = store.event_bus().subscribe();

        store
            .set_project_status(4, ProjectStatus::Active)
            .unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(matches!(first, DataEvent::ProjectChanged(4)));
        assert!(matches!(second, DataEvent::CommunicationLogged(4)));
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let store = loaded_store();
        let snapshot = store.snapshot();
        let ids: Vec<u32> = snapshot.projects.iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_complete_follow_up() {
        let store = loaded_store();
        assert!(store.complete_follow_up(2));
        assert!(store.follow_ups().iter().all(|f| f.project_id != 2 || f.done));
        assert!(!store.complete_follow_up(2));
    }

    #[test]
    fn test_report_counter() {
        let store = loaded_store();
        assert_eq!(store.reports_generated(), 0);
        store.note_report_generated();
        assert_eq!(store.reports_generated(), 1);
    }
}
