//! TUI tab implementations

pub mod analytics;
pub mod automation;
pub mod dashboard;
pub mod projects;
pub mod templates;

pub use analytics::AnalyticsTab;
pub use automation::AutomationTab;
pub use dashboard::DashboardTab;
pub use projects::ProjectsTab;
pub use templates::TemplatesTab;
