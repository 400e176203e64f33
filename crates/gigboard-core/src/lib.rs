//! gigboard-core - Core library for gigboard
//!
//! Provides the domain models, data store, template engine, automation
//! and analytics behind the freelance dashboard.

pub mod analytics;
pub mod automation;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod models;
pub mod preferences;
pub mod progress;
pub mod report;
pub mod sample;
pub mod store;
pub mod templates;

pub use analytics::AnalyticsData;
pub use config::{AppConfig, ColorScheme, SellerProfile};
pub use error::{CoreError, LoadSummary};
pub use event::{DataEvent, EventBus};
pub use progress::{normalize, normalize_percent, InvalidRange, Normalized, ProgressRange};
pub use store::{DashboardSnapshot, DataStore, DataStoreConfig};
pub use templates::{TemplateStore, TemplateVars};
