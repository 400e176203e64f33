//! Data models for gigboard

pub mod communication;
pub mod project;
pub mod stats;
pub mod template;

pub use communication::{Communication, CommunicationKind, FollowUp};
pub use project::{Client, Project, ProjectStatus};
pub use stats::{BusinessStats, RevenuePoint, ServiceSlice};
pub use template::{MessageTemplate, PackageTier, ServicePackage, TemplateCategory};
