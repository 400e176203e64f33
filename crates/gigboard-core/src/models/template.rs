//! Message template and service package models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    GigDescription,
    Communication,
    Proposal,
}

impl TemplateCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TemplateCategory::GigDescription => "Gig Description",
            TemplateCategory::Communication => "Communication",
            TemplateCategory::Proposal => "Proposal",
        }
    }

    /// Parse a category string from template front matter. Unrecognized
    /// categories land in Communication.
    pub fn parse_lenient(s: &str) -> TemplateCategory {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "gig_description" | "gig" => TemplateCategory::GigDescription,
            "proposal" => TemplateCategory::Proposal,
            _ => TemplateCategory::Communication,
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reusable message template with `{placeholder}` variables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    /// Stable slug, e.g. "project_kickoff"
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub usage_count: u64,
    /// False for templates loaded from the user's templates directory
    #[serde(default)]
    pub builtin: bool,
}

impl MessageTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: TemplateCategory,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            subject: subject.into(),
            body: body.into(),
            usage_count: 0,
            builtin: false,
        }
    }

    /// Mark as shipped with the app, with its seeded usage count
    pub fn as_builtin(mut self, usage_count: u64) -> Self {
        self.builtin = true;
        self.usage_count = usage_count;
        self
    }
}

/// Gig package tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageTier {
    Basic,
    Standard,
    Premium,
}

impl PackageTier {
    pub fn all() -> [PackageTier; 3] {
        [
            PackageTier::Basic,
            PackageTier::Standard,
            PackageTier::Premium,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PackageTier::Basic => "Basic",
            PackageTier::Standard => "Standard",
            PackageTier::Premium => "Premium",
        }
    }

    /// Price multiplier applied to a gig's base price
    pub fn multiplier(&self) -> f64 {
        match self {
            PackageTier::Basic => 1.0,
            PackageTier::Standard => 2.0,
            PackageTier::Premium => 3.0,
        }
    }

    /// Parse a tier name case-insensitively. Unknown names read as Basic.
    pub fn parse_lenient(s: &str) -> PackageTier {
        match s.trim().to_lowercase().as_str() {
            "premium" => PackageTier::Premium,
            "standard" => PackageTier::Standard,
            _ => PackageTier::Basic,
        }
    }
}

impl fmt::Display for PackageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One sellable package of a gig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
    pub tier: PackageTier,
    pub price: f64,
    pub delivery_days: u32,
    /// None means unlimited revisions
    pub revisions: Option<u32>,
}

impl ServicePackage {
    pub fn revisions_display(&self) -> String {
        match self.revisions {
            Some(n) => n.to_string(),
            None => "Unlimited".to_string(),
        }
    }
}
