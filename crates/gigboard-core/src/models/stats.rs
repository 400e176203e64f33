//! Business statistics shown on the dashboard

use serde::{Deserialize, Serialize};

/// Headline business numbers
///
/// Seeded from the sample dataset and kept consistent with the project
/// map as statuses change (completed work adds revenue).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStats {
    #[serde(default)]
    pub total_revenue: f64,

    /// Projects currently being worked (Active or In Progress)
    #[serde(default)]
    pub active_projects: u32,

    #[serde(default)]
    pub completed_projects: u32,

    #[serde(default)]
    pub total_clients: u32,

    /// Average first-response time in hours
    #[serde(default)]
    pub avg_response_hours: f64,

    /// Client satisfaction in percent
    #[serde(default)]
    pub satisfaction_rate: u8,

    /// Client retention in percent
    #[serde(default)]
    pub client_retention: u8,
}

impl BusinessStats {
    /// Average value of a completed project, 0 when none completed
    pub fn avg_project_value(&self) -> f64 {
        if self.completed_projects == 0 {
            return 0.0;
        }
        self.total_revenue / self.completed_projects as f64
    }

    /// Response time as shown on stat cards, e.g. "1.2 hours"
    pub fn response_display(&self) -> String {
        format!("{:.1} hours", self.avg_response_hours)
    }
}

/// One month of revenue for the trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Short month label, e.g. "Jan"
    pub month: String,
    pub revenue: f64,
}

impl RevenuePoint {
    pub fn new(month: impl Into<String>, revenue: f64) -> Self {
        Self {
            month: month.into(),
            revenue,
        }
    }
}

/// One slice of the service-mix breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSlice {
    pub name: String,
    /// Share of business in percent; slices are expected to sum to 100
    pub share: u8,
}

impl ServiceSlice {
    pub fn new(name: impl Into<String>, share: u8) -> Self {
        Self {
            name: name.into(),
            share,
        }
    }
}

/// True when the slices cover the whole business exactly
pub fn shares_sum_to_whole(slices: &[ServiceSlice]) -> bool {
    slices.iter().map(|s| s.share as u32).sum::<u32>() == 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_project_value_guards_zero_completed() {
        let stats = BusinessStats::default();
        assert_eq!(stats.avg_project_value(), 0.0);
    }

    #[test]
    fn test_avg_project_value() {
        let stats = BusinessStats {
            total_revenue: 12_450.0,
            completed_projects: 24,
            ..Default::default()
        };
        assert!((stats.avg_project_value() - 518.75).abs() < 0.001);
    }

    #[test]
    fn test_response_display_formatting() {
        let stats = BusinessStats {
            avg_response_hours: 1.2,
            ..Default::default()
        };
        assert_eq!(stats.response_display(), "1.2 hours");
    }

    #[test]
    fn test_shares_sum_check() {
        let full = vec![
            ServiceSlice::new("Market Research", 45),
            ServiceSlice::new("Data Analysis", 30),
            ServiceSlice::new("BI Dashboards", 15),
            ServiceSlice::new("Consulting", 10),
        ];
        assert!(shares_sum_to_whole(&full));

        let partial = vec![ServiceSlice::new("Consulting", 60)];
        assert!(!shares_sum_to_whole(&partial));
    }

    #[test]
    fn test_stats_parse_from_camel_case_json() {
        let raw = r#"{
            "totalRevenue": 12450,
            "activeProjects": 8,
            "completedProjects": 24,
            "totalClients": 15,
            "avgResponseHours": 1.2,
            "satisfactionRate": 98,
            "clientRetention": 87
        }"#;

        let stats: BusinessStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.active_projects, 8);
        assert_eq!(stats.satisfaction_rate, 98);
        assert!((stats.total_revenue - 12_450.0).abs() < f64::EPSILON);
    }
}
