//! Business analytics
//!
//! Aggregates lifetime stats, revenue history and the project list into
//! the figures the Analytics tab and the report renderer display.

use std::sync::Arc;

use crate::models::{BusinessStats, Project, ProjectStatus, RevenuePoint, ServiceSlice};

/// Direction of a month-over-month movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Relative change between two consecutive values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Percent change vs the previous value, already signed
    pub delta_pct: f64,
}

impl Trend {
    pub fn flat() -> Self {
        Self {
            direction: TrendDirection::Flat,
            delta_pct: 0.0,
        }
    }

    /// Movement from `previous` to `current`.
    ///
    /// A zero previous value cannot anchor a percentage, so any growth
    /// from zero reads as +100%.
    pub fn between(previous: f64, current: f64) -> Self {
        if previous <= 0.0 {
            return if current > 0.0 {
                Self {
                    direction: TrendDirection::Up,
                    delta_pct: 100.0,
                }
            } else {
                Self::flat()
            };
        }

        let delta_pct = (current - previous) / previous * 100.0;
        let direction = if delta_pct > 0.05 {
            TrendDirection::Up
        } else if delta_pct < -0.05 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        };

        Self {
            direction,
            delta_pct,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self.direction {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Flat => "→",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:+.1}%", self.arrow(), self.delta_pct)
    }
}

/// Derived business figures
#[derive(Debug, Clone)]
pub struct AnalyticsData {
    /// Last month vs the month before
    pub revenue_trend: Trend,
    pub monthly_revenue: Vec<RevenuePoint>,
    pub best_month: Option<RevenuePoint>,
    pub total_revenue: f64,
    /// Completed share of all tracked projects, in percent
    pub completion_rate: f64,
    pub avg_project_value: f64,
    /// Unrealized value sitting in open projects
    pub pipeline_value: f64,
    /// Every status with its project count, workflow order
    pub status_distribution: Vec<(ProjectStatus, usize)>,
    pub service_mix: Vec<ServiceSlice>,
}

impl AnalyticsData {
    /// Empty placeholder shown before the first load finishes
    pub fn empty() -> Self {
        Self {
            revenue_trend: Trend::flat(),
            monthly_revenue: Vec::new(),
            best_month: None,
            total_revenue: 0.0,
            completion_rate: 0.0,
            avg_project_value: 0.0,
            pipeline_value: 0.0,
            status_distribution: ProjectStatus::all().iter().map(|s| (*s, 0)).collect(),
            service_mix: Vec::new(),
        }
    }

    /// Compute everything from a consistent snapshot of the store
    pub fn compute(
        stats: &BusinessStats,
        revenue: &[RevenuePoint],
        projects: &[Arc<Project>],
        service_mix: &[ServiceSlice],
    ) -> Self {
        let revenue_trend = match revenue {
            [.., previous, current] => Trend::between(previous.revenue, current.revenue),
            _ => Trend::flat(),
        };

        let best_month = revenue
            .iter()
            .max_by(|a, b| a.revenue.total_cmp(&b.revenue))
            .cloned();

        let tracked = projects.len();
        let completed = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count();
        let completion_rate = if tracked == 0 {
            0.0
        } else {
            completed as f64 / tracked as f64 * 100.0
        };

        let pipeline_value = projects
            .iter()
            .filter(|p| p.is_open())
            .map(|p| p.price)
            .sum();

        let status_distribution = ProjectStatus::all()
            .iter()
            .map(|status| {
                let count = projects.iter().filter(|p| p.status == *status).count();
                (*status, count)
            })
            .collect();

        Self {
            revenue_trend,
            monthly_revenue: revenue.to_vec(),
            best_month,
            total_revenue: stats.total_revenue,
            completion_rate,
            avg_project_value: stats.avg_project_value(),
            pipeline_value,
            status_distribution,
            service_mix: service_mix.to_vec(),
        }
    }
}
