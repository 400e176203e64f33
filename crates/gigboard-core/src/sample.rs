//! Built-in sample dataset
//!
//! The dashboard ships with a demo business so every screen renders with
//! realistic content out of the box.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    BusinessStats, Client, Communication, CommunicationKind, FollowUp, Project, ProjectStatus,
    RevenuePoint, ServiceSlice,
};

/// Everything the store seeds at startup
#[derive(Debug, Clone)]
pub struct SampleData {
    pub stats: BusinessStats,
    pub revenue: Vec<RevenuePoint>,
    pub service_mix: Vec<ServiceSlice>,
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub communications: Vec<Communication>,
    pub follow_ups: Vec<FollowUp>,
}

pub fn sample_data() -> SampleData {
    SampleData {
        stats: sample_stats(),
        revenue: sample_revenue(),
        service_mix: sample_service_mix(),
        projects: sample_projects(),
        clients: sample_clients(),
        communications: sample_communications(),
        follow_ups: sample_follow_ups(),
    }
}

fn sample_stats() -> BusinessStats {
    BusinessStats {
        total_revenue: 12_450.0,
        active_projects: 8,
        completed_projects: 24,
        total_clients: 15,
        avg_response_hours: 1.2,
        satisfaction_rate: 98,
        client_retention: 87,
    }
}

fn sample_revenue() -> Vec<RevenuePoint> {
    vec![
        RevenuePoint::new("Jan", 2400.0),
        RevenuePoint::new("Feb", 3200.0),
        RevenuePoint::new("Mar", 2800.0),
        RevenuePoint::new("Apr", 4100.0),
        RevenuePoint::new("May", 3600.0),
        RevenuePoint::new("Jun", 4200.0),
    ]
}

fn sample_service_mix() -> Vec<ServiceSlice> {
    vec![
        ServiceSlice::new("Market Research", 45),
        ServiceSlice::new("Data Analysis", 30),
        ServiceSlice::new("BI Dashboards", 15),
        ServiceSlice::new("Consulting", 10),
    ]
}

fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "E-commerce Market Analysis".to_string(),
            client: "TechStart Inc.".to_string(),
            project_type: "Market Research".to_string(),
            status: ProjectStatus::InProgress,
            package_type: "Standard".to_string(),
            due_date: date(2025, 8, 10),
            progress: 75,
            price: 520.0,
        },
        Project {
            id: 2,
            title: "Customer Behavior Dashboard".to_string(),
            client: "RetailCorp".to_string(),
            project_type: "BI Dashboards".to_string(),
            status: ProjectStatus::Completed,
            package_type: "Premium".to_string(),
            due_date: date(2025, 8, 5),
            progress: 100,
            price: 450.0,
        },
        Project {
            id: 3,
            title: "Financial Data Analysis".to_string(),
            client: "FinanceFlow".to_string(),
            project_type: "Data Analysis".to_string(),
            status: ProjectStatus::Active,
            package_type: "Standard".to_string(),
            due_date: date(2025, 8, 15),
            progress: 25,
            price: 680.0,
        },
        Project {
            id: 4,
            title: "Strategic Consulting".to_string(),
            client: "GrowthCo".to_string(),
            project_type: "Consulting".to_string(),
            status: ProjectStatus::Pending,
            package_type: "Basic".to_string(),
            due_date: date(2025, 8, 20),
            progress: 0,
            price: 950.0,
        },
    ]
}

fn sample_clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Priya Raman".to_string(),
            company: "TechStart Inc.".to_string(),
        },
        Client {
            id: 2,
            name: "Marcus Webb".to_string(),
            company: "RetailCorp".to_string(),
        },
        Client {
            id: 3,
            name: "Elena Fischer".to_string(),
            company: "FinanceFlow".to_string(),
        },
        Client {
            id: 4,
            name: "Sam Okafor".to_string(),
            company: "GrowthCo".to_string(),
        },
    ]
}

fn sample_communications() -> Vec<Communication> {
    vec![
        Communication {
            project_id: 1,
            project_title: "E-commerce Market Analysis".to_string(),
            client: "TechStart Inc.".to_string(),
            kind: CommunicationKind::ProjectKickoff,
            subject: "Project Kickoff - E-commerce Market Analysis".to_string(),
            body: "Hi TechStart Inc., excited to start on your Market Research project. \
                   Delivery is planned for 2025-08-10."
                .to_string(),
            sent_at: datetime(2025, 7, 28, 9, 15),
        },
        Communication {
            project_id: 1,
            project_title: "E-commerce Market Analysis".to_string(),
            client: "TechStart Inc.".to_string(),
            kind: CommunicationKind::ProgressUpdate,
            subject: "Progress Update - E-commerce Market Analysis".to_string(),
            body: "Hi TechStart Inc., quick update: the analysis is 60% complete and on \
                   track for 2025-08-10."
                .to_string(),
            sent_at: datetime(2025, 8, 2, 14, 40),
        },
        Communication {
            project_id: 2,
            project_title: "Customer Behavior Dashboard".to_string(),
            client: "RetailCorp".to_string(),
            kind: CommunicationKind::DeliveryNotification,
            subject: "Project Complete - Customer Behavior Dashboard".to_string(),
            body: "Hi RetailCorp, your BI Dashboards project is complete. All dashboards \
                   and the executive summary are attached."
                .to_string(),
            sent_at: datetime(2025, 8, 5, 11, 5),
        },
    ]
}

fn sample_follow_ups() -> Vec<FollowUp> {
    vec![FollowUp {
        project_id: 2,
        project_title: "Customer Behavior Dashboard".to_string(),
        due: date(2025, 8, 12),
        done: false,
    }]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    date(y, m, d)
        .and_hms_opt(h, min, 0)
        .unwrap_or_default()
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::shares_sum_to_whole;

    #[test]
    fn test_sample_projects_cover_every_status() {
        let projects = sample_projects();
        for status in ProjectStatus::all() {
            assert!(
                projects.iter().any(|p| p.status == status),
                "no sample project with status {}",
                status
            );
        }
    }

    #[test]
    fn test_sample_service_mix_is_complete() {
        assert!(shares_sum_to_whole(&sample_service_mix()));
    }

    #[test]
    fn test_sample_revenue_covers_six_months() {
        let revenue = sample_revenue();
        assert_eq!(revenue.len(), 6);
        assert_eq!(revenue[0].month, "Jan");
        assert_eq!(revenue[5].revenue, 4200.0);
    }

    #[test]
    fn test_completed_sample_project_is_fully_progressed() {
        let projects = sample_projects();
        let completed = projects
            .iter()
            .find(|p| p.status == ProjectStatus::Completed)
            .unwrap();
        assert_eq!(completed.progress, 100);
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let projects = sample_projects();
        let mut ids: Vec<u32> = projects.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), projects.len());
    }
}
