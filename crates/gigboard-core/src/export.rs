//! Export functionality for projects and communications
//!
//! Provides simple, testable export with proper error handling.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::models::{Communication, Project};

/// Export projects to CSV format matching the Projects tab display
///
/// CSV columns: ID, Title, Client, Type, Status, Package, Due Date, Progress, Price
/// Rows keep the order of the input slice.
///
/// # Errors
/// Returns error if file creation or write operations fail
pub fn export_projects_to_csv(projects: &[Arc<Project>], path: &Path) -> Result<()> {
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "ID,Title,Client,Type,Status,Package,Due Date,Progress,Price"
    )
    .context("Failed to write CSV header")?;

    for project in projects {
        writeln!(
            writer,
            "{},\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",{},{:.2}",
            project.id,
            project.title,
            project.client,
            project.project_type,
            project.status.label(),
            project.package_type,
            project.due_date.format("%Y-%m-%d"),
            project.progress,
            project.price
        )
        .with_context(|| format!("Failed to write row for project {}", project.id))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Export projects to JSON format
///
/// Pretty-printed JSON array in the same shape the config files use.
pub fn export_projects_to_json(projects: &[Arc<Project>], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let projects_ref: Vec<&Project> = projects.iter().map(|p| p.as_ref()).collect();

    let json = serde_json::to_string_pretty(&projects_ref)
        .context("Failed to serialize projects to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}

/// Export communications to CSV format
///
/// CSV columns: Date, Time, Project, Client, Kind, Subject
pub fn export_communications_to_csv(communications: &[Communication], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);

    writeln!(writer, "Date,Time,Project,Client,Kind,Subject")
        .context("Failed to write CSV header")?;

    for comm in communications {
        writeln!(
            writer,
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"",
            comm.sent_at.format("%Y-%m-%d"),
            comm.sent_at.format("%H:%M:%S"),
            comm.project_title,
            comm.client,
            comm.kind.label(),
            comm.subject
        )
        .with_context(|| format!("Failed to write row for project {}", comm.project_id))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Export communications to JSON format, bodies included
pub fn export_communications_to_json(communications: &[Communication], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(communications)
        .context("Failed to serialize communications to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_data;
    use tempfile::TempDir;

    fn sample_projects() -> Vec<Arc<Project>> {
        sample_data().projects.into_iter().map(Arc::new).collect()
    }

    #[test]
    fn test_export_projects_csv_empty() {
        let projects: Vec<Arc<Project>> = vec![];
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("projects.csv");

        export_projects_to_csv(&projects, &csv_path).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(
            contents,
            "ID,Title,Client,Type,Status,Package,Due Date,Progress,Price\n"
        );
    }

    #[test]
    fn test_export_projects_csv_with_data() {
        let projects = sample_projects();
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("projects.csv");

        export_projects_to_csv(&projects, &csv_path).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 5); // Header + 4 projects
        assert!(lines[1].contains("TechStart Inc."));
        assert!(lines[1].contains("In Progress"));
        assert!(lines[1].contains("2025-08-10"));
        assert!(lines[1].contains("520.00"));
    }

    #[test]
    fn test_export_projects_json_round_trip() {
        let projects = sample_projects();
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("projects.json");

        export_projects_to_json(&projects, &json_path).unwrap();

        let contents = std::fs::read_to_string(&json_path).unwrap();
        let parsed: Vec<Project> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0].id, projects[0].id);
    }

    #[test]
    fn test_export_communications_csv() {
        let communications = sample_data().communications;
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("comms.csv");

        export_communications_to_csv(&communications, &csv_path).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines[0], "Date,Time,Project,Client,Kind,Subject");
        assert_eq!(lines.len(), communications.len() + 1);
    }

    #[test]
    fn test_export_creates_parent_directory() {
        let projects = sample_projects();
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("exports/nested/projects.csv");

        export_projects_to_csv(&projects, &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_export_communications_json_keeps_bodies() {
        let communications = sample_data().communications;
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("comms.json");

        export_communications_to_json(&communications, &json_path).unwrap();

        let contents = std::fs::read_to_string(&json_path).unwrap();
        let parsed: Vec<Communication> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), communications.len());
        assert!(!parsed[0].body.is_empty());
    }
}
