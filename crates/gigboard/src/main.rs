//! gigboard - Freelance Business Dashboard

mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gigboard_core::automation::AutomationSummary;
use gigboard_core::models::ProjectStatus;
use gigboard_core::{export, report, AnalyticsData, DataStore, DataStoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gigboard",
    version,
    about = "Freelance Business Dashboard",
    long_about = "A terminal dashboard for running a freelance business.\n\
                  \n\
                  Tracks projects, clients, revenue and communications, renders message\n\
                  templates with live project data and sends the right client message\n\
                  automatically as a project moves through its workflow.\n\
                  \n\
                  Features:\n\
                    • 5 interactive tabs (Dashboard, Projects, Templates, Automation, Analytics)\n\
                    • Status workflow with automated client messages (press 's')\n\
                    • Template preview with clipboard copy (press 'y')\n\
                    • Follow-up scheduling and completion\n\
                    • Markdown business reports and CSV/JSON export\n\
                  \n\
                  Examples:\n\
                    gigboard                          # Run TUI (default)\n\
                    gigboard stats                    # Print business summary\n\
                    gigboard projects --status active # List active projects\n\
                    gigboard report -o report.md      # Write Markdown report\n\
                    gigboard export projects          # Export projects to CSV\n\
                    gigboard demo                     # Replay the automation walkthrough\n\
                  \n\
                  Environment Variables:\n\
                    GIGBOARD_CONFIG                   # Override config file path\n\
                    GIGBOARD_TEMPLATES_DIR            # Extra message templates directory\n\
                    GIGBOARD_NO_DEMO_DATA             # Start with an empty store\n\
                    GIGBOARD_NO_COLOR                 # Disable ANSI colors (log-friendly)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Path to config file (default: <config_dir>/gigboard/config.toml)
    #[arg(long, env = "GIGBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory with custom message templates (*.md with front matter)
    #[arg(long, env = "GIGBOARD_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    /// Start with an empty store instead of the demo business
    #[arg(long, env = "GIGBOARD_NO_DEMO_DATA")]
    no_demo_data: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "GIGBOARD_NO_COLOR")]
    no_color: bool,

    /// Verbose logging (debug level)
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Print business stats to terminal and exit
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List tracked projects
    Projects {
        /// Filter by status: pending, active, in_progress, completed
        #[arg(long, short = 's')]
        status: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate the Markdown business report
    Report {
        /// Output file (prints to stdout when omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Open the report after writing it
        #[arg(long, requires = "output")]
        open: bool,
    },
    /// Export data to CSV or JSON
    Export {
        /// What to export
        #[arg(value_parser = ["projects", "communications"])]
        target: String,
        /// Output format
        #[arg(long, short = 'f', default_value = "csv", value_parser = ["csv", "json"])]
        format: String,
        /// Output file (default: gigboard-<target>.<format>)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Walk every open project through its workflow, printing each
    /// automated message along the way
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let tui_mode = matches!(cli.mode, None | Some(Mode::Tui));
    init_tracing(cli.verbose, tui_mode);

    let store_config = DataStoreConfig {
        config_path: cli.config,
        templates_dir: cli.templates_dir,
        seed_demo_data: !cli.no_demo_data,
    };

    let no_color = cli.no_color;

    match cli.mode.unwrap_or(Mode::Tui) {
        Mode::Tui => run_tui(store_config).await,
        Mode::Stats { json } => run_stats(store_config, json),
        Mode::Projects { status, json } => run_projects(store_config, status, json, no_color),
        Mode::Report { output, open } => run_report(store_config, output, open),
        Mode::Export {
            target,
            format,
            output,
        } => run_export(store_config, &target, &format, output),
        Mode::Demo => run_demo(store_config),
    }
}

/// Set up the global subscriber. Subcommands log to stderr; the TUI owns
/// the terminal, so its logs go to a file under the user data dir.
/// RUST_LOG overrides the level either way.
fn init_tracing(verbose: bool, tui_mode: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    if tui_mode {
        let Some(path) = log_file_path() else { return };
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let Ok(file) = std::fs::File::options().create(true).append(true).open(&path) else {
            return;
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
        tracing::info!(path = %path.display(), "Logging to file");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("gigboard").join("gigboard.log"))
}

async fn run_tui(store_config: DataStoreConfig) -> Result<()> {
    // The store loads in the background; the TUI shows a spinner meanwhile
    let store = Arc::new(DataStore::new(store_config));
    gigboard_tui::run(store).await
}

// ============================================================================
// CLI Command Handlers
// ============================================================================

fn run_stats(store_config: DataStoreConfig, json: bool) -> Result<()> {
    let store = DataStore::new(store_config);
    let summary = store.load();

    let stats = store.stats();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?
        );
        return Ok(());
    }

    let currency = store.currency();

    println!("gigboard - Business Summary");
    println!("===========================");
    println!();
    println!("Total Revenue:    {}{:.2}", currency, stats.total_revenue);
    println!("Active Projects:  {}", stats.active_projects);
    println!("Completed:        {}", stats.completed_projects);
    println!("Clients:          {}", stats.total_clients);
    println!(
        "Avg Value:        {}{:.2}",
        currency,
        stats.avg_project_value()
    );
    println!("Avg Response:     {}", stats.response_display());
    println!("Satisfaction:     {}%", stats.satisfaction_rate);
    println!("Retention:        {}%", stats.client_retention);
    let automation = AutomationSummary::compute(
        &store.communications(),
        &store.follow_ups(),
        store.templates().len(),
        store.reports_generated(),
        Utc::now().date_naive(),
    );

    println!();
    println!("Projects tracked: {}", store.project_count());
    println!("Automation rules: {}", automation.active_rules);
    println!("Messages sent:    {}", automation.messages_sent);
    println!("Templates:        {}", automation.templates_available);
    println!("Template renders: {}", store.templates().total_usage());
    println!("Open follow-ups:  {}", automation.open_follow_ups);

    if summary.has_warnings() {
        println!();
        println!("Warnings:");
        for warning in &summary.warnings {
            println!("  - {}: {}", warning.source, warning.message);
        }
    }

    Ok(())
}

fn run_projects(
    store_config: DataStoreConfig,
    status: Option<String>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let store = DataStore::new(store_config);
    store.load();

    let filter = status
        .as_deref()
        .map(ProjectStatus::parse_strict)
        .transpose()
        .map_err(|message| cli::CliError::InvalidStatus { message })?;

    let mut projects = store.projects();
    if let Some(wanted) = filter {
        projects.retain(|p| p.status == wanted);
    }

    if projects.is_empty() {
        return Err(cli::CliError::NoProjects {
            filter: status,
            tracked: store.project_count(),
        }
        .into());
    }

    let currency = store.currency();
    println!(
        "{}",
        cli::format_project_table(&projects, &currency, json, no_color)
    );

    if !json {
        eprintln!("\n{} of {} projects", projects.len(), store.project_count());
    }

    Ok(())
}

fn run_report(
    store_config: DataStoreConfig,
    output: Option<PathBuf>,
    open_after: bool,
) -> Result<()> {
    let store = DataStore::new(store_config);
    store.load();

    let snapshot = store.snapshot();
    let analytics = AnalyticsData::compute(
        &snapshot.stats,
        &snapshot.revenue,
        &snapshot.projects,
        &snapshot.service_mix,
    );

    match output {
        Some(path) => {
            report::write_report(&snapshot, &analytics, &path)?;
            store.note_report_generated();
            println!("Report written to {}", path.display());

            if open_after {
                open::that(&path)
                    .with_context(|| format!("Failed to open report: {}", path.display()))?;
            }
        }
        None => {
            print!("{}", report::render_report(&snapshot, &analytics, Utc::now()));
        }
    }

    Ok(())
}

fn run_export(
    store_config: DataStoreConfig,
    target: &str,
    format: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let store = DataStore::new(store_config);
    store.load();

    let path =
        output.unwrap_or_else(|| PathBuf::from(format!("gigboard-{}.{}", target, format)));

    match target {
        "projects" => {
            let projects = store.projects();
            match format {
                "json" => export::export_projects_to_json(&projects, &path)?,
                _ => export::export_projects_to_csv(&projects, &path)?,
            }
            println!("Exported {} projects to {}", projects.len(), path.display());
        }
        _ => {
            let communications = store.communications();
            match format {
                "json" => export::export_communications_to_json(&communications, &path)?,
                _ => export::export_communications_to_csv(&communications, &path)?,
            }
            println!(
                "Exported {} messages to {}",
                communications.len(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Advance every open project to completion, one status at a time, and
/// show what the automation sends at each step.
fn run_demo(store_config: DataStoreConfig) -> Result<()> {
    let store = DataStore::new(store_config);
    store.load();

    let currency = store.currency();
    let stats_before = store.stats();
    let messages_before = store.communications().len();

    println!("gigboard - Automation Walkthrough");
    println!("=================================");

    let open_ids: Vec<u32> = store
        .projects()
        .iter()
        .filter(|p| p.is_open())
        .map(|p| p.id)
        .collect();

    if open_ids.is_empty() {
        println!();
        println!("Every project is already completed; nothing to walk through.");
        return Ok(());
    }

    for id in open_ids {
        let Some(project) = store.get_project(id) else {
            continue;
        };
        println!();
        println!("▶ {} ({})", project.title, project.client);

        while let Some(current) = store.get_project(id) {
            let Some(next) = current.status.next() else {
                break;
            };
            let kind = store.advance_project_status(id)?;
            println!("  {} → {}", current.status, next);

            if kind.is_some() {
                if let Some(comm) = store.communications().into_iter().next() {
                    println!("  ✉ {}: {}", comm.kind.label(), comm.subject);
                }
            }
        }

        let follow_up = store
            .follow_ups()
            .into_iter()
            .find(|f| f.project_id == id && !f.done);
        if let Some(follow_up) = follow_up {
            println!("  ⚑ Follow-up due {}", follow_up.due.format("%Y-%m-%d"));
        }
    }

    let stats_after = store.stats();
    let messages_sent = store.communications().len() - messages_before;

    println!();
    println!(
        "Revenue:       {}{:.2} → {}{:.2}",
        currency, stats_before.total_revenue, currency, stats_after.total_revenue
    );
    println!(
        "Completed:     {} → {}",
        stats_before.completed_projects, stats_after.completed_projects
    );
    println!("Messages sent: {}", messages_sent);

    Ok(())
}
