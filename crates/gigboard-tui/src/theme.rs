//! Unified theme and color system for the gigboard TUI
//!
//! One color language across all tabs:
//! - Green: Completed, healthy, success
//! - Blue: In progress, steady work
//! - Yellow: Active, needs attention soon
//! - Gray: Pending, neutral
//! - Cyan: Selected, focus, interactive
//! - Magenta: High value, premium

use gigboard_core::analytics::TrendDirection;
use gigboard_core::config::ColorScheme;
use gigboard_core::models::{CommunicationKind, PackageTier, ProjectStatus};
use ratatui::style::Color;

/// Base status palette following k9s/lazygit conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Error,
    Warning,
    Neutral,
    Focus,
    Important,
    Steady,
}

impl StatusColor {
    /// Convert to a Ratatui color for the active scheme
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => match self {
                StatusColor::Success => Color::Green,
                StatusColor::Error => Color::Red,
                StatusColor::Warning => Color::Yellow,
                StatusColor::Neutral => Color::DarkGray,
                StatusColor::Focus => Color::Cyan,
                StatusColor::Important => Color::Magenta,
                StatusColor::Steady => Color::Blue,
            },
            ColorScheme::Light => match self {
                StatusColor::Success => Color::Rgb(0, 128, 0),
                StatusColor::Error => Color::Rgb(200, 0, 0),
                StatusColor::Warning => Color::Rgb(180, 120, 0),
                StatusColor::Neutral => Color::Gray,
                StatusColor::Focus => Color::Rgb(0, 128, 128),
                StatusColor::Important => Color::Rgb(128, 0, 128),
                StatusColor::Steady => Color::Rgb(0, 80, 200),
            },
        }
    }
}

/// Project status semantic color
pub struct ProjectStatusColor(pub ProjectStatus);

impl ProjectStatusColor {
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        let status = match self.0 {
            ProjectStatus::Completed => StatusColor::Success,
            ProjectStatus::InProgress => StatusColor::Steady,
            ProjectStatus::Active => StatusColor::Warning,
            ProjectStatus::Pending => StatusColor::Neutral,
        };
        status.to_color(scheme)
    }

    pub fn icon(&self) -> &'static str {
        match self.0 {
            ProjectStatus::Completed => "✓",
            ProjectStatus::InProgress => "▶",
            ProjectStatus::Active => "●",
            ProjectStatus::Pending => "○",
        }
    }
}

/// Package tier semantic color
pub struct TierColor(pub PackageTier);

impl TierColor {
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        let status = match self.0 {
            PackageTier::Premium => StatusColor::Important,
            PackageTier::Standard => StatusColor::Focus,
            PackageTier::Basic => StatusColor::Neutral,
        };
        status.to_color(scheme)
    }
}

/// Communication kind semantic color
pub struct CommunicationKindColor(pub CommunicationKind);

impl CommunicationKindColor {
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        let status = match self.0 {
            CommunicationKind::InitialInquiry => StatusColor::Focus,
            CommunicationKind::ProjectKickoff => StatusColor::Success,
            CommunicationKind::ProgressUpdate => StatusColor::Steady,
            CommunicationKind::DeliveryNotification => StatusColor::Important,
            CommunicationKind::FollowUp => StatusColor::Warning,
        };
        status.to_color(scheme)
    }
}

/// Trend arrow semantic color
pub struct TrendColor(pub TrendDirection);

impl TrendColor {
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        let status = match self.0 {
            TrendDirection::Up => StatusColor::Success,
            TrendDirection::Down => StatusColor::Error,
            TrendDirection::Flat => StatusColor::Neutral,
        };
        status.to_color(scheme)
    }
}

/// Progress bar color by completion level
pub enum ProgressLevelColor {
    /// <35% done
    Early,
    /// 35-75% done
    Underway,
    /// >75% done
    NearDone,
}

impl ProgressLevelColor {
    pub fn from_percentage(pct: u16) -> Self {
        if pct > 75 {
            ProgressLevelColor::NearDone
        } else if pct >= 35 {
            ProgressLevelColor::Underway
        } else {
            ProgressLevelColor::Early
        }
    }

    pub fn to_color(self, scheme: ColorScheme) -> Color {
        let status = match self {
            ProgressLevelColor::Early => StatusColor::Warning,
            ProgressLevelColor::Underway => StatusColor::Steady,
            ProgressLevelColor::NearDone => StatusColor::Success,
        };
        status.to_color(scheme)
    }
}

/// Due date urgency color
pub enum DueDateColor {
    /// Past due and still open
    Overdue,
    /// Due within 3 days
    Soon,
    /// Comfortably in the future
    Later,
}

impl DueDateColor {
    pub fn from_days_left(days: i64, open: bool) -> Self {
        if !open {
            DueDateColor::Later
        } else if days < 0 {
            DueDateColor::Overdue
        } else if days <= 3 {
            DueDateColor::Soon
        } else {
            DueDateColor::Later
        }
    }

    pub fn to_color(self, scheme: ColorScheme) -> Color {
        let status = match self {
            DueDateColor::Overdue => StatusColor::Error,
            DueDateColor::Soon => StatusColor::Warning,
            DueDateColor::Later => StatusColor::Neutral,
        };
        status.to_color(scheme)
    }
}

/// Base color helpers for backgrounds and foregrounds
pub struct BaseColors;

impl BaseColors {
    pub fn fg(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => Color::White,
            ColorScheme::Light => Color::Black,
        }
    }

    pub fn muted(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => Color::DarkGray,
            ColorScheme::Light => Color::Gray,
        }
    }

    pub fn selection_bg(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => Color::DarkGray,
            ColorScheme::Light => Color::Rgb(220, 220, 220),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_icons() {
        assert_eq!(ProjectStatusColor(ProjectStatus::Completed).icon(), "✓");
        assert_eq!(ProjectStatusColor(ProjectStatus::InProgress).icon(), "▶");
        assert_eq!(ProjectStatusColor(ProjectStatus::Active).icon(), "●");
        assert_eq!(ProjectStatusColor(ProjectStatus::Pending).icon(), "○");
    }

    #[test]
    fn test_progress_level_thresholds() {
        assert!(matches!(
            ProgressLevelColor::from_percentage(10),
            ProgressLevelColor::Early
        ));
        assert!(matches!(
            ProgressLevelColor::from_percentage(50),
            ProgressLevelColor::Underway
        ));
        assert!(matches!(
            ProgressLevelColor::from_percentage(90),
            ProgressLevelColor::NearDone
        ));

        // Boundary tests
        assert!(matches!(
            ProgressLevelColor::from_percentage(34),
            ProgressLevelColor::Early
        ));
        assert!(matches!(
            ProgressLevelColor::from_percentage(35),
            ProgressLevelColor::Underway
        ));
        assert!(matches!(
            ProgressLevelColor::from_percentage(75),
            ProgressLevelColor::Underway
        ));
        assert!(matches!(
            ProgressLevelColor::from_percentage(76),
            ProgressLevelColor::NearDone
        ));
    }

    #[test]
    fn test_due_date_urgency() {
        assert!(matches!(
            DueDateColor::from_days_left(-2, true),
            DueDateColor::Overdue
        ));
        assert!(matches!(
            DueDateColor::from_days_left(2, true),
            DueDateColor::Soon
        ));
        assert!(matches!(
            DueDateColor::from_days_left(10, true),
            DueDateColor::Later
        ));
        // Closed projects are never urgent
        assert!(matches!(
            DueDateColor::from_days_left(-10, false),
            DueDateColor::Later
        ));
    }

    #[test]
    fn test_schemes_disagree_on_success() {
        let dark = StatusColor::Success.to_color(ColorScheme::Dark);
        let light = StatusColor::Success.to_color(ColorScheme::Light);
        assert_ne!(dark, light);
    }
}
