//! Template store and rendering
//!
//! Ships a built-in library of client messages and gig copy. Placeholders
//! are written `{snake_case}`; legacy template files also use `{{name}}`,
//! `[NAME]` and `[name]`, so all four forms substitute. Any placeholder
//! left after substitution is a hard error, never sent as-is.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{CoreError, LoadSummary};
use crate::models::{MessageTemplate, PackageTier, ServicePackage, TemplateCategory};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z][a-z0-9_]*)\}").unwrap());

/// Variables available to a render
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    vars: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A fully rendered message
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// Substitute variables into text. `{{key}}` is replaced before `{key}`
/// so the double-brace form is never left half-substituted.
pub fn substitute(text: &str, vars: &TemplateVars) -> String {
    let mut out = text.to_string();
    for (key, value) in vars.iter() {
        let patterns = [
            format!("{{{{{}}}}}", key),
            format!("{{{}}}", key),
            format!("[{}]", key.to_uppercase()),
            format!("[{}]", key),
        ];
        for pattern in &patterns {
            out = out.replace(pattern.as_str(), value);
        }
    }
    out
}

/// First placeholder left unresolved in `text`, if any
pub fn unresolved_placeholder(text: &str) -> Option<String> {
    PLACEHOLDER
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Front matter of a custom template file
#[derive(Debug, Deserialize)]
struct TemplateFrontMatter {
    name: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    subject: Option<String>,
}

/// Thread-safe template registry
///
/// Usage counts are bumped on every successful render, so the Templates
/// tab can surface what actually gets used.
pub struct TemplateStore {
    templates: DashMap<String, MessageTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
        }
    }

    /// Registry pre-filled with the built-in library
    pub fn with_builtins() -> Self {
        let store = Self::new();
        for template in builtin_templates() {
            store.templates.insert(template.id.clone(), template);
        }
        store
    }

    pub fn insert(&self, template: MessageTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn get(&self, id: &str) -> Option<MessageTemplate> {
        self.templates.get(id).map(|t| t.clone())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn builtin_count(&self) -> usize {
        self.templates.iter().filter(|t| t.builtin).count()
    }

    /// All templates sorted by name
    pub fn all(&self) -> Vec<MessageTemplate> {
        let mut templates: Vec<MessageTemplate> =
            self.templates.iter().map(|t| t.clone()).collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }

    /// Most-used templates first
    pub fn top_by_usage(&self, n: usize) -> Vec<MessageTemplate> {
        let mut templates: Vec<MessageTemplate> =
            self.templates.iter().map(|t| t.clone()).collect();
        templates.sort_by(|a, b| b.usage_count.cmp(&a.usage_count).then(a.name.cmp(&b.name)));
        templates.truncate(n);
        templates
    }

    pub fn total_usage(&self) -> u64 {
        self.templates.iter().map(|t| t.usage_count).sum()
    }

    /// Render a template with the given variables, bumping its usage count
    /// on success. A placeholder left unresolved aborts the render.
    pub fn render(&self, id: &str, vars: &TemplateVars) -> Result<RenderedMessage, CoreError> {
        let template = self.get(id).ok_or_else(|| CoreError::TemplateNotFound {
            id: id.to_string(),
        })?;

        let subject = substitute(&template.subject, vars);
        let body = substitute(&template.body, vars);

        for text in [&subject, &body] {
            if let Some(variable) = unresolved_placeholder(text) {
                return Err(CoreError::MissingVariable {
                    template: id.to_string(),
                    variable,
                });
            }
        }

        if let Some(mut entry) = self.templates.get_mut(id) {
            entry.usage_count += 1;
        }

        Ok(RenderedMessage { subject, body })
    }

    /// Load custom templates from a directory tree.
    ///
    /// Accepts `*.md` files with YAML front matter. Bad files are skipped
    /// with a warning; a custom template with a known id overrides the
    /// built-in one.
    pub fn load_custom_dir(&self, dir: &Path, summary: &mut LoadSummary) {
        if !dir.is_dir() {
            summary.add_warning(
                "templates",
                format!("Templates directory not found: {}", dir.display()),
            );
            return;
        }

        for entry in WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("md")
            {
                continue;
            }

            match parse_template_file(path) {
                Ok(template) => {
                    if self.templates.contains_key(&template.id) {
                        debug!(id = %template.id, "Custom template overrides built-in");
                    }
                    self.insert(template);
                    summary.custom_templates += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping template file");
                    summary.add_warning("templates", e.to_string());
                }
            }
        }
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn parse_template_file(path: &Path) -> Result<MessageTemplate, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let (front, body) = split_front_matter(&content).ok_or_else(|| CoreError::FrontMatterParse {
        path: path.to_path_buf(),
        message: "expected a YAML front matter block delimited by ---".to_string(),
    })?;

    let meta: TemplateFrontMatter =
        serde_yaml::from_str(front).map_err(|e| CoreError::FrontMatterParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let id = meta
        .id
        .or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
        .ok_or_else(|| CoreError::FrontMatterParse {
            path: path.to_path_buf(),
            message: "template id could not be derived from the file name".to_string(),
        })?;

    let category = meta
        .category
        .as_deref()
        .map(TemplateCategory::parse_lenient)
        .unwrap_or(TemplateCategory::Communication);

    Ok(MessageTemplate::new(
        id,
        meta.name,
        category,
        meta.subject.unwrap_or_default(),
        body.trim_start().to_string(),
    ))
}

/// Split `---\n<yaml>\n---\n<body>`. Returns None when the file has no
/// front matter block.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;
    let end = rest.find("\n---")?;
    let front = &rest[..end];
    let body = rest[end + 4..].strip_prefix('\n').unwrap_or(&rest[end + 4..]);
    Some((front, body))
}

/// Packages for a gig at the given base price: Basic x1, Standard x2,
/// Premium x3 with graded delivery and revisions.
pub fn gig_packages(base_price: f64) -> [ServicePackage; 3] {
    [
        ServicePackage {
            tier: PackageTier::Basic,
            price: base_price * PackageTier::Basic.multiplier(),
            delivery_days: 5,
            revisions: Some(2),
        },
        ServicePackage {
            tier: PackageTier::Standard,
            price: base_price * PackageTier::Standard.multiplier(),
            delivery_days: 7,
            revisions: Some(3),
        },
        ServicePackage {
            tier: PackageTier::Premium,
            price: base_price * PackageTier::Premium.multiplier(),
            delivery_days: 10,
            revisions: None,
        },
    ]
}

fn builtin_templates() -> Vec<MessageTemplate> {
    vec![
        MessageTemplate::new(
            "initial_inquiry",
            "Initial Inquiry Response",
            TemplateCategory::Communication,
            "Thank you for your interest in my {service_type} services",
            "Hi {client_name},\n\n\
             Thank you for your interest in my {service_type} services! I'm excited to \
             help you achieve your business goals.\n\n\
             To provide the best recommendations, could you please share:\n\
             • Your industry and business objectives\n\
             • Specific requirements or challenges\n\
             • Timeline for completion\n\
             • Any existing data or materials\n\n\
             I typically respond within 1-2 hours and would love to discuss your project \
             in detail.\n\n\
             Best regards,\n{seller_name}",
        )
        .as_builtin(42),
        MessageTemplate::new(
            "project_kickoff",
            "Project Kickoff",
            TemplateCategory::Communication,
            "Project Kickoff - {project_title}",
            "Hi {client_name},\n\n\
             Great! I'm excited to start working on your {project_type} project. Here's \
             what happens next:\n\n\
             Project details:\n\
             - Project: {project_title}\n\
             - Package: {package_type}\n\
             - Delivery date: {due_date}\n\n\
             Next steps:\n\
             1. I'll send you a detailed questionnaire within 2 hours\n\
             2. Once completed, I'll begin the analysis\n\
             3. I'll provide progress updates every 24-48 hours\n\
             4. Final delivery will be on {due_date}\n\n\
             If you have any questions or additional requirements, please let me know \
             immediately.\n\n\
             Best regards,\n{seller_name}",
        )
        .as_builtin(28),
        MessageTemplate::new(
            "progress_update",
            "Progress Update",
            TemplateCategory::Communication,
            "Progress Update - {project_title}",
            "Hi {client_name},\n\n\
             I wanted to provide you with a quick update on your {project_type} project.\n\n\
             Current status:\n\
             - Project is {progress_percentage}% complete\n\
             - Currently working on: {current_task}\n\
             - On track for delivery: {due_date}\n\n\
             Next steps:\n{next_steps}\n\n\
             If you have any questions or need clarification on anything, please don't \
             hesitate to reach out.\n\n\
             Best regards,\n{seller_name}",
        )
        .as_builtin(19),
        MessageTemplate::new(
            "delivery_notification",
            "Delivery Notification",
            TemplateCategory::Communication,
            "Project Complete - {project_title}",
            "Hi {client_name},\n\n\
             Excellent news! Your {project_type} project is now complete and ready for \
             delivery.\n\n\
             What's included:\n{deliverables_list}\n\n\
             Key findings:\n{key_findings}\n\n\
             Next steps:\n\
             1. Please review all deliverables\n\
             2. Let me know if you need any clarifications\n\
             3. I'm available for a follow-up call if needed\n\n\
             Thank you for choosing my services!\n\n\
             Best regards,\n{seller_name}",
        )
        .as_builtin(24),
        MessageTemplate::new(
            "follow_up",
            "Follow-up",
            TemplateCategory::Communication,
            "Following up on your {project_type} project",
            "Hi {client_name},\n\n\
             I hope you've had a chance to review the {project_type} deliverables I sent \
             last week.\n\n\
             I wanted to follow up to see:\n\
             • How are you finding the recommendations?\n\
             • Do you need any clarification or additional analysis?\n\
             • Are there any follow-up projects I can help with?\n\n\
             I'm here to support your continued success. Please let me know if there's \
             anything else I can help with.\n\n\
             Best regards,\n{seller_name}",
        )
        .as_builtin(12),
        MessageTemplate::new(
            "market_research_gig",
            "Market Research Gig",
            TemplateCategory::GigDescription,
            "I will deliver comprehensive {service_type} for your business",
            "Transform your business decisions with professional {service_type}.\n\n\
             What you get:\n\
             • A comprehensive analysis report\n\
             • Clear, actionable recommendations\n\
             • Data visualizations ready for stakeholders\n\
             • Post-delivery support\n\n\
             Why work with me:\n\
             • Fast turnaround and regular communication\n\
             • Deliverables tailored to your industry\n\n\
             Message me before ordering so we can scope your project.\n\n\
             {seller_name}",
        )
        .as_builtin(15),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn vars() -> TemplateVars {
        TemplateVars::new()
            .with("client_name", "TechStart Inc.")
            .with("seller_name", "Dana Velasquez")
            .with("service_type", "Market Research")
    }

    #[test]
    fn test_substitute_single_brace() {
        let out = substitute("Hi {client_name}!", &vars());
        assert_eq!(out, "Hi TechStart Inc.!");
    }

    #[test]
    fn test_substitute_all_legacy_forms() {
        let vars = TemplateVars::new().with("seller_name", "Dana");
        assert_eq!(substitute("{seller_name}", &vars), "Dana");
        assert_eq!(substitute("{{seller_name}}", &vars), "Dana");
        assert_eq!(substitute("[SELLER_NAME]", &vars), "Dana");
        assert_eq!(substitute("[seller_name]", &vars), "Dana");
    }

    #[test]
    fn test_substitute_double_brace_is_not_corrupted() {
        // If {name} were replaced first, {{name}} would leave stray braces
        let vars = TemplateVars::new().with("client_name", "RetailCorp");
        let out = substitute("Dear {{client_name}} ({client_name})", &vars);
        assert_eq!(out, "Dear RetailCorp (RetailCorp)");
    }

    #[test]
    fn test_unresolved_placeholder_detection() {
        assert_eq!(
            unresolved_placeholder("due on {due_date}"),
            Some("due_date".to_string())
        );
        assert_eq!(unresolved_placeholder("all set"), None);
    }

    #[test]
    fn test_render_bumps_usage_count() {
        let store = TemplateStore::with_builtins();
        let before = store.get("initial_inquiry").unwrap().usage_count;

        let message = store.render("initial_inquiry", &vars()).unwrap();
        assert!(message.body.contains("TechStart Inc."));
        assert!(message.subject.contains("Market Research"));

        let after = store.get("initial_inquiry").unwrap().usage_count;
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_render_missing_variable_fails_without_bump() {
        let store = TemplateStore::with_builtins();
        let before = store.get("project_kickoff").unwrap().usage_count;

        // project_kickoff needs project_title, package_type, due_date...
        let err = store.render("project_kickoff", &vars()).unwrap_err();
        assert!(matches!(err, CoreError::MissingVariable { .. }));

        let after = store.get("project_kickoff").unwrap().usage_count;
        assert_eq!(after, before);
    }

    #[test]
    fn test_render_unknown_template() {
        let store = TemplateStore::with_builtins();
        let err = store.render("nonexistent", &vars()).unwrap_err();
        assert!(matches!(err, CoreError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_top_by_usage_order() {
        let store = TemplateStore::with_builtins();
        let top = store.top_by_usage(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "initial_inquiry");
        assert!(top[0].usage_count >= top[1].usage_count);
    }

    #[test]
    fn test_split_front_matter() {
        let content = "---\nname: Test\n---\nBody here";
        let (front, body) = split_front_matter(content).unwrap();
        assert_eq!(front, "name: Test");
        assert_eq!(body, "Body here");

        assert!(split_front_matter("no front matter").is_none());
    }

    #[test]
    fn test_load_custom_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("replies");
        std::fs::create_dir_all(&nested).unwrap();

        let mut file = std::fs::File::create(nested.join("revision_reply.md")).unwrap();
        write!(
            file,
            "---\nname: Revision Reply\ncategory: Communication\nsubject: About your revision\n---\nHi {{client_name}}, revisions are underway."
        )
        .unwrap();

        let store = TemplateStore::with_builtins();
        let builtin_count = store.len();
        let mut summary = LoadSummary::new();
        store.load_custom_dir(dir.path(), &mut summary);

        assert_eq!(summary.custom_templates, 1);
        assert!(!summary.has_warnings());
        assert_eq!(store.len(), builtin_count + 1);

        let loaded = store.get("revision_reply").unwrap();
        assert_eq!(loaded.name, "Revision Reply");
        assert!(!loaded.builtin);
    }

    #[test]
    fn test_load_custom_dir_skips_bad_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.md"), "no front matter at all").unwrap();

        let store = TemplateStore::with_builtins();
        let mut summary = LoadSummary::new();
        store.load_custom_dir(dir.path(), &mut summary);

        assert_eq!(summary.custom_templates, 0);
        assert!(summary.has_warnings());
    }

    #[test]
    fn test_load_custom_dir_missing_warns() {
        let store = TemplateStore::with_builtins();
        let mut summary = LoadSummary::new();
        store.load_custom_dir(Path::new("/nonexistent/templates"), &mut summary);
        assert!(summary.has_warnings());
    }

    #[test]
    fn test_custom_template_overrides_builtin() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("follow_up.md"),
            "---\nname: My Follow-up\nsubject: Checking in\n---\nHi {client_name}, just checking in. Best, {seller_name}",
        )
        .unwrap();

        let store = TemplateStore::with_builtins();
        let mut summary = LoadSummary::new();
        store.load_custom_dir(dir.path(), &mut summary);

        let template = store.get("follow_up").unwrap();
        assert_eq!(template.name, "My Follow-up");
        assert!(!template.builtin);
    }

    #[test]
    fn test_gig_packages_pricing() {
        let packages = gig_packages(300.0);
        assert_eq!(packages[0].price, 300.0);
        assert_eq!(packages[1].price, 600.0);
        assert_eq!(packages[2].price, 900.0);
        assert_eq!(packages[2].revisions, None);
        assert!(packages[0].delivery_days < packages[2].delivery_days);
    }

    #[test]
    fn test_builtin_bodies_have_no_typoed_placeholders() {
        // Every placeholder in every built-in template must be renderable
        let known = [
            "client_name",
            "seller_name",
            "service_type",
            "project_title",
            "project_type",
            "package_type",
            "due_date",
            "progress_percentage",
            "current_task",
            "next_steps",
            "deliverables_list",
            "key_findings",
        ];

        for template in builtin_templates() {
            let mut text = format!("{}\n{}", template.subject, template.body);
            for key in known {
                let vars = TemplateVars::new().with(key, "x");
                text = substitute(&text, &vars);
            }
            assert_eq!(
                unresolved_placeholder(&text),
                None,
                "template {} has an unknown placeholder",
                template.id
            );
        }
    }
}
