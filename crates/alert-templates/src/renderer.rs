//! Handlebars template set.

use std::path::Path;

use handlebars::Handlebars;
use serde_json::Value;
use tracing::{debug, info};
use tracker_core::RenderedContent;

use crate::error::TemplateError;
use crate::helpers::{replace_helper, upper_helper};
use crate::payload::{Alert, AlertPayload};

/// Name of the issue title template.
pub const TITLE: &str = "title";
/// Name of the issue description template.
pub const DESCRIPTION: &str = "description";
/// Name of the template used for comments on an existing issue.
pub const COMMENT: &str = "comment";

/// All template names, in load order.
pub const TEMPLATE_NAMES: [&str; 3] = [TITLE, DESCRIPTION, COMMENT];

const DEFAULT_TITLE: &str =
    "{{labels.alertname}}{{#if labels.instance}} - {{labels.instance}}{{/if}}";

const DEFAULT_DESCRIPTION: &str = r#"## {{labels.alertname}}

{{#if annotations.summary}}**Summary:** {{annotations.summary}}
{{/if}}{{#if annotations.description}}
{{annotations.description}}
{{/if}}
| Label | Value |
|-------|-------|
{{#each labels}}| {{@key}} | {{this}} |
{{/each}}
{{#if alert.startsAt}}Started at: {{alert.startsAt}}
{{/if}}{{#if alert.generatorURL}}[Source]({{alert.generatorURL}})
{{/if}}"#;

const DEFAULT_COMMENT: &str = r#"Alert **{{labels.alertname}}** is {{#if alert.status}}{{alert.status}}{{else}}{{status}}{{/if}} again{{#if alert.startsAt}} (started at {{alert.startsAt}}){{/if}}.{{#if annotations.summary}}

{{annotations.summary}}{{/if}}"#;

fn default_source(name: &str) -> &'static str {
    match name {
        TITLE => DEFAULT_TITLE,
        DESCRIPTION => DEFAULT_DESCRIPTION,
        _ => DEFAULT_COMMENT,
    }
}

/// The `title`, `description` and `comment` templates plus helpers.
///
/// Built once at startup and shared; rendering takes `&self`.
pub struct TemplateSet {
    handlebars: Handlebars<'static>,
}

impl TemplateSet {
    /// Create a template set from the built-in defaults.
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut set = Self::empty();
        for name in TEMPLATE_NAMES {
            set.register(name, default_source(name))?;
        }
        Ok(set)
    }

    /// Load `title.tmpl`, `description.tmpl` and `comment.tmpl` from a directory.
    ///
    /// Files that do not exist fall back to the built-in default. Files that
    /// exist but cannot be read or parsed are errors.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut set = Self::empty();
        for name in TEMPLATE_NAMES {
            let path = dir.join(format!("{name}.tmpl"));
            if path.is_file() {
                let source = std::fs::read_to_string(&path).map_err(|source| TemplateError::Io {
                    path: path.clone(),
                    source,
                })?;
                set.register(name, &source)?;
                info!(template = name, path = %path.display(), "Loaded template");
            } else {
                set.register(name, default_source(name))?;
                debug!(template = name, "Using built-in template");
            }
        }
        Ok(set)
    }

    /// Replace one template with the given source.
    pub fn register(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.handlebars
            .register_template_string(name, source)
            .map_err(|e| TemplateError::Parse {
                name: name.to_string(),
                source: Box::new(e),
            })
    }

    /// Render the content for one alert of a payload.
    ///
    /// Templates see the payload fields plus `alert`, and `labels` /
    /// `annotations` with the alert's values overlaid on the common ones.
    pub fn render_alert(
        &self,
        payload: &AlertPayload,
        alert: &Alert,
    ) -> Result<RenderedContent, TemplateError> {
        let mut context = serde_json::to_value(payload)?;
        if let Value::Object(map) = &mut context {
            map.insert("alert".to_string(), serde_json::to_value(alert)?);
            map.insert(
                "labels".to_string(),
                serde_json::to_value(payload.labels_for(alert))?,
            );
            map.insert(
                "annotations".to_string(),
                serde_json::to_value(payload.annotations_for(alert))?,
            );
        }
        self.render_context(&context)
    }

    /// Render one content for a whole payload.
    ///
    /// `labels` / `annotations` are the common labels and annotations.
    pub fn render_payload(&self, payload: &AlertPayload) -> Result<RenderedContent, TemplateError> {
        let mut context = serde_json::to_value(payload)?;
        if let Value::Object(map) = &mut context {
            map.insert(
                "labels".to_string(),
                serde_json::to_value(&payload.common_labels)?,
            );
            map.insert(
                "annotations".to_string(),
                serde_json::to_value(&payload.common_annotations)?,
            );
        }
        self.render_context(&context)
    }

    fn render_context(&self, context: &Value) -> Result<RenderedContent, TemplateError> {
        let title = self.render(TITLE, context)?;
        let description = self.render(DESCRIPTION, context)?;
        let comment = self.render(COMMENT, context)?;
        Ok(RenderedContent::new(title, description, comment))
    }

    fn render(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
        self.handlebars
            .render(name, context)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                source: Box::new(e),
            })
    }

    fn empty() -> Self {
        let mut handlebars = Handlebars::new();
        // Issue text is Markdown, not HTML.
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(false);
        handlebars.register_helper("replace", Box::new(replace_helper));
        handlebars.register_helper("upper", Box::new(upper_helper));
        Self { handlebars }
    }
}
