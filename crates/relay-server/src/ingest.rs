//! Turning a decoded payload into upserts.

use std::fmt;
use std::sync::Arc;

use alert_templates::{Alert, AlertPayload, TemplateSet};
use tracing::{error, warn};
use tracker_core::{IssueTracker, ProjectRef, RenderedContent};
use upsert_engine::{EngineConfig, UpsertEngine, UpsertOutcome};

use crate::config::Grouping;

/// Tracker shared by every request.
pub type SharedTracker = Arc<dyn IssueTracker>;

/// Counts of what one payload produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Units (alerts, or the whole payload) processed.
    pub units: usize,
    pub created: usize,
    pub existing: usize,
    pub commented: usize,
    /// Units that rendered an empty title.
    pub invalid: usize,
    /// Units whose rendering, routing or tracker calls failed.
    pub failed: usize,
}

impl IngestReport {
    /// Returns true if there was work and all of it had an empty title.
    pub fn all_invalid(&self) -> bool {
        self.units > 0 && self.invalid == self.units
    }

    fn record(&mut self, outcome: &UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created { .. } | UpsertOutcome::CreatedUnconfirmed => self.created += 1,
            UpsertOutcome::AlreadyExists { .. } => self.existing += 1,
            UpsertOutcome::Commented { .. } => self.commented += 1,
        }
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} units: {} created, {} existing, {} commented, {} invalid, {} failed",
            self.units, self.created, self.existing, self.commented, self.invalid, self.failed
        )
    }
}

/// Renders payloads and feeds them to the upsert engine.
pub struct Ingestor {
    engine: UpsertEngine<SharedTracker>,
    templates: TemplateSet,
    grouping: Grouping,
    project_label: String,
}

impl Ingestor {
    /// Create an ingestor.
    pub fn new(
        tracker: SharedTracker,
        engine_config: EngineConfig,
        templates: TemplateSet,
        grouping: Grouping,
        project_label: impl Into<String>,
    ) -> Self {
        Self {
            engine: UpsertEngine::new(tracker, engine_config),
            templates,
            grouping,
            project_label: project_label.into(),
        }
    }

    /// Process a payload.
    ///
    /// Alerts are handled one after another; a failure is logged and the
    /// next alert is still processed.
    pub async fn ingest(&self, payload: &AlertPayload) -> IngestReport {
        let mut report = IngestReport::default();

        match self.grouping {
            Grouping::Alert => {
                for (index, alert) in payload.alerts.iter().enumerate() {
                    report.units += 1;
                    let rendered = self.templates.render_alert(payload, alert);
                    self.process(&mut report, index, payload, Some(alert), rendered)
                        .await;
                }
            }
            Grouping::Payload => {
                report.units += 1;
                let rendered = self.templates.render_payload(payload);
                self.process(&mut report, 0, payload, None, rendered).await;
            }
        }

        report
    }

    async fn process(
        &self,
        report: &mut IngestReport,
        index: usize,
        payload: &AlertPayload,
        alert: Option<&Alert>,
        rendered: Result<RenderedContent, alert_templates::TemplateError>,
    ) {
        let content = match rendered {
            Ok(content) => content,
            Err(err) => {
                error!(index, error = %err, "Failed to render alert");
                report.failed += 1;
                return;
            }
        };

        let project = self.project_for(payload, alert);
        match self.engine.upsert(&content.title, &content, project).await {
            Ok(outcome) => {
                report.record(&outcome);
            }
            Err(err) if err.is_invalid_input() => {
                warn!(index, "Alert rendered an empty title, skipping");
                report.invalid += 1;
            }
            Err(err) => {
                error!(index, title = %content.title, error = %err, "Failed to upsert issue");
                report.failed += 1;
            }
        }
    }

    /// Project named by the alert's label, then by the common labels.
    fn project_for(&self, payload: &AlertPayload, alert: Option<&Alert>) -> Option<ProjectRef> {
        payload
            .label(alert, &self.project_label)
            .and_then(ProjectRef::parse)
    }
}
