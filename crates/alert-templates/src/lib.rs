//! Alert payload types and issue text rendering.
//!
//! Alertmanager posts a JSON document describing a group of alerts. This
//! crate decodes that document ([`AlertPayload`]) and renders the three
//! strings the relay writes to the tracker (`title`, `description` and
//! `comment`) from a [`TemplateSet`] of Handlebars templates.
//!
//! Two helpers are available inside templates:
//!
//! - `{{replace value "old" "new"}}` - substring replacement
//! - `{{upper value}}` - uppercase
//!
//! # Example
//!
//! ```rust
//! use alert_templates::{AlertPayload, TemplateSet};
//!
//! let payload: AlertPayload = serde_json::from_str(r#"{
//!     "alerts": [{
//!         "labels": {"alertname": "HighCPU", "instance": "host1"},
//!         "annotations": {"summary": "CPU > 90%"}
//!     }]
//! }"#).unwrap();
//!
//! let templates = TemplateSet::builtin().unwrap();
//! let content = templates.render_alert(&payload, &payload.alerts[0]).unwrap();
//! assert_eq!(content.title, "HighCPU - host1");
//! assert!(content.description.contains("CPU > 90%"));
//! ```

mod error;
mod helpers;
mod payload;
mod renderer;

pub use error::TemplateError;
pub use payload::{Alert, AlertPayload, Labels};
pub use renderer::{TemplateSet, COMMENT, DESCRIPTION, TEMPLATE_NAMES, TITLE};
pub use tracker_core::RenderedContent;
