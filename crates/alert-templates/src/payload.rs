//! Alertmanager webhook payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label or annotation set. Ordered so rendered output is stable.
pub type Labels = BTreeMap<String, String>;

/// Body of an Alertmanager webhook notification.
///
/// Every field is optional on the wire; absent fields decode to their
/// empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertPayload {
    pub version: String,
    pub group_key: String,
    pub truncated_alerts: u64,
    /// `firing` or `resolved`.
    pub status: String,
    pub receiver: String,
    pub group_labels: Labels,
    pub common_labels: Labels,
    pub common_annotations: Labels,
    #[serde(rename = "externalURL")]
    pub external_url: String,
    pub alerts: Vec<Alert>,
}

/// One alert inside a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    pub status: String,
    pub labels: Labels,
    pub annotations: Labels,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(rename = "generatorURL")]
    pub generator_url: String,
    pub fingerprint: String,
}

impl AlertPayload {
    /// Common labels overlaid with the alert's own labels.
    pub fn labels_for(&self, alert: &Alert) -> Labels {
        let mut labels = self.common_labels.clone();
        labels.extend(alert.labels.iter().map(|(k, v)| (k.clone(), v.clone())));
        labels
    }

    /// Common annotations overlaid with the alert's own annotations.
    pub fn annotations_for(&self, alert: &Alert) -> Labels {
        let mut annotations = self.common_annotations.clone();
        annotations.extend(
            alert
                .annotations
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        annotations
    }

    /// Look up a non-blank label on the alert first, then in the common labels.
    pub fn label<'a>(&'a self, alert: Option<&'a Alert>, name: &str) -> Option<&'a str> {
        let non_blank = |v: &&String| !v.trim().is_empty();
        alert
            .and_then(|a| a.labels.get(name).filter(non_blank))
            .or_else(|| self.common_labels.get(name).filter(non_blank))
            .map(String::as_str)
    }
}
