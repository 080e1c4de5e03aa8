//! Failure and error detail records.

use serde::{Deserialize, Serialize};

/// Placeholder for attributes or elements a report does not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// One failed or errored test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetail {
    /// Test case `classname` attribute.
    pub class: String,

    /// Test case `name` attribute.
    pub name: String,

    /// Marker `message` attribute.
    pub message: String,

    /// Marker `type` attribute.
    #[serde(rename = "type")]
    pub kind: String,

    /// Marker text content.
    pub body: String,

    /// Text of the case's `system-err` element.
    pub stack_trace: String,
}

impl CaseDetail {
    pub(crate) fn from_marker(
        case: roxmltree::Node<'_, '_>,
        marker: roxmltree::Node<'_, '_>,
        stack_trace: Option<&str>,
    ) -> Self {
        Self {
            class: attr_or_na(case, "classname"),
            name: attr_or_na(case, "name"),
            message: attr_or_na(marker, "message"),
            kind: attr_or_na(marker, "type"),
            body: marker.text().unwrap_or_default().to_string(),
            stack_trace: stack_trace.unwrap_or(NOT_AVAILABLE).to_string(),
        }
    }
}

fn attr_or_na(node: roxmltree::Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or(NOT_AVAILABLE).to_string()
}
