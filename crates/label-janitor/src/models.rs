//! Type definitions for the Linear entities the janitor reads.

use serde::{Deserialize, Serialize};

/// Linear issue label, as returned by the label listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique identifier
    pub id: String,
    /// Label name
    pub name: String,
    /// Group labels act as parents for other labels
    pub is_group: bool,
    /// Sample of at most one issue carrying this label.
    /// Required: a node without it has unknown usage, not zero issues.
    pub issues: IssueSample,
}

impl Label {
    /// Whether any issue currently references this label.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.nodes.is_empty()
    }
}

/// `issues(first: 1)` sub-connection of a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSample {
    pub nodes: Vec<IssueRef>,
}

/// Bare issue reference; only its presence matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    pub id: String,
}

/// Pagination info for cursor-based pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of the `issueLabels` connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPage {
    pub nodes: Vec<Label>,
    pub page_info: PageInfo,
}

/// Result of a single `issueLabelDelete` mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePayload {
    pub success: bool,
}
