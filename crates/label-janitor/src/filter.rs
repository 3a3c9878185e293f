//! Selection of labels eligible for cleanup.

use crate::models::Label;

/// Labels with no issues that are not group labels, in input order.
#[must_use]
pub fn select_unused(labels: &[Label]) -> Vec<&Label> {
    labels
        .iter()
        .filter(|label| !label.has_issues() && !label.is_group)
        .collect()
}
