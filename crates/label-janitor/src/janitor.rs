//! The janitor run: fetch, filter, report, and gate deletion.

use std::io::Write;

use tracing::{info, warn};

use crate::client::LabelApi;
use crate::config::Config;
use crate::confirm::Confirm;
use crate::error::Result;
use crate::filter::select_unused;
use crate::models::Label;
use crate::ui::Reporter;

/// Prompt shown before deleting anything.
pub const CONFIRM_PROMPT: &str = "WARNING: this will delete the above labels. Proceed? (y/N)";

/// How a run ended. Every variant is a normal termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No label qualified.
    NothingToDo,
    /// Unused labels were listed; dry-run withheld deletion.
    DryRun { unused: usize },
    /// The operator declined the confirmation.
    Aborted,
    /// Confirmed, but deletion is switched off for this run.
    DeletionDisabled { unused: usize },
    /// Deletion ran; see the summary for per-label results.
    Deleted(DeletionSummary),
}

impl Outcome {
    /// False only when some deletion failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Deleted(summary) => summary.failed.is_empty(),
            _ => true,
        }
    }
}

/// Per-label results of a deletion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    /// Names of labels the service confirmed as deleted.
    pub deleted: Vec<String>,
    pub failed: Vec<DeletionFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionFailure {
    pub name: String,
    pub reason: String,
}

/// Run the whole pipeline against `api`.
///
/// Errors from fetching abort the run before anything is reported;
/// deletion failures never do.
///
/// # Errors
/// Propagates transport, API, prompt and output errors.
pub async fn run<A, C, W>(
    api: &A,
    config: &Config,
    confirm: &mut C,
    reporter: &mut Reporter<W>,
) -> Result<Outcome>
where
    A: LabelApi + ?Sized,
    C: Confirm + ?Sized,
    W: Write,
{
    let labels = api.fetch_all_labels().await?;
    let unused = select_unused(&labels);
    info!(total = labels.len(), unused = unused.len(), "Selected unused labels");

    review(api, &unused, config, confirm, reporter).await
}

/// Report the unused labels and apply the dry-run and confirmation gate.
///
/// # Errors
/// Propagates prompt and output errors.
pub async fn review<A, C, W>(
    api: &A,
    unused: &[&Label],
    config: &Config,
    confirm: &mut C,
    reporter: &mut Reporter<W>,
) -> Result<Outcome>
where
    A: LabelApi + ?Sized,
    C: Confirm + ?Sized,
    W: Write,
{
    if unused.is_empty() {
        reporter.success("No empty labels to delete.")?;
        return Ok(Outcome::NothingToDo);
    }

    reporter.info(&format!("Found {} unused labels:", unused.len()))?;
    for label in unused {
        reporter.item(&label.name)?;
    }
    reporter.blank()?;

    if config.dry_run {
        reporter.info("Dry run enabled: no labels will be deleted.")?;
        return Ok(Outcome::DryRun {
            unused: unused.len(),
        });
    }

    if !confirm.confirm(CONFIRM_PROMPT)? {
        reporter.warning("Deletion aborted by user.")?;
        return Ok(Outcome::Aborted);
    }

    if !config.deletion_enabled {
        reporter.warning(
            "Deletion is disabled for this run (pass --enable-deletion or set \
             LABEL_DELETION_ENABLED=true); no labels were deleted.",
        )?;
        return Ok(Outcome::DeletionDisabled {
            unused: unused.len(),
        });
    }

    reporter.info(&format!("Proceeding with deletion of {} labels.", unused.len()))?;
    let summary = delete_all(api, unused, reporter).await;
    Ok(Outcome::Deleted(summary))
}

/// Delete each label independently; one failure never stops the batch.
///
/// Results are recorded before they are printed, and a failed write is only
/// logged, so a broken stdout cannot cut the batch short.
async fn delete_all<A, W>(
    api: &A,
    labels: &[&Label],
    reporter: &mut Reporter<W>,
) -> DeletionSummary
where
    A: LabelApi + ?Sized,
    W: Write,
{
    let mut summary = DeletionSummary::default();

    for label in labels {
        let printed = match api.delete_label(&label.id).await {
            Ok(true) => {
                info!(label_id = %label.id, name = %label.name, "Deleted label");
                summary.deleted.push(label.name.clone());
                reporter.success(&format!("Deleted label: {}", label.name))
            }
            Ok(false) => {
                warn!(label_id = %label.id, name = %label.name, "Service declined label deletion");
                summary.failed.push(DeletionFailure {
                    name: label.name.clone(),
                    reason: "service reported success: false".to_string(),
                });
                reporter.warning(&format!("Could not delete label: {}", label.name))
            }
            Err(e) => {
                warn!(label_id = %label.id, name = %label.name, error = %e, "Label deletion failed");
                summary.failed.push(DeletionFailure {
                    name: label.name.clone(),
                    reason: e.to_string(),
                });
                reporter.error(&format!("Error deleting label {}: {e}", label.name))
            }
        };

        if let Err(e) = printed {
            warn!(name = %label.name, error = %e, "Failed to report deletion result");
        }
    }

    if let Err(e) = reporter.info(&format!(
        "Deleted {} of {} labels.",
        summary.deleted.len(),
        labels.len()
    )) {
        warn!(error = %e, "Failed to report deletion summary");
    }
    summary
}
