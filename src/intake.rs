//! Lead intake: duplicate check by email, then a transactional insert.

use crate::db_storage::LeadStore;
use crate::errors::{AppError, ResultExt};
use crate::models::{IntakeOutcome, LeadSubmission, NewLead};

/// A submission is rejected only when strictly more than this many leads
/// already share its email. One prior lead still lets a second one through.
pub const DUPLICATE_THRESHOLD: usize = 1;

/// Runs one form submission through the duplicate check and the insert.
///
/// The check and the write are separate store calls, so concurrent
/// submissions for the same email can both pass the check and both insert.
/// Store failures are returned as-is; there is no retry.
pub async fn submit(
    store: &dyn LeadStore,
    submission: LeadSubmission,
) -> Result<IntakeOutcome, AppError> {
    let existing = store
        .find_by_email(submission.email.as_deref())
        .await
        .context("Duplicate check failed")?;

    tracing::debug!(
        "Found {} existing lead(s) for email {:?}",
        existing.len(),
        submission.email
    );

    if existing.len() > DUPLICATE_THRESHOLD {
        tracing::info!(
            "Duplicate lead submission: {:?} already has {} record(s)",
            submission.email,
            existing.len()
        );
        return Ok(IntakeOutcome::DuplicateDetected {
            email: submission.email,
        });
    }

    let lead = store
        .insert(NewLead::from(submission))
        .await
        .context("Lead insert failed")?;

    tracing::info!("Lead created: {} ({:?})", lead.id, lead.email);

    Ok(IntakeOutcome::Created { lead })
}
