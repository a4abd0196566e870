//! Reconciliation of scraped contacts with harvester output.
//!
//! Only emails are merged. Harvester emails are added when their exact
//! string is not already present; they are not validated again. Metadata
//! is annotated, and existing keys are left alone apart from the email
//! counters, which are kept consistent with the merged list.

use crate::result::{HarvestOutcome, HarvesterResult};
use recon_core::ContactResult;
use tracing::{info, warn};

/// Merge harvester emails into a contact result.
#[must_use]
pub fn merge(mut result: ContactResult, harvested: &HarvesterResult) -> ContactResult {
    let added = harvested
        .emails
        .iter()
        .filter(|email| result.emails.insert(email.as_str()))
        .count();

    let metadata = &mut result.metadata;
    metadata.harvester_used = Some(true);
    metadata.harvester_domain = Some(harvested.domain.clone());
    metadata.additional_emails_from_harvester = Some(added);
    metadata.validated_emails = result.emails.len();
    metadata.total_emails_found += added;

    info!(
        domain = %harvested.domain,
        added,
        total = result.emails.len(),
        "merged harvester emails"
    );
    result
}

/// Merge a harvest outcome into a contact result.
///
/// A failed harvest leaves the contacts untouched and only records the
/// upstream error under `harvester_error`.
#[must_use]
pub fn merge_outcome(mut result: ContactResult, outcome: &HarvestOutcome) -> ContactResult {
    match outcome {
        HarvestOutcome::Harvested(harvested) => merge(result, harvested),
        HarvestOutcome::Failed { error, domain } => {
            warn!(domain = %domain, "harvest failed upstream: {}", error);
            result.metadata.harvester_error = Some(error.clone());
            result
        }
    }
}
