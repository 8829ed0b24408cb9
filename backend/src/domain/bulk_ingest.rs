//! Bulk-ingest planning.
//!
//! The record service splits a batch into records to persist and rejected
//! candidates before touching storage for writes. Planning is pure: it only
//! needs the batch, the emails already held in storage, and a validator.
//!
//! Candidates are visited in submission order. The first valid candidate
//! carrying an email claims it; later ones are rejected as duplicates. Emails
//! are compared exactly as submitted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Error, NewRecord, Record, RecordDraft, RecordValidator};

/// Reason attached to a candidate repeating an email claimed earlier in the
/// same batch.
pub const DUPLICATE_IN_REQUEST: &str = "Duplicate email in request";

/// Reason attached to a candidate whose email is already stored.
pub const EXISTS_IN_DATABASE: &str = "Email already exists in database";

/// Candidate rejected during bulk ingest, echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvalidRecord {
    pub record: RecordDraft,
    /// Rejection reasons in evaluation order.
    #[schema(example = json!(["email is required"]))]
    pub errors: Vec<String>,
}

impl InvalidRecord {
    fn new(record: RecordDraft, errors: Vec<String>) -> Self {
        Self { record, errors }
    }
}

/// Result of one bulk-ingest invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkIngestOutcome {
    /// Persisted records, with storage identifiers.
    pub saved: Vec<Record>,
    /// Rejected candidates in submission order.
    pub invalid: Vec<InvalidRecord>,
}

impl BulkIngestOutcome {
    /// Number of persisted records.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// Number of rejected candidates.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }
}

/// Batch split into records to persist and rejected candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestPlan {
    pub accepted: Vec<NewRecord>,
    pub rejected: Vec<InvalidRecord>,
}

/// Distinct non-blank emails of a batch, in first-seen order.
///
/// # Errors
/// Returns [`Error::invalid_request`] when the batch is empty or when no
/// candidate carries a usable email.
///
/// # Examples
/// ```
/// use backend::domain::{RecordDraft, request_emails};
///
/// let batch = vec![
///     RecordDraft::new("A", "a@x.com", 1),
///     RecordDraft::new("B", "a@x.com", 2),
/// ];
/// assert_eq!(request_emails(&batch).unwrap(), vec!["a@x.com".to_owned()]);
/// ```
pub fn request_emails(drafts: &[RecordDraft]) -> Result<Vec<String>, Error> {
    if drafts.is_empty() {
        return Err(Error::invalid_request("Record list cannot be null or empty"));
    }

    let mut seen = HashSet::new();
    let emails: Vec<String> = drafts
        .iter()
        .filter_map(RecordDraft::email_key)
        .filter(|email| seen.insert(*email))
        .map(str::to_owned)
        .collect();

    if emails.is_empty() {
        return Err(Error::invalid_request("All emails are null or blank"));
    }
    Ok(emails)
}

/// Split `drafts` into records to persist and rejected candidates.
///
/// Validation failures take precedence over duplicate checks, and duplicates
/// within the batch take precedence over emails already stored.
pub fn plan<V>(drafts: Vec<RecordDraft>, existing: &HashSet<String>, validator: &V) -> IngestPlan
where
    V: RecordValidator + ?Sized,
{
    let mut claimed: HashSet<String> = HashSet::new();
    let mut plan = IngestPlan::default();

    for draft in drafts {
        let record = match validator.validate(&draft) {
            Ok(record) => record,
            Err(violations) => {
                plan.rejected
                    .push(InvalidRecord::new(draft, violations.messages()));
                continue;
            }
        };

        if claimed.contains(&record.email) {
            plan.rejected
                .push(InvalidRecord::new(draft, vec![DUPLICATE_IN_REQUEST.to_owned()]));
            continue;
        }
        if existing.contains(&record.email) {
            plan.rejected
                .push(InvalidRecord::new(draft, vec![EXISTS_IN_DATABASE.to_owned()]));
            continue;
        }

        claimed.insert(record.email.clone());
        plan.accepted.push(record);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, StandardRecordValidator};
    use rstest::rstest;

    fn existing(emails: &[&str]) -> HashSet<String> {
        emails.iter().map(|email| (*email).to_owned()).collect()
    }

    #[rstest]
    fn empty_batch_is_rejected() {
        let err = request_emails(&[]).expect_err("empty batch");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Record list cannot be null or empty");
    }

    #[rstest]
    fn batch_without_usable_email_is_rejected() {
        let batch = vec![
            RecordDraft {
                email: Some("  ".to_owned()),
                ..RecordDraft::default()
            },
            RecordDraft::default(),
        ];
        let err = request_emails(&batch).expect_err("no emails");
        assert_eq!(err.message(), "All emails are null or blank");
    }

    #[rstest]
    fn request_emails_are_distinct_and_ordered() {
        let batch = vec![
            RecordDraft::new("A", "b@x.com", 1),
            RecordDraft::default(),
            RecordDraft::new("B", "a@x.com", 2),
            RecordDraft::new("C", "b@x.com", 3),
        ];
        let emails = request_emails(&batch).expect("emails");
        assert_eq!(emails, vec!["b@x.com".to_owned(), "a@x.com".to_owned()]);
    }

    #[rstest]
    fn second_occurrence_of_email_is_duplicate() {
        let batch = vec![
            RecordDraft::new("A", "a@x.com", 1),
            RecordDraft::new("B", "a@x.com", 2),
        ];
        let plan = plan(batch, &existing(&[]), &StandardRecordValidator);

        assert_eq!(plan.accepted, vec![NewRecord::new("A", "a@x.com", 1)]);
        assert_eq!(plan.rejected.len(), 1);
        assert_eq!(plan.rejected[0].record.name.as_deref(), Some("B"));
        assert_eq!(plan.rejected[0].errors, vec![DUPLICATE_IN_REQUEST]);
    }

    #[rstest]
    fn stored_email_is_rejected() {
        let batch = vec![RecordDraft::new("A", "a@x.com", 1)];
        let plan = plan(batch, &existing(&["a@x.com"]), &StandardRecordValidator);

        assert!(plan.accepted.is_empty());
        assert_eq!(plan.rejected[0].errors, vec![EXISTS_IN_DATABASE]);
    }

    #[rstest]
    fn invalid_candidate_does_not_claim_its_email() {
        let batch = vec![
            RecordDraft::new("", "a@x.com", 1),
            RecordDraft::new("B", "a@x.com", 2),
        ];
        let plan = plan(batch, &existing(&[]), &StandardRecordValidator);

        assert_eq!(plan.accepted, vec![NewRecord::new("B", "a@x.com", 2)]);
        assert_eq!(plan.rejected[0].errors, vec!["name is required"]);
    }

    #[rstest]
    fn validation_takes_precedence_over_stored_email() {
        let batch = vec![RecordDraft::new("A", "a@x.com", -1)];
        let plan = plan(batch, &existing(&["a@x.com"]), &StandardRecordValidator);
        assert_eq!(plan.rejected[0].errors, vec!["age must not be negative"]);
    }

    #[rstest]
    fn every_candidate_is_accounted_for() {
        let batch = vec![
            RecordDraft::new("A", "a@x.com", 1),
            RecordDraft::default(),
            RecordDraft::new("B", "a@x.com", 2),
            RecordDraft::new("C", "c@x.com", 3),
            RecordDraft::new("D", "d@x.com", 4),
        ];
        let total = batch.len();
        let plan = plan(batch, &existing(&["d@x.com"]), &StandardRecordValidator);

        assert_eq!(plan.accepted.len() + plan.rejected.len(), total);
        assert_eq!(plan.accepted.len(), 2);
        assert_eq!(
            plan.rejected[0].errors,
            vec!["name is required", "email is required", "age is required"]
        );
    }

    #[rstest]
    fn outcome_counts_follow_lists() {
        let outcome = BulkIngestOutcome {
            saved: Vec::new(),
            invalid: vec![InvalidRecord::new(RecordDraft::default(), vec!["x".to_owned()])],
        };
        assert_eq!(outcome.saved_count(), 0);
        assert_eq!(outcome.invalid_count(), 1);
    }
}
