//! Submission readiness derivation.
//!
//! The gate exists to guide workflow: the administrator-facing "compute
//! available times" action should stay disabled until every member has
//! submitted at least one unavailability entry. It is a caller-side
//! precondition; the aggregator itself never refuses to run.

use crate::membership::GroupMember;

use super::types::{MemberAvailabilityRecord, SubmissionStatus};

/// Derive the submission status for a group.
///
/// A member counts as submitted once their record holds at least one
/// interval. The percentage is rounded; an empty member list yields 0
/// rather than dividing by zero, and `all_submitted` is true exactly when
/// the rounded percentage reaches 100.
pub fn submission_status(
    members: &[GroupMember],
    records: &[MemberAvailabilityRecord],
) -> SubmissionStatus {
    let total = members.len();
    let submitted = members
        .iter()
        .filter(|m| {
            records
                .iter()
                .any(|r| r.member_id == m.member_id && r.has_submitted())
        })
        .count();

    let percentage = if total == 0 {
        0
    } else {
        ((submitted as f64 / total as f64) * 100.0).round() as u8
    };

    SubmissionStatus {
        submitted,
        total,
        percentage,
        all_submitted: percentage == 100,
    }
}
