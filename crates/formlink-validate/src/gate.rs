//! The pre-submit gate.
//!
//! Mirrors the checks the public submit endpoint runs before it will store a
//! response, so the client can refuse a doomed submission without a round
//! trip.

use chrono::{DateTime, Utc};

use formlink_schema::Form;

/// The outcome of the pre-submit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitGate {
    /// The form accepts responses.
    Open,
    /// The form is a draft or has been deactivated.
    Closed,
    /// The form's activity window has passed.
    Expired,
    /// The form reached its response cap.
    LimitReached,
}

impl SubmitGate {
    /// Returns `true` if a submission may proceed.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Decides whether a form accepts a new response at `now`, given the number
/// of responses already collected.
pub fn submission_gate(form: &Form, now: DateTime<Utc>, response_count: u64) -> SubmitGate {
    if form.draft || !form.is_active {
        return SubmitGate::Closed;
    }
    if form.active_until.is_some_and(|until| until < now) {
        return SubmitGate::Expired;
    }
    if form.max_response.is_some_and(|max| response_count >= max) {
        return SubmitGate::LimitReached;
    }
    SubmitGate::Open
}
