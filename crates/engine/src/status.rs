//! Document statuses and the transition guard.
//!
//! Requests and time sheets share one closed status vocabulary. The guard is
//! a pure function: it decides whether a request may move to a new status
//! given the statuses of its time sheets, and whether the change has to be
//! cascaded to them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, TimeSheet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Nothing filled in yet.
    Empty,
    Creating,
    Created,
    /// Under review.
    Approving,
    Correcting,
    Corrected,
    /// Terminal: only an administrator can move a document out of it.
    Approved,
}

/// Display labels, indexed by the variant discriminant.
static STATUS_LABELS: [(Status, &str); 7] = [
    (Status::Empty, "Not filled"),
    (Status::Creating, "Filling in"),
    (Status::Created, "Filled in"),
    (Status::Approving, "Under review"),
    (Status::Correcting, "Has errors"),
    (Status::Corrected, "Corrected"),
    (Status::Approved, "Approved"),
];

impl Status {
    pub const ALL: [Status; 7] = [
        Status::Empty,
        Status::Creating,
        Status::Created,
        Status::Approving,
        Status::Correcting,
        Status::Corrected,
        Status::Approved,
    ];

    /// System name, used for storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Creating => "Creating",
            Self::Created => "Created",
            Self::Approving => "Approving",
            Self::Correcting => "Correcting",
            Self::Corrected => "Corrected",
            Self::Approved => "Approved",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        STATUS_LABELS[self as usize].1
    }

    /// `true` while the document has not been filled in.
    pub fn is_unfilled(self) -> bool {
        matches!(self, Self::Empty | Self::Creating)
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = EngineError;

    /// Case-insensitive match against the system names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EngineError::Validation(format!("unknown status: {trimmed}")))
    }
}

impl TryFrom<&str> for Status {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Outcome of [`check_transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Target equals the current status: nothing to write.
    Unchanged,
    /// Write the new status; when `cascade` is set the time sheets have to
    /// follow it into review.
    Apply { cascade: bool },
}

/// Validate a request status change.
///
/// `dependents` are the statuses of the request's time sheets.
pub fn check_transition(
    current: Status,
    target: Status,
    dependents: &[Status],
    is_admin: bool,
) -> ResultEngine<Transition> {
    if current == target {
        return Ok(Transition::Unchanged);
    }
    if current == Status::Approved && !is_admin {
        return Err(EngineError::Conflict(format!(
            "cannot change status of an approved request to {target}"
        )));
    }
    if target == Status::Approving
        && let Some(unfilled) = dependents.iter().find(|status| status.is_unfilled())
    {
        return Err(EngineError::Validation(format!(
            "cannot send to review: a time sheet is still {unfilled}"
        )));
    }
    Ok(Transition::Apply {
        cascade: target == Status::Approving,
    })
}

/// Whether a time sheet in `status` has to be moved into review by a
/// cascading request transition.
pub fn needs_cascade(status: Status) -> bool {
    !matches!(status, Status::Approved | Status::Approving)
}

/// The time sheets a cascading transition moves into review.
pub fn cascade_targets(time_sheets: &[TimeSheet]) -> impl Iterator<Item = &TimeSheet> {
    time_sheets
        .iter()
        .filter(|time_sheet| needs_cascade(time_sheet.status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_variants() {
        for (status, _) in STATUS_LABELS {
            assert_eq!(STATUS_LABELS[status as usize].0, status);
        }
        assert_eq!(Status::Approving.label(), "Under review");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("approving".parse::<Status>().unwrap(), Status::Approving);
        assert_eq!(" CORRECTED ".parse::<Status>().unwrap(), Status::Corrected);
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(
            "Done".parse::<Status>(),
            Err(EngineError::Validation("unknown status: Done".to_string()))
        );
    }

    #[test]
    fn same_status_is_unchanged() {
        let transition =
            check_transition(Status::Approved, Status::Approved, &[Status::Empty], false).unwrap();
        assert_eq!(transition, Transition::Unchanged);
    }

    #[test]
    fn approved_is_terminal_for_regular_users() {
        let err = check_transition(Status::Approved, Status::Correcting, &[], false).unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));

        let transition = check_transition(Status::Approved, Status::Correcting, &[], true).unwrap();
        assert_eq!(transition, Transition::Apply { cascade: false });
    }

    #[test]
    fn review_requires_filled_time_sheets() {
        let err = check_transition(
            Status::Created,
            Status::Approving,
            &[Status::Created, Status::Creating],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let transition = check_transition(
            Status::Created,
            Status::Approving,
            &[Status::Created, Status::Approved],
            false,
        )
        .unwrap();
        assert_eq!(transition, Transition::Apply { cascade: true });
    }

    #[test]
    fn cascade_skips_reviewed_documents() {
        assert!(needs_cascade(Status::Created));
        assert!(needs_cascade(Status::Corrected));
        assert!(!needs_cascade(Status::Approving));
        assert!(!needs_cascade(Status::Approved));
    }
}
