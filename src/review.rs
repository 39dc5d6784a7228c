//! Change detection and accept/reject on a single row.
//!
//! These functions only touch the [`Doctor`] they are given. Logging the
//! outcome and tracking decisions is the session's job.

use crate::models::{Doctor, Field, ReviewAction};

pub use crate::models::Change;

/// What an accept or reject did to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub action: ReviewAction,
    /// Fields affected, in tracked-field order.
    pub fields: Vec<Field>,
    /// Values written by an accept. Empty for rejects and no-ops.
    pub applied: Vec<Change>,
}

/// Fields whose active proposal differs from the current value.
pub fn changes(doctor: &Doctor) -> Vec<Change> {
    Field::ALL
        .into_iter()
        .filter_map(|field| {
            let new = doctor.proposal(field)?;
            let old = doctor.current(field);
            (new != old).then_some(Change { field, old, new })
        })
        .collect()
}

/// Apply every change to the current values.
///
/// Only changed fields have their slot cleared. A proposal equal to the
/// current value is left in place.
pub fn accept(doctor: &mut Doctor) -> Resolution {
    let applied = changes(doctor);
    if applied.is_empty() {
        return Resolution {
            action: ReviewAction::AcceptedNoOp,
            fields: Vec::new(),
            applied,
        };
    }

    for change in &applied {
        doctor.apply_proposal(change.field);
    }

    Resolution {
        action: ReviewAction::Accepted,
        fields: applied.iter().map(|c| c.field).collect(),
        applied,
    }
}

/// Discard every active proposal, whether or not it would have changed anything.
pub fn reject(doctor: &mut Doctor) -> Resolution {
    let fields = Field::ALL
        .into_iter()
        .filter(|&field| doctor.clear_proposal(field))
        .collect();

    Resolution {
        action: ReviewAction::Rejected,
        fields,
        applied: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, ProposedUpdates};

    fn make_doctor(proposed: ProposedUpdates) -> Doctor {
        Doctor {
            name: "Dr. Test".to_string(),
            source_page: None,
            address: "1 Main St".to_string(),
            focus: "Cardiology".to_string(),
            school_graduated: "Yale".to_string(),
            year: 2010,
            proposed,
        }
    }

    #[test]
    fn test_no_proposals_no_changes() {
        let doctor = make_doctor(ProposedUpdates::default());
        assert!(changes(&doctor).is_empty());
    }

    #[test]
    fn test_equal_proposal_is_not_a_change() {
        let doctor = make_doctor(ProposedUpdates {
            address: Some("1 Main St".to_string()),
            year: Some(2010),
            ..Default::default()
        });
        assert!(changes(&doctor).is_empty());
    }

    #[test]
    fn test_changes_follow_field_order() {
        let doctor = make_doctor(ProposedUpdates {
            year: Some(2012),
            address: Some("2 Side St".to_string()),
            school_graduated: Some("Harvard".to_string()),
            focus: None,
        });

        let fields: Vec<Field> = changes(&doctor).into_iter().map(|c| c.field).collect();
        assert_eq!(
            fields,
            vec![Field::Address, Field::SchoolGraduated, Field::Year]
        );
    }

    #[test]
    fn test_changes_is_repeatable() {
        let doctor = make_doctor(ProposedUpdates {
            focus: Some("Oncology".to_string()),
            ..Default::default()
        });
        assert_eq!(changes(&doctor), changes(&doctor));
    }

    #[test]
    fn test_accept_applies_and_clears_changed_slots_only() {
        let mut doctor = make_doctor(ProposedUpdates {
            address: Some("1 Main St".to_string()),
            focus: Some("Oncology".to_string()),
            ..Default::default()
        });

        let resolution = accept(&mut doctor);

        assert_eq!(resolution.action, ReviewAction::Accepted);
        assert_eq!(resolution.fields, vec![Field::Focus]);
        assert_eq!(
            resolution.applied,
            vec![Change {
                field: Field::Focus,
                old: FieldValue::Text("Cardiology".to_string()),
                new: FieldValue::Text("Oncology".to_string()),
            }]
        );
        assert_eq!(doctor.focus, "Oncology");
        assert!(doctor.proposed.focus.is_none());
        assert_eq!(doctor.proposed.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn test_accept_applies_every_change_in_field_order() {
        let mut doctor = make_doctor(ProposedUpdates {
            address: Some("2 Side St".to_string()),
            focus: Some("  ".to_string()),
            school_graduated: Some("Harvard".to_string()),
            year: Some(2012),
        });

        let resolution = accept(&mut doctor);

        assert_eq!(resolution.action, ReviewAction::Accepted);
        assert_eq!(
            resolution.fields,
            vec![Field::Address, Field::SchoolGraduated, Field::Year]
        );
        assert_eq!(resolution.applied.len(), 3);
        assert_eq!(doctor.address, "2 Side St");
        assert_eq!(doctor.school_graduated, "Harvard");
        assert_eq!(doctor.year, 2012);
        assert!(doctor.proposed.address.is_none());
        assert!(doctor.proposed.school_graduated.is_none());
        assert!(doctor.proposed.year.is_none());
        assert_eq!(doctor.focus, "Cardiology");
        assert_eq!(doctor.proposed.focus.as_deref(), Some("  "));
    }

    #[test]
    fn test_accept_without_changes_is_noop() {
        let mut doctor = make_doctor(ProposedUpdates::default());
        let before = doctor.clone();

        let resolution = accept(&mut doctor);

        assert_eq!(resolution.action, ReviewAction::AcceptedNoOp);
        assert!(resolution.fields.is_empty());
        assert_eq!(doctor, before);
    }

    #[test]
    fn test_reject_clears_all_active_slots() {
        let mut doctor = make_doctor(ProposedUpdates {
            address: Some("1 Main St".to_string()),
            focus: Some("Oncology".to_string()),
            school_graduated: None,
            year: Some(2011),
        });

        let resolution = reject(&mut doctor);

        assert_eq!(resolution.action, ReviewAction::Rejected);
        assert_eq!(
            resolution.fields,
            vec![Field::Address, Field::Focus, Field::Year]
        );
        assert_eq!(doctor.proposed, ProposedUpdates::default());
        assert_eq!(doctor.address, "1 Main St");
        assert_eq!(doctor.focus, "Cardiology");
        assert_eq!(doctor.year, 2010);
    }

    #[test]
    fn test_reject_twice_reports_nothing_the_second_time() {
        let mut doctor = make_doctor(ProposedUpdates {
            focus: Some("Oncology".to_string()),
            ..Default::default()
        });

        reject(&mut doctor);
        let second = reject(&mut doctor);

        assert_eq!(second.action, ReviewAction::Rejected);
        assert!(second.fields.is_empty());
    }
}
