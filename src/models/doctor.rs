use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A doctor profile under review.
///
/// The current attributes are what the directory shows today. Each one has a
/// parallel slot in [`ProposedUpdates`] holding a candidate replacement that
/// the reviewer can accept or reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique within a session.
    pub name: String,
    /// Page the proposed data was scraped from, if known.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub source_page: Option<String>,
    pub address: String,
    pub focus: String,
    pub school_graduated: String,
    pub year: i32,
    #[serde(flatten)]
    pub proposed: ProposedUpdates,
}

/// Candidate values for a doctor's tracked fields.
///
/// `None` is the only "no proposal" value. Blank strings in seed data are
/// normalised to `None` on deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposedUpdates {
    #[serde(rename = "new_address", default, deserialize_with = "blank_as_none")]
    pub address: Option<String>,
    #[serde(rename = "new_focus", default, deserialize_with = "blank_as_none")]
    pub focus: Option<String>,
    #[serde(
        rename = "new_school_graduated",
        default,
        deserialize_with = "blank_as_none"
    )]
    pub school_graduated: Option<String>,
    #[serde(rename = "new_year", default, deserialize_with = "blank_year_as_none")]
    pub year: Option<i32>,
}

/// One of the four tracked attributes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Address")]
    Address,
    #[serde(rename = "Focus")]
    Focus,
    #[serde(rename = "School Graduated")]
    SchoolGraduated,
    #[serde(rename = "Year")]
    Year,
}

impl Field {
    /// Every tracked field in the fixed order changes are reported in.
    pub const ALL: [Field; 4] = [
        Field::Address,
        Field::Focus,
        Field::SchoolGraduated,
        Field::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::Focus => "Focus",
            Self::SchoolGraduated => "School Graduated",
            Self::Year => "Year",
        }
    }

    /// Column header of the matching proposal slot in exports.
    pub fn proposal_label(&self) -> &'static str {
        match self {
            Self::Address => "New Address",
            Self::Focus => "New Focus",
            Self::SchoolGraduated => "New School Graduated",
            Self::Year => "New Year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A tracked field's value, text or graduation year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Year(i32),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Year(y) => write!(f, "{}", y),
        }
    }
}

/// A proposal that differs from the current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub field: Field,
    pub old: FieldValue,
    pub new: FieldValue,
}

/// A doctor with its row position and pending changes, used for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorWithChanges {
    /// Row position, used to address the doctor in accept/reject routes.
    pub index: usize,
    #[serde(flatten)]
    pub doctor: Doctor,
    pub changes: Vec<Change>,
}

impl Doctor {
    pub fn current(&self, field: Field) -> FieldValue {
        match field {
            Field::Address => FieldValue::Text(self.address.clone()),
            Field::Focus => FieldValue::Text(self.focus.clone()),
            Field::SchoolGraduated => FieldValue::Text(self.school_graduated.clone()),
            Field::Year => FieldValue::Year(self.year),
        }
    }

    /// The active proposal for `field`, if any. Blank text is not a proposal.
    pub fn proposal(&self, field: Field) -> Option<FieldValue> {
        let text = |slot: &Option<String>| {
            slot.as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| FieldValue::Text(v.to_string()))
        };

        match field {
            Field::Address => text(&self.proposed.address),
            Field::Focus => text(&self.proposed.focus),
            Field::SchoolGraduated => text(&self.proposed.school_graduated),
            Field::Year => self.proposed.year.map(FieldValue::Year),
        }
    }

    /// Move the proposal for `field` into the current value and empty the slot.
    /// Returns `false` when there was no active proposal.
    pub fn apply_proposal(&mut self, field: Field) -> bool {
        if self.proposal(field).is_none() {
            return false;
        }

        match field {
            Field::Address => {
                if let Some(v) = self.proposed.address.take() {
                    self.address = v;
                }
            }
            Field::Focus => {
                if let Some(v) = self.proposed.focus.take() {
                    self.focus = v;
                }
            }
            Field::SchoolGraduated => {
                if let Some(v) = self.proposed.school_graduated.take() {
                    self.school_graduated = v;
                }
            }
            Field::Year => {
                if let Some(v) = self.proposed.year.take() {
                    self.year = v;
                }
            }
        }
        true
    }

    /// Empty the proposal slot for `field`. Returns whether it held an active proposal.
    pub fn clear_proposal(&mut self, field: Field) -> bool {
        let was_active = self.proposal(field).is_some();
        match field {
            Field::Address => self.proposed.address = None,
            Field::Focus => self.proposed.focus = None,
            Field::SchoolGraduated => self.proposed.school_graduated = None,
            Field::Year => self.proposed.year = None,
        }
        was_active
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// A year slot in seed data: a number, or a string that may be blank.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearSlot {
    Number(i32),
    Text(String),
}

fn blank_year_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearSlot>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearSlot::Number(year)) => Ok(Some(year)),
        Some(YearSlot::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(YearSlot::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid year: {}", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_proposals_deserialize_as_none() {
        let doctor: Doctor = serde_json::from_value(serde_json::json!({
            "name": "Dr. Test",
            "source_page": "",
            "address": "1 Main St",
            "focus": "Cardiology",
            "school_graduated": "Yale",
            "year": 2010,
            "new_address": "   ",
            "new_focus": "Neurology",
            "new_year": null
        }))
        .unwrap();

        assert!(doctor.source_page.is_none());
        assert!(doctor.proposed.address.is_none());
        assert_eq!(doctor.proposed.focus.as_deref(), Some("Neurology"));
        assert!(doctor.proposed.school_graduated.is_none());
        assert!(doctor.proposed.year.is_none());
    }

    #[test]
    fn blank_year_deserializes_as_none() {
        let doctor: Doctor = serde_json::from_value(serde_json::json!({
            "name": "Dr. Test",
            "address": "1 Main St",
            "focus": "Cardiology",
            "school_graduated": "Yale",
            "year": 2010,
            "new_year": ""
        }))
        .unwrap();
        assert!(doctor.proposed.year.is_none());

        let doctor: Doctor = serde_json::from_value(serde_json::json!({
            "name": "Dr. Test",
            "address": "1 Main St",
            "focus": "Cardiology",
            "school_graduated": "Yale",
            "year": 2010,
            "new_year": "2014"
        }))
        .unwrap();
        assert_eq!(doctor.proposed.year, Some(2014));
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        let result: Result<Doctor, _> = serde_json::from_value(serde_json::json!({
            "name": "Dr. Test",
            "address": "1 Main St",
            "focus": "Cardiology",
            "school_graduated": "Yale",
            "year": 2010,
            "new_year": "soon"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn blank_text_slot_is_not_an_active_proposal() {
        let mut doctor: Doctor = serde_json::from_value(serde_json::json!({
            "name": "Dr. Test",
            "address": "1 Main St",
            "focus": "Cardiology",
            "school_graduated": "Yale",
            "year": 2010
        }))
        .unwrap();
        doctor.proposed.focus = Some(" ".to_string());

        assert!(doctor.proposal(Field::Focus).is_none());
        assert!(!doctor.apply_proposal(Field::Focus));
        assert_eq!(doctor.focus, "Cardiology");
    }

    #[test]
    fn field_serializes_with_display_label() {
        let json = serde_json::to_string(&Field::SchoolGraduated).unwrap();
        assert_eq!(json, "\"School Graduated\"");
    }
}
