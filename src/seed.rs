//! Seed rows for a review session.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ReviewError;
use crate::models::{Doctor, ProposedUpdates};

/// Load doctors from a JSON array file.
pub fn load_doctors(path: &Path) -> Result<Vec<Doctor>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let doctors: Vec<Doctor> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    check_unique_names(&doctors)?;
    Ok(doctors)
}

/// Names identify rows in the decision map, so they must not repeat.
pub fn check_unique_names(doctors: &[Doctor]) -> Result<(), ReviewError> {
    let mut seen = HashSet::new();
    for doctor in doctors {
        if !seen.insert(doctor.name.as_str()) {
            return Err(ReviewError::DuplicateName(doctor.name.clone()));
        }
    }
    Ok(())
}

/// The built-in demo rows used when no seed file is configured.
pub fn default_doctors() -> Vec<Doctor> {
    vec![
        doctor(
            "Dr. Sarah Johnson",
            "https://example.com/sarah-johnson",
            "123 Medical Center Dr, Boston, MA",
            "Cardiology",
            "Harvard Medical School",
            2015,
            ProposedUpdates {
                address: Some("123 Medical Center Dr, Boston, MA".to_string()),
                ..Default::default()
            },
        ),
        doctor(
            "Dr. Michael Chen",
            "https://example.com/michael-chen",
            "456 Healthcare Blvd, New York, NY",
            "Neurology",
            "Johns Hopkins",
            2018,
            ProposedUpdates {
                address: Some("456 Healthcare Blvd, New York, NY".to_string()),
                focus: Some("Neurosurgery".to_string()),
                ..Default::default()
            },
        ),
        doctor(
            "Dr. Emily Rodriguez",
            "https://example.com/emily-rodriguez",
            "789 Clinic Ave, Chicago, IL",
            "Pediatrics",
            "Stanford Medicine",
            2012,
            ProposedUpdates {
                school_graduated: Some("Stanford School of Medicine".to_string()),
                ..Default::default()
            },
        ),
        doctor(
            "Dr. James Wilson",
            "https://example.com/james-wilson",
            "321 Hospital St, Los Angeles, CA",
            "Orthopedics",
            "Yale School of Medicine",
            2016,
            ProposedUpdates {
                year: Some(2018),
                ..Default::default()
            },
        ),
        doctor(
            "Dr. Lisa Park",
            "https://example.com/lisa-park",
            "654 Medical Plaza, Houston, TX",
            "Dermatology",
            "UCLA Medical School",
            2020,
            ProposedUpdates {
                address: Some("1200 Main St, Houston, TX".to_string()),
                ..Default::default()
            },
        ),
    ]
}

fn doctor(
    name: &str,
    source_page: &str,
    address: &str,
    focus: &str,
    school_graduated: &str,
    year: i32,
    proposed: ProposedUpdates,
) -> Doctor {
    Doctor {
        name: name.to_string(),
        source_page: Some(source_page.to_string()),
        address: address.to_string(),
        focus: focus.to_string(),
        school_graduated: school_graduated.to_string(),
        year,
        proposed,
    }
}
