//! CSV snapshot of the current rows.

use crate::models::{Doctor, Field};

pub const SNAPSHOT_FILE_NAME: &str = "doctors_snapshot.csv";

/// Render every row, current values then proposal slots, with a header line.
///
/// Absent proposals are empty cells. Cells are quoted per RFC 4180 only when
/// they need it.
pub fn snapshot_csv(doctors: &[Doctor]) -> String {
    let mut header = vec!["Name", "Source Page"];
    header.extend(Field::ALL.iter().map(Field::label));
    header.extend(Field::ALL.iter().map(Field::proposal_label));

    let mut output = String::new();
    push_record(&mut output, header);

    for doctor in doctors {
        let mut record = vec![
            doctor.name.clone(),
            doctor.source_page.clone().unwrap_or_default(),
        ];
        record.extend(Field::ALL.iter().map(|&f| doctor.current(f).to_string()));
        record.extend(Field::ALL.iter().map(|&f| {
            doctor
                .proposal(f)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        push_record(&mut output, record);
    }

    output
}

fn push_record<S: AsRef<str>>(output: &mut String, cells: Vec<S>) {
    let line = cells
        .iter()
        .map(|cell| escape_cell(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    output.push_str(&line);
    output.push('\n');
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
