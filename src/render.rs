//! Server-side HTML for the review page.
//!
//! The page is rebuilt from session state on every request. Accept, reject
//! and reset controls are plain forms that post back and redirect to `/`.

use std::fmt::Write;

use crate::export::SNAPSHOT_FILE_NAME;
use crate::models::{AuditEntry, Doctor, ReviewSummary};
use crate::review;
use crate::session::ReviewSession;

const NO_CHANGES: &str = "-- No proposed changes --";
const NO_SOURCE: &str = "—";

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: 0.5rem; text-align: left; vertical-align: top; }
.caption { color: #777; }
.notice { background: #eef6ff; border: 1px solid #9cc3f5; padding: 0.5rem 1rem; }
.summary { display: flex; gap: 2rem; }
.accepted { color: #1a7f37; }
.rejected { color: #cf222e; }
form { display: inline; }
";

/// Render the full review page.
pub fn render_page(session: &ReviewSession, notice: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Doctor Review</title>\n");
    let _ = writeln!(html, "<style>\n{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>Doctor Information Management (proposed updates)</h1>\n<hr>\n");

    if let Some(notice) = notice {
        let _ = writeln!(html, "<p class=\"notice\">{}</p>", escape_html(notice));
    }

    html.push_str("<h3>Review Table</h3>\n");
    render_table(&mut html, session.doctors());

    html.push_str("<hr>\n<h2>Summary (this session)</h2>\n");
    render_summary(&mut html, &session.summary());
    let _ = writeln!(
        html,
        "<p><a href=\"/snapshot.csv\" download=\"{}\">Download current table (CSV)</a></p>",
        SNAPSHOT_FILE_NAME
    );

    html.push_str("<h4>Audit log (who/what/when)</h4>\n");
    render_audit(&mut html, session.audit().entries());

    html.push_str(
        "<p>\
<form method=\"post\" action=\"/actions/clear\"><button type=\"submit\">Clear Session Actions</button></form> \
<form method=\"post\" action=\"/audit/clear\"><button type=\"submit\">Clear Audit Log</button></form>\
</p>\n",
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn render_table(html: &mut String, doctors: &[Doctor]) {
    html.push_str("<table>\n<thead><tr>");
    for title in [
        "Doctor",
        "Source",
        "Address",
        "Focus",
        "School / Year",
        "Proposed Changes",
        "Accept",
        "Reject",
    ] {
        let _ = write!(html, "<th>{}</th>", title);
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (index, doctor) in doctors.iter().enumerate() {
        render_row(html, index, doctor);
    }
    html.push_str("</tbody>\n</table>\n");
}

fn render_row(html: &mut String, index: usize, doctor: &Doctor) {
    html.push_str("<tr>");
    let _ = write!(html, "<td><strong>{}</strong></td>", escape_html(&doctor.name));

    match doctor.source_page.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(url) => {
            let _ = write!(
                html,
                "<td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Open</a></td>",
                escape_html(url)
            );
        }
        None => {
            let _ = write!(html, "<td class=\"caption\">{}</td>", NO_SOURCE);
        }
    }

    let _ = write!(
        html,
        "<td>{}</td><td>{}</td><td>{}  ·  {}</td>",
        escape_html(&doctor.address),
        escape_html(&doctor.focus),
        escape_html(&doctor.school_graduated),
        doctor.year
    );

    let changes = review::changes(doctor);
    if changes.is_empty() {
        let _ = write!(html, "<td class=\"caption\">{}</td>", NO_CHANGES);
    } else {
        html.push_str("<td><ul>");
        for change in &changes {
            let _ = write!(
                html,
                "<li><strong>{}</strong>: '{}' → <strong>'{}'</strong></li>",
                change.field,
                escape_html(&change.old.to_string()),
                escape_html(&change.new.to_string())
            );
        }
        html.push_str("</ul></td>");
    }

    let _ = write!(
        html,
        "<td><form method=\"post\" action=\"/doctors/{index}/accept\"><button type=\"submit\">✅ Accept</button></form></td>\
<td><form method=\"post\" action=\"/doctors/{index}/reject\"><button type=\"submit\">❌ Reject</button></form></td>",
    );
    html.push_str("</tr>\n");
}

fn render_summary(html: &mut String, summary: &ReviewSummary) {
    if summary.is_empty() {
        html.push_str("<p class=\"caption\">No actions yet.</p>\n");
        return;
    }

    html.push_str("<div class=\"summary\">\n");
    for (class, title, names) in [
        ("accepted", "Accepted", &summary.accepted),
        ("rejected", "Rejected", &summary.rejected),
    ] {
        let _ = write!(
            html,
            "<div class=\"{}\"><p>{} ({}):</p><ul>",
            class,
            title,
            names.len()
        );
        for name in names {
            let _ = write!(html, "<li>{}</li>", escape_html(name));
        }
        html.push_str("</ul></div>\n");
    }
    html.push_str("</div>\n");
}

fn render_audit(html: &mut String, entries: &[AuditEntry]) {
    if entries.is_empty() {
        html.push_str("<p class=\"caption\">No audit entries yet.</p>\n");
        return;
    }

    html.push_str(
        "<table>\n<thead><tr><th>Time</th><th>Reviewer</th><th>Name</th><th>Action</th><th>Fields</th></tr></thead>\n<tbody>\n",
    );
    for entry in entries {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.time_label(),
            escape_html(&entry.reviewer),
            escape_html(&entry.name),
            entry.action.as_str(),
            entry.fields_label()
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
