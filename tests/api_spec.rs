use axum::http::{header, StatusCode};
use axum_test::TestServer;
use doctor_review::api::create_router;
use doctor_review::models::*;
use doctor_review::seed::default_doctors;
use doctor_review::session::{ReviewSession, SessionStore};

fn setup() -> TestServer {
    let session =
        ReviewSession::new("Albert Yao", default_doctors()).expect("Failed to create session");
    let app = create_router(SessionStore::new(session));
    TestServer::new(app).expect("Failed to create test server")
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok_on_both_paths() {
        let server = setup();

        for path in ["/health", "/api/v1/health"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            response.assert_json(&serde_json::json!({ "status": "ok" }));
        }
    }
}

mod doctors {
    use super::*;

    #[tokio::test]
    async fn lists_rows_with_pending_changes() {
        let server = setup();

        let response = server.get("/api/v1/doctors").await;

        response.assert_status_ok();
        let doctors: Vec<DoctorWithChanges> = response.json();
        assert_eq!(doctors.len(), 5);
        assert_eq!(doctors[1].index, 1);
        assert_eq!(doctors[1].doctor.name, "Dr. Michael Chen");
        assert_eq!(doctors[1].changes.len(), 1);
        assert_eq!(doctors[1].changes[0].field, Field::Focus);
        assert!(doctors[0].changes.is_empty());
    }

    #[tokio::test]
    async fn returns_not_found_for_unknown_row() {
        let server = setup();

        let response = server.get("/api/v1/doctors/17").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Doctor not found at row 17");
    }

    #[tokio::test]
    async fn accept_returns_audit_entry_and_updates_row() {
        let server = setup();

        let response = server.post("/api/v1/doctors/3/accept").await;

        response.assert_status_ok();
        let entry: AuditEntry = response.json();
        assert_eq!(entry.action, ReviewAction::Accepted);
        assert_eq!(entry.fields, vec![Field::Year]);
        assert_eq!(entry.name, "Dr. James Wilson");

        let row: DoctorWithChanges = server.get("/api/v1/doctors/3").await.json();
        assert_eq!(row.doctor.year, 2018);
        assert!(row.doctor.proposed.year.is_none());
        assert!(row.changes.is_empty());
    }

    #[tokio::test]
    async fn reject_discards_proposals() {
        let server = setup();

        let entry: AuditEntry = server.post("/api/v1/doctors/2/reject").await.json();
        assert_eq!(entry.action, ReviewAction::Rejected);
        assert_eq!(entry.fields, vec![Field::SchoolGraduated]);

        let row: DoctorWithChanges = server.get("/api/v1/doctors/2").await.json();
        assert_eq!(row.doctor.school_graduated, "Stanford Medicine");
        assert!(row.doctor.proposed.school_graduated.is_none());
    }

    #[tokio::test]
    async fn accept_unknown_row_is_not_found() {
        let server = setup();

        let response = server.post("/api/v1/doctors/9/accept").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let audit: Vec<AuditEntry> = server.get("/api/v1/audit").await.json();
        assert!(audit.is_empty());
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn summary_groups_decisions() {
        let server = setup();
        server.post("/api/v1/doctors/1/accept").await;
        server.post("/api/v1/doctors/4/reject").await;
        server.post("/api/v1/doctors/0/accept").await;

        let summary: ReviewSummary = server.get("/api/v1/summary").await.json();

        assert_eq!(summary.accepted, vec!["Dr. Michael Chen".to_string()]);
        assert_eq!(summary.rejected, vec!["Dr. Lisa Park".to_string()]);
    }

    #[tokio::test]
    async fn audit_records_every_action_including_noops() {
        let server = setup();
        server.post("/api/v1/doctors/0/accept").await;
        server.post("/api/v1/doctors/1/accept").await;

        let audit: Vec<AuditEntry> = server.get("/api/v1/audit").await.json();

        assert_eq!(audit.len(), 2);
        assert_eq!(audit[0].action, ReviewAction::AcceptedNoOp);
        assert!(audit[0].fields.is_empty());
        assert_eq!(audit[1].action, ReviewAction::Accepted);
    }

    #[tokio::test]
    async fn clearing_audit_keeps_decisions() {
        let server = setup();
        server.post("/api/v1/doctors/1/accept").await;

        server
            .delete("/api/v1/audit")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let audit: Vec<AuditEntry> = server.get("/api/v1/audit").await.json();
        let summary: ReviewSummary = server.get("/api/v1/summary").await.json();
        assert!(audit.is_empty());
        assert_eq!(summary.accepted.len(), 1);
    }

    #[tokio::test]
    async fn clearing_actions_keeps_audit() {
        let server = setup();
        server.post("/api/v1/doctors/1/accept").await;

        server
            .delete("/api/v1/actions")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let audit: Vec<AuditEntry> = server.get("/api/v1/audit").await.json();
        let summary: ReviewSummary = server.get("/api/v1/summary").await.json();
        assert_eq!(audit.len(), 1);
        assert!(summary.is_empty());
    }
}

mod review_page {
    use super::*;

    #[tokio::test]
    async fn renders_table_and_placeholders() {
        let server = setup();

        let response = server.get("/").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Dr. Emily Rodriguez"));
        assert!(html.contains("No actions yet."));
        assert!(html.contains("No audit entries yet."));
    }

    #[tokio::test]
    async fn accept_form_redirects_and_shows_notice_once() {
        let server = setup();

        let response = server.post("/doctors/1/accept").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/");

        let html = server.get("/").await.text();
        assert!(html.contains("Dr. Michael Chen updated. Focus: &#39;Neurology&#39; -&gt; &#39;Neurosurgery&#39;"));
        assert!(html.contains("Accepted (1):"));

        let html = server.get("/").await.text();
        assert!(!html.contains("class=\"notice\""));
    }

    #[tokio::test]
    async fn reject_form_on_unknown_row_is_not_found() {
        let server = setup();

        server
            .post("/doctors/99/reject")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reset_forms_redirect() {
        let server = setup();
        server.post("/doctors/4/reject").await;

        server
            .post("/actions/clear")
            .await
            .assert_status(StatusCode::SEE_OTHER);
        server
            .post("/audit/clear")
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let html = server.get("/").await.text();
        assert!(html.contains("Cleared audit log."));
        assert!(html.contains("No actions yet."));
        assert!(html.contains("No audit entries yet."));
    }
}

mod snapshot {
    use super::*;

    #[tokio::test]
    async fn downloads_current_rows_as_csv() {
        let server = setup();
        server.post("/api/v1/doctors/3/accept").await;

        let response = server.get("/snapshot.csv").await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.header(header::CONTENT_DISPOSITION),
            "attachment; filename=\"doctors_snapshot.csv\""
        );

        let csv = response.text();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Source Page,Address,Focus,School Graduated,Year,New Address,New Focus,New School Graduated,New Year")
        );
        let wilson = csv
            .lines()
            .find(|l| l.starts_with("Dr. James Wilson"))
            .expect("Wilson row missing");
        assert!(wilson.ends_with(",2018,,,,"));
    }
}
