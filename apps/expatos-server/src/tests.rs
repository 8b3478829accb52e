//! Router tests for the ExpatOS server
//!
//! Test categories:
//! - End-to-end analysis over HTTP
//! - Boundary validation (dates, duplicates, null bodies)
//! - Property tests for the `as_of` parameter and document type parsing

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::{app, AppState};

    fn server(strict: bool) -> TestServer {
        TestServer::new(app(AppState { strict })).unwrap()
    }

    /// Reference documents relative to 2025-01-01
    fn fixture(visa_expiry: &str) -> Value {
        json!([
            {"id": "1", "type": "passport", "expiryDate": "2025-05-31", "status": "warning"},
            {"id": "2", "type": "uae_visa", "expiryDate": visa_expiry, "status": "valid"},
            {"id": "3", "type": "emirates_id", "expiryDate": "2026-02-05", "status": "valid"},
            {"id": "4", "type": "ejari", "expiryDate": "2026-02-05", "status": "valid"},
            {"id": "5", "type": "health_insurance", "expiryDate": "2024-12-27", "status": "expired"}
        ])
    }

    #[tokio::test]
    async fn test_health() {
        let response = server(false).get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_analyze_gate_closed() {
        // Visa 395 days out
        let response = server(false)
            .post("/api/analyze")
            .add_query_param("as_of", "2025-01-01")
            .json(&fixture("2026-01-31"))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["analysis"]["healthScore"], 100);
        assert_eq!(body["analysis"]["criticalAlerts"], json!([]));
        assert_eq!(body["analysis"]["dependencies"], json!([]));
        assert_eq!(body["healthBand"], "all_good");
    }

    #[tokio::test]
    async fn test_analyze_gate_open() {
        // Visa 300 days out
        let response = server(false)
            .post("/api/analyze")
            .add_query_param("as_of", "2025-01-01")
            .json(&fixture("2025-10-28"))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let analysis = &body["analysis"];
        assert_eq!(analysis["healthScore"], 60);
        assert_eq!(body["healthLabel"], "Needs Attention");

        let statuses: Vec<&str> = analysis["dependencies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|edge| edge["status"].as_str().unwrap())
            .collect();
        assert_eq!(statuses, vec!["warning", "failing", "ok", "ok"]);

        let alerts = analysis["criticalAlerts"].as_array().unwrap();
        assert_eq!(alerts[0]["severity"], "warning");
        assert_eq!(alerts[0]["deadline"], "May 31, 2025");
        assert_eq!(alerts[0]["daysUntilDeadline"], 150);
        assert_eq!(alerts[1]["severity"], "critical");
        assert_eq!(alerts[1]["deadline"], "Immediately");
        assert_eq!(body["urgencies"], json!(["upcoming", "overdue"]));
    }

    #[tokio::test]
    async fn test_null_body_reports_missing_visa() {
        let response = server(false)
            .post("/api/analyze")
            .json(&Value::Null)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["analysis"]["healthScore"], 0);
        assert_eq!(
            body["analysis"]["criticalAlerts"][0]["title"],
            "UAE Visa Not Found"
        );
    }

    #[tokio::test]
    async fn test_unknown_status_hint_is_accepted() {
        let mut documents = fixture("2025-10-28");
        documents[1]["status"] = json!("pending");

        let response = server(false)
            .post("/api/analyze")
            .add_query_param("as_of", "2025-01-01")
            .json(&documents)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["analysis"]["healthScore"], 60);
    }

    #[tokio::test]
    async fn test_malformed_expiry_is_rejected() {
        let response = server(false)
            .post("/api/analyze")
            .json(&json!([{"id": "2", "type": "uae_visa", "expiryDate": "31/10/2025"}]))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert!(body["error"].as_str().unwrap().contains("'2'"));
    }

    #[tokio::test]
    async fn test_malformed_as_of_is_rejected() {
        let response = server(false)
            .post("/api/analyze")
            .add_query_param("as_of", "soon")
            .json(&fixture("2025-10-28"))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_strict_server_rejects_duplicates() {
        let docs = json!([
            {"id": "a", "type": "uae_visa", "expiryDate": "2025-06-01"},
            {"id": "b", "type": "uae_visa", "expiryDate": "2027-06-01"}
        ]);

        let response = server(true).post("/api/analyze").json(&docs).await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["code"], "DUPLICATE_DOCUMENT");

        // Request-level override
        let response = server(true)
            .post("/api/analyze")
            .add_query_param("strict", "false")
            .json(&docs)
            .await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_timeline_sorted() {
        let response = server(false)
            .post("/api/timeline")
            .add_query_param("as_of", "2025-01-01")
            .json(&fixture("2025-10-28"))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], 5);
        assert_eq!(body["events"][0]["documentType"], "health_insurance");
        assert_eq!(body["events"][0]["status"], "expired");
        assert_eq!(body["events"][1]["documentType"], "passport");
    }

    #[tokio::test]
    async fn test_document_types() {
        let response = server(false).get("/api/document-types").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["total_types"], 5);
        assert_eq!(body["types"][0]["api_value"], "passport");
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use shared_types::{Document, DocumentRecord, DocumentType};

    proptest! {
        /// Property: any valid calendar date round-trips through a record
        #[test]
        fn valid_dates_parse(year in 2000i32..2100, month in 1u32..=12, day in 1u32..=28) {
            let record = DocumentRecord {
                id: "x".to_string(),
                document_type: DocumentType::Passport,
                expiry_date: format!("{:04}-{:02}-{:02}", year, month, day),
                status: Default::default(),
                number: None,
                holder_name: None,
                issue_date: None,
                issuing_authority: None,
            };
            let doc = Document::try_from(record);
            prop_assert!(doc.is_ok());
        }

        /// Property: free text never parses as a date
        #[test]
        fn free_text_dates_rejected(text in "[a-z ]{1,20}") {
            let record = DocumentRecord {
                id: "x".to_string(),
                document_type: DocumentType::Ejari,
                expiry_date: text,
                status: Default::default(),
                number: None,
                holder_name: None,
                issue_date: None,
                issuing_authority: None,
            };
            prop_assert!(Document::try_from(record).is_err());
        }

        /// Property: unknown type names are preserved verbatim
        #[test]
        fn unknown_types_preserved(name in "[a-z]{3,12}_doc") {
            let parsed = DocumentType::from(name.as_str());
            prop_assert_eq!(parsed.clone(), DocumentType::Other(name.clone()));
            prop_assert_eq!(String::from(parsed), name);
        }
    }
}
