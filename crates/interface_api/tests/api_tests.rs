//! HTTP routing tests against the in-memory store

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_motor::{InMemoryMotorStore, MotorStorePort, MAX_DESCRIPTION_LEN};
use interface_api::config::{ApiConfig, StoreBackend};
use interface_api::{create_router, AppState};
use test_utils::{
    assert_error_body, init_test_tracing, seeded_memory_store, ClaimRequestBuilder, DateFixtures,
    IdFixtures, TestPolicyBuilder,
};

async fn test_server() -> (TestServer, InMemoryMotorStore) {
    init_test_tracing();
    let store = seeded_memory_store().await;
    let config = ApiConfig {
        store_backend: StoreBackend::Memory,
        ..ApiConfig::default()
    };
    let state = AppState::new(Arc::new(store.clone()), config);
    let server = TestServer::new(create_router(state)).unwrap();
    (server, store)
}

fn validity_path(car_id: i64) -> String {
    format!("/api/cars/{}/insurance-valid", car_id)
}

fn claims_path(car_id: i64) -> String {
    format!("/api/cars/{}/claims", car_id)
}

mod cars {
    use super::*;

    #[tokio::test]
    async fn test_lists_seeded_cars_with_owners() {
        let (server, _) = test_server().await;

        let response = server.get("/api/cars").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let cars = body.as_array().unwrap();
        assert_eq!(cars.len(), 2);
        assert_eq!(cars[0]["id"], 1);
        assert_eq!(cars[0]["vin"], "VIN12345");
        assert_eq!(cars[0]["year"], 2018);
        assert_eq!(cars[0]["ownerName"], "Ana Pop");
        assert_eq!(cars[1]["make"], "VW");
    }

    #[tokio::test]
    async fn test_requests_are_tagged_with_an_id() {
        let (server, _) = test_server().await;

        let generated = server.get("/api/cars").await;
        assert!(!generated.header("x-request-id").is_empty());

        let echoed = server
            .get("/api/cars")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("trace-42"),
            )
            .await;
        assert_eq!(echoed.header("x-request-id"), "trace-42");
    }
}

mod validity {
    use super::*;

    #[tokio::test]
    async fn test_boundaries_are_inclusive() {
        let (server, _) = test_server().await;

        for (date, expected) in [
            ("2024-01-01", true),
            ("2024-12-31", true),
            ("2023-12-31", false),
            ("2025-01-01", true),
            ("2025-12-31", true),
            ("2026-01-01", false),
        ] {
            let response = server
                .get(&validity_path(1))
                .add_query_param("date", date)
                .await;
            response.assert_status_ok();
            response.assert_json(&json!({"carId": 1, "date": date, "valid": expected}));
        }
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let (server, _) = test_server().await;

        let response = server
            .get(&validity_path(1))
            .add_query_param("date", "invalid-date")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "invalid.date.format");
    }

    #[tokio::test]
    async fn test_missing_date_is_bad_request() {
        let (server, _) = test_server().await;

        let response = server.get(&validity_path(1)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "invalid.date.format");
    }

    #[tokio::test]
    async fn test_repeated_date_param_is_bad_request() {
        let (server, _) = test_server().await;

        let response = server
            .get("/api/cars/1/insurance-valid?date=2024-01-01&date=2024-02-02")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_error_body(&body, "invalid.request");
        assert!(body["message"].as_str().unwrap().contains("date"));
    }

    #[tokio::test]
    async fn test_unknown_car_is_not_found() {
        let (server, _) = test_server().await;

        let response = server
            .get(&validity_path(999))
            .add_query_param("date", "2024-06-15")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_error_body(&body, "record.not.found");
        assert_eq!(body["message"], "Car not found for Id 999");
    }

    #[tokio::test]
    async fn test_non_numeric_car_id_is_bad_request() {
        let (server, _) = test_server().await;

        let response = server
            .get("/api/cars/abc/insurance-valid")
            .add_query_param("date", "2024-06-15")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "invalid.request");
    }
}

mod claims {
    use super::*;

    #[tokio::test]
    async fn test_valid_claim_is_created_pending() {
        let (server, _) = test_server().await;

        let response = server
            .post(&claims_path(1))
            .json(&ClaimRequestBuilder::new().with_amount(dec!(500)).to_json())
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["id"], 1);
        assert_eq!(body["carId"], 1);
        assert_eq!(body["claimDate"], "2024-06-15");
        assert_eq!(body["status"], "Pending");
    }

    #[tokio::test]
    async fn test_numeric_amount_and_timestamp_date_accepted() {
        let (server, _) = test_server().await;

        let response = server
            .post(&claims_path(1))
            .json(&json!({
                "claimDate": "2024-06-15T10:30:00Z",
                "description": "Hail damage",
                "amount": 750.25
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["claimDate"], "2024-06-15");
    }

    #[tokio::test]
    async fn test_timestamp_without_offset_accepted_as_utc() {
        let (server, _) = test_server().await;

        let response = server
            .post(&claims_path(1))
            .json(&json!({
                "claimDate": "2024-06-15T10:00:00",
                "description": "Side mirror",
                "amount": "85.00"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["claimDate"], "2024-06-15");
    }

    #[tokio::test]
    async fn test_sub_cent_amount_is_rejected_and_not_stored() {
        let (server, store) = test_server().await;

        let response = server
            .post(&claims_path(1))
            .json(&json!({
                "claimDate": "2024-06-15",
                "description": "Scratch",
                "amount": "0.001"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_error_body(&body, "invalid.amount");
        assert_eq!(body["message"], "Amount must have at most 2 decimal places");
        assert!(store.claims_for_car(IdFixtures::dacia_car_id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uncovered_date_is_rejected() {
        let (server, _) = test_server().await;

        let response = server
            .post(&claims_path(1))
            .json(&ClaimRequestBuilder::new().on(DateFixtures::before_coverage()).to_json())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_error_body(&body, "no.valid.policy");
        assert_eq!(body["message"], "No active insurance policy for Car Id 1 on 2023-12-31");
    }

    #[tokio::test]
    async fn test_future_covered_date_is_rejected() {
        let (server, store) = test_server().await;
        let today = Utc::now().date_naive();
        store
            .create_policy(
                TestPolicyBuilder::new(IdFixtures::golf_car_id())
                    .covering(today, today + Duration::days(365))
                    .build(),
            )
            .await
            .unwrap();

        let response = server
            .post(&claims_path(2))
            .json(&ClaimRequestBuilder::new().on(today + Duration::days(30)).to_json())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "invalid.claim.date");
    }

    #[tokio::test]
    async fn test_business_rule_codes() {
        let (server, _) = test_server().await;

        let cases = [
            (ClaimRequestBuilder::new().with_amount(dec!(0)), "invalid.amount"),
            (ClaimRequestBuilder::new().with_amount(dec!(-10)), "invalid.amount"),
            (ClaimRequestBuilder::new().with_description("   "), "required.description"),
            (ClaimRequestBuilder::new().with_raw_date("15/06/2024"), "invalid.date.format"),
        ];

        for (builder, code) in cases {
            let response = server.post(&claims_path(1)).json(&builder.to_json()).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_error_body(&response.json(), code);
        }
    }

    #[tokio::test]
    async fn test_empty_body_fails_on_date_first() {
        let (server, _) = test_server().await;

        let response = server.post(&claims_path(1)).json(&json!({})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "invalid.date.format");
    }

    #[tokio::test]
    async fn test_unknown_car_is_not_found() {
        let (server, _) = test_server().await;

        let response = server
            .post(&claims_path(999))
            .json(&ClaimRequestBuilder::new().to_json())
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_error_body(&response.json(), "record.not.found");
    }

    #[tokio::test]
    async fn test_overlong_description_rejected_before_business_checks() {
        let (server, store) = test_server().await;

        let response = server
            .post(&claims_path(999))
            .json(&ClaimRequestBuilder::new().with_description("x".repeat(MAX_DESCRIPTION_LEN + 1)).to_json())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "invalid.request");
        assert!(store.claims_for_car(IdFixtures::dacia_car_id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, _) = test_server().await;

        let response = server
            .post(&claims_path(1))
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "invalid.request");
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_bad_request() {
        let (server, store) = test_server().await;
        store.set_offline(true);

        let response = server
            .post(&claims_path(1))
            .json(&ClaimRequestBuilder::new().to_json())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "unknown.error");
        assert_eq!(body["message"], "An unknown error occurred.");
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn test_history_is_chronological() {
        let (server, _) = test_server().await;

        for date in ["2025-02-10", "2024-03-05", "2024-11-20"] {
            server
                .post(&claims_path(1))
                .json(&ClaimRequestBuilder::new().with_raw_date(date).to_json())
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get("/api/cars/1/history").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["carId"], 1);
        assert_eq!(body["vin"], "VIN12345");

        let policy_starts: Vec<&str> = body["policies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["startDate"].as_str().unwrap())
            .collect();
        assert_eq!(policy_starts, ["2024-01-01", "2025-01-01"]);

        let claim_dates: Vec<&str> = body["claims"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["claimDate"].as_str().unwrap())
            .collect();
        assert_eq!(claim_dates, ["2024-03-05", "2024-11-20", "2025-02-10"]);
    }

    #[tokio::test]
    async fn test_unknown_car_is_not_found() {
        let (server, _) = test_server().await;

        let response = server.get("/api/cars/999/history").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_error_body(&response.json(), "record.not.found");
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let (server, _) = test_server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_follows_store_health() {
        let (server, store) = test_server().await;

        server.get("/health/ready").await.assert_status_ok();

        store.set_offline(true);
        server
            .get("/health/ready")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}
