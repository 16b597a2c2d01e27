// ABOUTME: Tests for the activity API client against an in-process backend
// ABOUTME: Verifies credential headers, endpoint paths, status handling and paired deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use common::{init_test_logging, sample_claims, spawn_server};
use fitness_client::api::ActivityApiClient;
use fitness_client::constants::session_keys;
use fitness_client::errors::{ApiError, ErrorCode};
use fitness_client::models::{ActivityRequest, ActivityType};
use fitness_client::session::{MemorySessionStore, Session, SessionStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request as seen by the backend
#[derive(Debug, Clone)]
struct Seen {
    route: String,
    authorization: Option<String>,
    user_id: Option<String>,
    body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

fn record(log: &Log, route: String, headers: &HeaderMap, body: Option<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    log.lock().unwrap().push(Seen {
        route,
        authorization: header("authorization"),
        user_id: header("x-user-id"),
        body,
    });
}

fn activity_json(id: &str) -> Value {
    json!({
        "id": id,
        "userId": "user-123",
        "type": "RUNNING",
        "duration": 30,
        "additionalMetrics": {},
        "createdAt": "2025-03-01T08:00:00"
    })
}

async fn list_activities(State(log): State<Log>, headers: HeaderMap) -> Response {
    record(&log, "GET /activities".to_owned(), &headers, None);
    Json(json!([activity_json("a1"), activity_json("a2")])).into_response()
}

async fn create_activity(
    State(log): State<Log>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&log, "POST /activities".to_owned(), &headers, Some(body.clone()));
    let mut created = activity_json("new-id");
    created["type"] = body["type"].clone();
    created["duration"] = body["duration"].clone();
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_activity(
    State(log): State<Log>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&log, format!("GET /activities/{id}"), &headers, None);
    if id == "missing" {
        return (StatusCode::NOT_FOUND, "Activity not found").into_response();
    }
    Json(activity_json(&id)).into_response()
}

async fn delete_activity(
    State(log): State<Log>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&log, format!("DELETE /activities/{id}"), &headers, None);
    StatusCode::NO_CONTENT.into_response()
}

async fn get_recommendation(
    State(log): State<Log>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&log, format!("GET /recommendations/activity/{id}"), &headers, None);
    Json(json!({
        "id": "r1",
        "activityId": id,
        "userId": "user-123",
        "activityType": "RUNNING",
        "recommendation": "Overall:Solid effort\n\nPace:Even splits",
        "caloriesBurned": ["About 300 kcal"],
        "improvement": ["Cadence: shorten stride"],
        "suggestions": ["Intervals: 6x400m"],
        "safety": ["Hydrate"],
        "summary": ["Good session"],
        "createdAt": "2025-03-01T08:05:00"
    }))
    .into_response()
}

async fn delete_recommendation(
    State(log): State<Log>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let id = query.get("activityId").cloned().unwrap_or_default();
    record(
        &log,
        format!("DELETE /recommendations/activity?activityId={id}"),
        &headers,
        None,
    );
    StatusCode::OK.into_response()
}

async fn start_backend() -> (String, Log) {
    init_test_logging();
    let log: Log = Arc::default();
    let app = Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/:id", get(get_activity).delete(delete_activity))
        .route("/api/recommendations/activity", delete(delete_recommendation))
        .route("/api/recommendations/activity/:id", get(get_recommendation))
        .with_state(log.clone());
    let base_url = spawn_server(app).await;
    (format!("{base_url}/api"), log)
}

fn signed_in_session() -> Session {
    let session = Session::new(Arc::new(MemorySessionStore::new()));
    session.store_tokens("access-1", Some("refresh-1")).unwrap();
    session.store_user(&sample_claims()).unwrap();
    session
}

fn routes(log: &Log) -> Vec<String> {
    let mut routes: Vec<String> = log.lock().unwrap().iter().map(|s| s.route.clone()).collect();
    routes.sort();
    routes
}

// =============================================================================
// Credentials
// =============================================================================

#[tokio::test]
async fn test_requests_carry_bearer_and_user_id() {
    let (base_url, log) = start_backend().await;
    let api = ActivityApiClient::from_base_url(&base_url, signed_in_session()).unwrap();

    let activities = api.get_activities().await.unwrap();

    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].activity_type, ActivityType::Running);
    let seen = log.lock().unwrap()[0].clone();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer access-1"));
    assert_eq!(seen.user_id.as_deref(), Some("user-123"));
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_credentials() {
    let (base_url, log) = start_backend().await;
    let session = Session::new(Arc::new(MemorySessionStore::new()));
    let api = ActivityApiClient::from_base_url(&base_url, session).unwrap();

    api.get_activities().await.unwrap();

    let seen = log.lock().unwrap()[0].clone();
    assert!(seen.authorization.is_none());
    assert!(seen.user_id.is_none());
}

#[tokio::test]
async fn test_unparsable_user_omits_user_id_header() {
    let (base_url, log) = start_backend().await;
    let store = Arc::new(MemorySessionStore::new());
    store.set(session_keys::ACCESS_TOKEN, "access-1").unwrap();
    store.set(session_keys::USER, "{not json").unwrap();
    let api = ActivityApiClient::from_base_url(&base_url, Session::new(store)).unwrap();

    api.get_activities().await.unwrap();

    let seen = log.lock().unwrap()[0].clone();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer access-1"));
    assert!(seen.user_id.is_none());
}

#[tokio::test]
async fn test_credentials_are_read_per_request() {
    let (base_url, log) = start_backend().await;
    let session = signed_in_session();
    let api = ActivityApiClient::from_base_url(&base_url, session.clone()).unwrap();

    api.get_activities().await.unwrap();
    session.clear().unwrap();
    api.get_activities().await.unwrap();

    let seen = log.lock().unwrap().clone();
    assert!(seen[0].authorization.is_some());
    assert!(seen[1].authorization.is_none());
}

// =============================================================================
// Endpoints
// =============================================================================

#[tokio::test]
async fn test_add_activity_posts_camel_case_body() {
    let (base_url, log) = start_backend().await;
    let api = ActivityApiClient::from_base_url(&base_url, signed_in_session()).unwrap();

    let mut request = ActivityRequest::new(ActivityType::Cycling, 45);
    request.weight = Some(70.0);
    request
        .additional_metrics
        .insert("avgHeartRate".to_owned(), json!(140));
    let created = api.add_activity(&request).await.unwrap();

    assert_eq!(created.id, "new-id");
    assert_eq!(created.activity_type, ActivityType::Cycling);
    let body = log.lock().unwrap()[0].body.clone().unwrap();
    assert_eq!(body["type"], "CYCLING");
    assert_eq!(body["duration"], 45);
    assert_eq!(body["weight"], 70.0);
    assert_eq!(body["additionalMetrics"]["avgHeartRate"], 140);
    assert!(body.get("height").is_none());
}

#[tokio::test]
async fn test_get_activity_detail_returns_recommendation() {
    let (base_url, log) = start_backend().await;
    let api = ActivityApiClient::from_base_url(&base_url, signed_in_session()).unwrap();

    let recommendation = api.get_activity_detail("a1").await.unwrap();

    assert_eq!(recommendation.activity_id, "a1");
    assert_eq!(recommendation.suggestions, vec!["Intervals: 6x400m".to_owned()]);
    assert_eq!(recommendation.sections().count(), 2);
    assert_eq!(routes(&log), vec!["GET /recommendations/activity/a1".to_owned()]);
}

#[tokio::test]
async fn test_missing_activity_is_not_found() {
    let (base_url, _) = start_backend().await;
    let api = ActivityApiClient::from_base_url(&base_url, signed_in_session()).unwrap();

    let err = api.get_activity("missing").await.unwrap_err();

    match &err {
        ApiError::Status { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "Activity not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_activity_with_recommendation_hits_both_services() {
    let (base_url, log) = start_backend().await;
    let api = ActivityApiClient::from_base_url(&base_url, signed_in_session()).unwrap();

    api.delete_activity_with_recommendation("a1").await.unwrap();

    assert_eq!(
        routes(&log),
        vec![
            "DELETE /activities/a1".to_owned(),
            "DELETE /recommendations/activity?activityId=a1".to_owned(),
        ]
    );
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .all(|seen| seen.user_id.as_deref() == Some("user-123")));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    init_test_logging();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api =
        ActivityApiClient::from_base_url(&format!("http://{addr}/api"), signed_in_session())
            .unwrap();

    let err = api.get_activities().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.code(), ErrorCode::ExternalServiceUnavailable);
}

#[test]
fn test_invalid_base_url() {
    let err = ActivityApiClient::from_base_url("not a url", signed_in_session()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl(_)));
}
