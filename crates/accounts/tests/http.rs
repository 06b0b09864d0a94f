// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2025 Rulesdesk Developers. All rights reserved.
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Integration tests for the accounts HTTP client using a mock backend.

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
};
use rstest::rstest;
use rulesdesk_accounts::{
    common::enums::MarketType,
    config::AccountsClientConfig,
    http::{
        auth::LoginService, brokers::BrokerService, client::AccountsHttpClient,
        error::AccountsHttpError, models::LoginUserDtoBuilder,
    },
};
use rulesdesk_common::store::{InMemoryKeyValueStore, KeyValueStore};
use serde_json::{Value, json};
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
struct RecordedRequest {
    path: String,
    headers: HashMap<String, String>,
    query: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct TestServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    ip_lookups: Arc<Mutex<usize>>,
}

impl TestServerState {
    async fn record(&self, uri: &Uri, headers: &HeaderMap, query: HashMap<String, String>) {
        let headers = headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        self.requests.lock().await.push(RecordedRequest {
            path: uri.path().to_string(),
            headers,
            query,
        });
    }

    async fn last(&self) -> RecordedRequest {
        self.requests
            .lock()
            .await
            .last()
            .cloned()
            .expect("a request should have been recorded")
    }

    async fn count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

fn load_test_data(filename: &str) -> Value {
    let path = format!("test_data/{filename}");
    let content = std::fs::read_to_string(path).expect("Failed to read test data");
    serde_json::from_str(&content).expect("Failed to parse test data")
}

async fn handle_send_otp(
    State(state): State<TestServerState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    state.record(&uri, &headers, query).await;

    let contact = body
        .get("email")
        .or_else(|| body.get("mobile"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if contact.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(load_test_data("http_error_validation.json")),
        )
            .into_response();
    }

    Json(load_test_data("http_post_send_otp.json")).into_response()
}

async fn handle_verify_otp(
    State(state): State<TestServerState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    state.record(&uri, &headers, query).await;

    if body.get("otp").and_then(Value::as_str) != Some("123456") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid OTP", "statusCode": 401 })),
        )
            .into_response();
    }

    Json(load_test_data("http_post_send_otp.json")).into_response()
}

async fn handle_login(
    State(state): State<TestServerState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    state.record(&uri, &headers, query).await;

    if body.get("password").and_then(Value::as_str) == Some("wrong") {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "Invalid credentials", "data": {} })),
        )
            .into_response();
    }

    Json(load_test_data("http_post_login.json")).into_response()
}

async fn handle_broker_details(
    State(state): State<TestServerState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let market_type = query.get("marketType").cloned();
    state.record(&uri, &headers, query).await;

    match market_type.as_deref() {
        Some("crypto" | "india") => {
            Json(load_test_data("http_get_broker_details.json")).into_response()
        }
        Some(_) => Json(json!({ "success": true, "data": [] })).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "marketType is required", "statusCode": 400 })),
        )
            .into_response(),
    }
}

async fn handle_trading_rules(
    State(state): State<TestServerState>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(&uri, &headers, query).await;

    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Broker account not found", "statusCode": 404 })),
        )
            .into_response();
    }

    Json(load_test_data("http_get_trading_rules.json")).into_response()
}

async fn handle_server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable").into_response()
}

async fn handle_ip(State(state): State<TestServerState>) -> impl IntoResponse {
    *state.ip_lookups.lock().await += 1;
    Json(json!({ "ip": "203.0.113.7" }))
}

async fn handle_put_profile(
    State(state): State<TestServerState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    state.record(&uri, &headers, query).await;
    Json(json!({
        "success": true,
        "message": "Profile updated",
        "data": body,
        "status": 200,
        "statusCode": "200"
    }))
    .into_response()
}

async fn handle_delete_profile(
    State(state): State<TestServerState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(&uri, &headers, query).await;
    StatusCode::NO_CONTENT.into_response()
}

async fn handle_delete_session(Path(id): Path<String>) -> Response {
    Json(json!({
        "success": "true",
        "message": null,
        "data": { "message": format!("Session {id} closed") }
    }))
    .into_response()
}

async fn handle_loose_envelope(Path(shape): Path<String>) -> Response {
    let body = match shape.as_str() {
        "numeric-status" => json!({ "success": true, "status": 200, "data": [1] }),
        "null-success" => json!({ "success": null, "status": "OK", "data": [1] }),
        _ => json!({ "data": [1], "statusCode": 200 }),
    };
    Json(body).into_response()
}

fn create_test_router(state: TestServerState) -> Router {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/login/verify-email", post(handle_send_otp))
        .route("/auth/login/verify-mobile", post(handle_send_otp))
        .route("/auth/login/verify-otp-email", post(handle_verify_otp))
        .route("/auth/login/verify-otp-mobile", post(handle_verify_otp))
        .route("/brokerAccount/broker-details", get(handle_broker_details))
        .route("/brokerAccount/trading-rules/{id}", get(handle_trading_rules))
        .route("/status/500", get(handle_server_error))
        .route(
            "/profile",
            put(handle_put_profile).delete(handle_delete_profile),
        )
        .route("/sessions/{id}", delete(handle_delete_session))
        .route("/loose/{shape}", get(handle_loose_envelope))
        .route("/ip", get(handle_ip))
        .route("/ip-broken", get(handle_server_error))
        .with_state(state)
}

async fn start_test_server() -> (SocketAddr, TestServerState) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = TestServerState::default();
    let router = create_test_router(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    (addr, state)
}

fn create_client(addr: SocketAddr, store: Arc<dyn KeyValueStore>) -> AccountsHttpClient {
    let config = AccountsClientConfig::with_base_url(format!("http://{addr}"));
    AccountsHttpClient::new(&config, store).unwrap()
}

#[rstest]
#[tokio::test]
async fn test_request_carries_context_headers_and_params() {
    let (addr, state) = start_test_server().await;
    let service = LoginService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    service.send_otp_email("trader@example.com").await.unwrap();

    let request = state.last().await;
    assert_eq!(request.path, "/auth/login/verify-email");
    assert_eq!(request.headers.get("accept-language").unwrap(), "en");
    assert!(!request.headers.contains_key("authorization"));

    let timestamp = request.headers.get("x-request-timestamp").unwrap();
    assert_eq!(timestamp.len(), 24);
    assert!(timestamp.ends_with('Z'));
    assert_eq!(request.query.get("timestamp"), Some(timestamp));

    assert_eq!(request.headers.get("x-client-ip").unwrap(), "unknown");
    assert_eq!(request.query.get("clientIp").unwrap(), "unknown");
}

#[rstest]
#[tokio::test]
async fn test_send_otp_mobile() {
    let (addr, state) = start_test_server().await;
    let service = LoginService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    let response = service.send_otp_mobile("+919800000000").await.unwrap();

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("OTP sent"));
    assert_eq!(state.last().await.path, "/auth/login/verify-mobile");
}

#[rstest]
#[tokio::test]
async fn test_verify_otp_email_and_mobile() {
    let (addr, state) = start_test_server().await;
    let service = LoginService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    service
        .verify_otp_email("trader@example.com", "123456")
        .await
        .unwrap();
    service
        .verify_otp_mobile("+919800000000", "123456")
        .await
        .unwrap();

    assert_eq!(state.count().await, 2);
    assert_eq!(state.last().await.path, "/auth/login/verify-otp-mobile");
}

#[rstest]
#[tokio::test]
async fn test_backend_message_becomes_error() {
    let (addr, _state) = start_test_server().await;
    let service = LoginService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    let error = service
        .verify_otp_email("trader@example.com", "000000")
        .await
        .unwrap_err();

    assert!(matches!(
        &error,
        AccountsHttpError::Api { status: 401, message } if message == "Invalid OTP"
    ));
    assert_eq!(error.to_string(), "Invalid OTP");
}

#[rstest]
#[tokio::test]
async fn test_validation_messages_are_joined() {
    let (addr, _state) = start_test_server().await;
    let service = LoginService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    let error = service.send_otp_email("").await.unwrap_err();

    assert_eq!(error.status(), Some(400));
    assert_eq!(
        error.to_string(),
        "email must be an email, otp should not be empty"
    );
}

#[rstest]
#[tokio::test]
async fn test_status_without_message_uses_generic_error() {
    let (addr, _state) = start_test_server().await;
    let client = create_client(addr, Arc::new(InMemoryKeyValueStore::new()));

    let error = client.get::<Value>("status/500").await.unwrap_err();

    assert_eq!(error.status(), Some(500));
    assert_eq!(error.to_string(), "Request failed with status 500");
}

#[rstest]
#[tokio::test]
async fn test_login_persists_token_and_authorizes_next_request() {
    let (addr, state) = start_test_server().await;
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
    let client = create_client(addr, store.clone());
    let login = LoginService::new(client.clone());
    let brokers = BrokerService::new(client);

    let dto = LoginUserDtoBuilder::default()
        .email("trader@example.com")
        .otp("123456")
        .build()
        .unwrap();
    let response = login.login(&dto).await.unwrap();

    let token = response.data.unwrap().access_token.unwrap();
    assert_eq!(store.get("accessToken"), Some(token.clone()));
    assert_eq!(login.get_access_token(), Some(token.clone()));

    brokers
        .get_broker_details(MarketType::Crypto.as_ref())
        .await
        .unwrap();

    let request = state.last().await;
    assert_eq!(
        request.headers.get("authorization").unwrap(),
        &format!("Bearer {token}")
    );
}

#[rstest]
#[tokio::test]
async fn test_login_without_token_leaves_store_untouched() {
    let (addr, _state) = start_test_server().await;
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
    let login = LoginService::new(create_client(addr, store.clone()));

    let dto = LoginUserDtoBuilder::default()
        .email("trader@example.com")
        .password("wrong")
        .build()
        .unwrap();
    let response = login.login(&dto).await.unwrap();

    assert!(!response.success);
    assert_eq!(store.get("accessToken"), None);
}

#[rstest]
#[tokio::test]
async fn test_cleared_token_is_not_sent() {
    let (addr, state) = start_test_server().await;
    let login = LoginService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));
    login.set_access_token("stale-token").unwrap();

    login.clear_access_token().unwrap();
    login.send_otp_email("trader@example.com").await.unwrap();

    assert!(!state.last().await.headers.contains_key("authorization"));
}

#[rstest]
#[tokio::test]
async fn test_get_broker_details() {
    let (addr, state) = start_test_server().await;
    let service = BrokerService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    let response = service.get_broker_details("crypto").await.unwrap();

    let accounts = response.data.unwrap();
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[2].broker_name, "Upstox");

    let request = state.last().await;
    assert_eq!(request.path, "/brokerAccount/broker-details");
    assert_eq!(request.query.get("marketType").unwrap(), "crypto");
    assert!(request.query.contains_key("timestamp"));
    assert!(request.query.contains_key("clientIp"));
}

#[rstest]
#[tokio::test]
async fn test_get_trading_rules() {
    let (addr, state) = start_test_server().await;
    let service = BrokerService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    let response = service
        .get_trading_rules("665f1c2a9b1e8a0012ab0002")
        .await
        .unwrap();

    let rules = response.data.unwrap();
    assert_eq!(rules.cash, vec!["minQty: 10", "maxOrderValue: 500000"]);
    assert_eq!(rules.future, vec!["maxLots: 20", "hedgingOnly"]);
    assert_eq!(
        state.last().await.path,
        "/brokerAccount/trading-rules/665f1c2a9b1e8a0012ab0002"
    );
}

#[rstest]
#[tokio::test]
async fn test_get_trading_rules_not_found() {
    let (addr, _state) = start_test_server().await;
    let service = BrokerService::new(create_client(addr, Arc::new(InMemoryKeyValueStore::new())));

    let error = service.get_trading_rules("missing").await.unwrap_err();

    assert_eq!(error.status(), Some(404));
    assert_eq!(error.to_string(), "Broker account not found");
}

#[rstest]
#[tokio::test]
async fn test_client_ip_resolved_and_attached() {
    let (addr, state) = start_test_server().await;
    let config = AccountsClientConfig {
        ip_lookup_url: format!("http://{addr}/ip"),
        resolve_client_ip: true,
        ..AccountsClientConfig::with_base_url(format!("http://{addr}"))
    };
    let client = AccountsHttpClient::new(&config, Arc::new(InMemoryKeyValueStore::new())).unwrap();
    assert_eq!(client.client_ip(), "unknown");

    let ip = client.resolve_client_ip().await;
    client.resolve_client_ip().await;
    LoginService::new(client.clone())
        .send_otp_email("trader@example.com")
        .await
        .unwrap();

    assert_eq!(ip, "203.0.113.7");
    assert_eq!(client.client_ip(), "203.0.113.7");
    assert_eq!(*state.ip_lookups.lock().await, 1);
    let request = state.last().await;
    assert_eq!(request.headers.get("x-client-ip").unwrap(), "203.0.113.7");
    assert_eq!(request.query.get("clientIp").unwrap(), "203.0.113.7");
}

#[rstest]
#[tokio::test]
async fn test_client_ip_lookup_failure_falls_back_to_unknown() {
    let (addr, _state) = start_test_server().await;
    let config = AccountsClientConfig {
        ip_lookup_url: format!("http://{addr}/ip-broken"),
        resolve_client_ip: true,
        ..AccountsClientConfig::with_base_url(format!("http://{addr}"))
    };
    let client = AccountsHttpClient::new(&config, Arc::new(InMemoryKeyValueStore::new())).unwrap();

    client.spawn_client_ip_resolution().await.unwrap();

    assert_eq!(client.client_ip(), "unknown");
}

#[rstest]
#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = create_client(addr, Arc::new(InMemoryKeyValueStore::new()));
    let error = client.get::<Value>("status/500").await.unwrap_err();

    assert!(matches!(error, AccountsHttpError::NetworkError(_)));
    assert_eq!(error.status(), None);
}

#[rstest]
#[tokio::test]
async fn test_new_client_resolves_ip_in_background() {
    let (addr, state) = start_test_server().await;
    let config = AccountsClientConfig {
        ip_lookup_url: format!("http://{addr}/ip"),
        resolve_client_ip: true,
        ..AccountsClientConfig::with_base_url(format!("http://{addr}"))
    };
    let client = AccountsHttpClient::new(&config, Arc::new(InMemoryKeyValueStore::new())).unwrap();

    for _ in 0..50 {
        if client.client_ip() != "unknown" {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }
    BrokerService::new(client.clone())
        .get_broker_details("crypto")
        .await
        .unwrap();

    assert_eq!(client.client_ip(), "203.0.113.7");
    assert_eq!(
        state.last().await.headers.get("x-client-ip").unwrap(),
        "203.0.113.7"
    );
    assert_eq!(*state.ip_lookups.lock().await, 1);
}

#[rstest]
#[tokio::test]
async fn test_login_without_token_keeps_earlier_token() {
    let (addr, _state) = start_test_server().await;
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
    let login = LoginService::new(create_client(addr, store.clone()));
    login.set_access_token("from-earlier-run").unwrap();

    let dto = LoginUserDtoBuilder::default()
        .email("trader@example.com")
        .password("wrong")
        .build()
        .unwrap();
    let response = login.login(&dto).await.unwrap();

    assert_eq!(response.session_token(), None);
    assert_eq!(store.get("accessToken").as_deref(), Some("from-earlier-run"));
}

#[rstest]
#[tokio::test]
async fn test_put_sends_json_body() {
    let (addr, state) = start_test_server().await;
    let client = create_client(addr, Arc::new(InMemoryKeyValueStore::new()));
    let body = json!({ "displayName": "Trader One" });

    let response = client.put::<Value, _>("profile", &body).await.unwrap();

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("Profile updated"));
    assert_eq!(response.data, Some(body));
    assert_eq!(response.status.as_deref(), Some("200"));
    assert_eq!(response.status_code, Some(200));

    let request = state.last().await;
    assert_eq!(request.path, "/profile");
    assert_eq!(request.headers.get("content-type").unwrap(), "application/json");
    assert!(request.query.contains_key("timestamp"));
}

#[rstest]
#[tokio::test]
async fn test_delete_no_content_yields_empty_envelope() {
    let (addr, state) = start_test_server().await;
    let client = create_client(addr, Arc::new(InMemoryKeyValueStore::new()));

    let response = client.delete::<Value>("profile").await.unwrap();

    assert!(!response.success);
    assert_eq!(response.data, None);
    assert_eq!(response.message, None);
    assert_eq!(state.last().await.path, "/profile");
}

#[rstest]
#[tokio::test]
async fn test_delete_with_body() {
    let (addr, _state) = start_test_server().await;
    let client = create_client(addr, Arc::new(InMemoryKeyValueStore::new()));

    let response = client.delete::<Value>("sessions/s-1").await.unwrap();

    assert!(response.success);
    assert_eq!(response.message, None);
    assert_eq!(response.data, Some(json!({ "message": "Session s-1 closed" })));
}

#[rstest]
#[case("numeric-status", true, Some("200"), None)]
#[case("null-success", false, Some("OK"), None)]
#[case("sparse", false, None, Some(200))]
#[tokio::test]
async fn test_loose_envelope_metadata_is_accepted(
    #[case] shape: &str,
    #[case] success: bool,
    #[case] status: Option<&str>,
    #[case] status_code: Option<u16>,
) {
    let (addr, _state) = start_test_server().await;
    let client = create_client(addr, Arc::new(InMemoryKeyValueStore::new()));

    let response = client
        .get::<Vec<u32>>(&format!("loose/{shape}"))
        .await
        .unwrap();

    assert_eq!(response.success, success);
    assert_eq!(response.status.as_deref(), status);
    assert_eq!(response.status_code, status_code);
    assert_eq!(response.data, Some(vec![1]));
}
