//! End-to-end checks of the reqwest transport against a local fake API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use foodhub::config::ClientConfig;
use foodhub::net::{HttpTransport, PACKAGE_NAME_HEADER};
use foodhub::repository::{AuthRepository, DataRepository};
use foodhub::session::{SessionManager, UserRole};
use foodhub::store::MemoryStore;
use foodhub::{AppContext, ClientError};
use serde_json::{Value, json};

const APP_ID: &str = "com.example.fooddeliveryapp.rider";

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn login(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.headers.lock().unwrap().push(headers);
    seen.bodies.lock().unwrap().push(body.clone());
    if body["password"] == "right" {
        (
            StatusCode::OK,
            Json(json!({
                "accessToken": "srv-token",
                "user": { "id": "u1", "name": "Rita", "email": "rita@example.com", "userType": "rider" }
            })),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad credentials" })))
    }
}

async fn signup(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.bodies.lock().unwrap().push(body);
    (StatusCode::CONFLICT, Json(json!({ "message": "email taken" })))
}

async fn oauth(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    (StatusCode::IM_A_TEAPOT, Json(json!({ "error": "provider offline" })))
}

async fn restaurants(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer srv-token");
    seen.headers.lock().unwrap().push(headers);
    seen.queries.lock().unwrap().push(query);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": [{
                "id": "r1", "ownerId": "o1", "name": "Pizza Palace", "address": "1 Main St",
                "categoryId": "1", "latitude": 40.71, "longitude": -74.0,
                "imageUrl": "https://img/r1.png", "createdAt": "2024-01-01T00:00:00Z",
                "distance": 0.02
            }]
        })),
    )
}

async fn spawn_api() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/oauth", post(oauth))
        .route("/restaurants", get(restaurants))
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/"), seen)
}

fn context(base_url: &str) -> AppContext {
    let config = ClientConfig {
        base_url: base_url.to_owned(),
        app_id: APP_ID.to_owned(),
        simulated_latency: false,
        ..ClientConfig::default()
    };
    let transport = HttpTransport::new(&config).unwrap();
    AppContext::with_parts(config, Arc::new(MemoryStore::new()), Arc::new(transport))
}

// =============================================================================
// auth
// =============================================================================

#[tokio::test]
async fn login_round_trip_sets_package_header_and_parses_aliases() {
    let (base_url, seen) = spawn_api().await;
    let ctx = context(&base_url);

    let auth = ctx.auth.login("rita@example.com", "right").await.unwrap();
    assert_eq!(auth.token, "srv-token");
    assert_eq!(auth.user.as_ref().unwrap().role, "rider");

    let headers = seen.headers.lock().unwrap();
    assert_eq!(headers[0].get(PACKAGE_NAME_HEADER).unwrap().to_str().unwrap(), APP_ID);
    assert!(headers[0].get("authorization").is_none());
    assert_eq!(seen.bodies.lock().unwrap()[0], json!({ "email": "rita@example.com", "password": "right" }));
}

#[tokio::test]
async fn login_401_maps_to_fixed_message() {
    let (base_url, _seen) = spawn_api().await;
    let ctx = context(&base_url);

    let err = ctx.auth.login("rita@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(err.to_string(), "Authentication failed");
}

#[tokio::test]
async fn signup_conflict_maps_to_user_exists() {
    let (base_url, seen) = spawn_api().await;
    let ctx = context(&base_url);

    let err = ctx
        .auth
        .signup("Rita", "rita@example.com", "secret1", UserRole::RestaurantOwner)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User already exists");
    assert_eq!(seen.bodies.lock().unwrap()[0]["role"], "owner");
}

#[tokio::test]
async fn oauth_unmapped_status_embeds_server_error() {
    let (base_url, _seen) = spawn_api().await;
    let ctx = context(&base_url);

    let err = ctx.auth.oauth_login("google", "gtok", UserRole::Customer).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(err.to_string(), "OAuth login failed: provider offline");
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig { base_url: format!("http://{addr}"), ..ClientConfig::default() };
    let auth = AuthRepository::new(Arc::new(HttpTransport::new(&config).unwrap()));
    let err = auth.login("a@b.co", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.to_string().starts_with("Network error: "));
}

// =============================================================================
// restaurants
// =============================================================================

#[tokio::test]
async fn login_then_restaurants_sends_bearer_and_location() {
    let (base_url, seen) = spawn_api().await;
    let ctx = context(&base_url);

    let auth = ctx.auth.login("rita@example.com", "right").await.unwrap();
    ctx.session.store_token(&auth.token).unwrap();
    ctx.session.store_user_data(auth.user.as_ref().unwrap());
    assert_eq!(ctx.session.current_role(), UserRole::Rider);

    let restaurants = ctx.data.get_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].distance, "2.2 km");

    let queries = seen.queries.lock().unwrap();
    assert_eq!(queries[0]["lat"], "40.712776");
    assert_eq!(queries[0]["lon"], "-74.005978");
    let headers = seen.headers.lock().unwrap();
    let package = headers.last().unwrap().get(PACKAGE_NAME_HEADER).unwrap();
    assert_eq!(package.to_str().unwrap(), APP_ID);
}

#[tokio::test]
async fn stale_token_reports_status_line() {
    let (base_url, _seen) = spawn_api().await;
    let config = ClientConfig { base_url: base_url.clone(), ..ClientConfig::default() };
    let transport = Arc::new(HttpTransport::new(&config).unwrap());
    let session = Arc::new(SessionManager::new(Arc::new(MemoryStore::new()), APP_ID));
    session.store_token("expired").unwrap();

    let data = DataRepository::new(transport, session);
    let err = data.get_restaurants_near(51.5, -0.12).await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(err.to_string(), "Failed to fetch restaurants: 401 Unauthorized");
}
