//! HTTP fallback integration tests.
//!
//! Serves small axum stub backends on 127.0.0.1 and drives the real
//! reqwest-backed shim against them.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;

use cellar_client::{ClientConfig, ClientError, DataAccessShim, FallbackReason};
use cellar_core::{fixtures, Money, NewWine, Wine, WinePatch, WineType};

/// Bind to port 0 and return the base URL.
async fn start_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A port nothing is listening on.
async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn shim(base_url: &str, probe_timeout_ms: u64) -> DataAccessShim {
    let mut config = ClientConfig::with_base_url(base_url);
    config.backend.probe_timeout_ms = probe_timeout_ms;
    DataAccessShim::from_config(&config).unwrap()
}

fn tignanello() -> NewWine {
    NewWine {
        name: "Tignanello".to_string(),
        producer: "Antinori".to_string(),
        country: "Italy".to_string(),
        region: "Tuscany".to_string(),
        vintage_year: 2019,
        wine_type: WineType::Still,
        bottle_size_ml: 750,
        glasses_per_bottle: 5,
        alcohol_content: 14.0,
        price_bottle: Money::from_cents(12000),
        price_glass: Money::from_cents(900),
        description: String::new(),
    }
}

async fn one_wine() -> Json<Vec<Wine>> {
    Json(fixtures::wines().into_iter().take(1).collect())
}

#[tokio::test]
async fn healthy_backend_serves_remotely() {
    let app = Router::new()
        .route("/api/wines", get(one_wine).post(|Json(new): Json<NewWine>| async move {
            Json(Wine::from_new(500, new))
        }));
    let base = start_stub(app).await;
    let shim = shim(&base, 2000);

    assert!(shim.is_backend_available().await);

    let wines = shim.get_wines().await.unwrap();
    assert!(!wines.used_fallback());
    assert_eq!(wines.value.len(), 1);

    let created = shim.create_wine(tignanello()).await.unwrap();
    assert!(!created.used_fallback());
    assert_eq!(created.value.id, 500);
    assert_eq!(created.value.name, "Tignanello");

    // The local store was never written.
    assert_eq!(shim.store().wines().list().await.len(), 7);
}

#[tokio::test]
async fn server_error_falls_back_with_cause() {
    let app = Router::new()
        .route("/api/wines", get(one_wine).post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/wines/{id}", put(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base = start_stub(app).await;
    let shim = shim(&base, 2000);

    let created = shim.create_wine(tignanello()).await.unwrap();
    assert_eq!(created.value.id, 8);
    match created.fallback {
        Some(FallbackReason::RemoteFailed(ClientError::Http { method, ref path, status })) => {
            assert_eq!(method, "POST");
            assert_eq!(path, "/api/wines");
            assert_eq!(status, 500);
        }
        ref other => panic!("unexpected fallback: {other:?}"),
    }

    let err = shim.update_wine(999, &WinePatch::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Wine not found");
}

#[tokio::test]
async fn unreadable_body_falls_back() {
    let app = Router::new()
        .route("/api/wines", get(one_wine))
        .route("/api/sales", get(|| async { "definitely not json" }));
    let base = start_stub(app).await;
    let shim = shim(&base, 2000);

    let sales = shim.get_sales().await.unwrap();
    assert_eq!(sales.value, fixtures::sales());
    assert!(matches!(sales.cause(), Some(ClientError::Decode(_))));
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let base = closed_port().await;
    let shim = shim(&base, 2000);

    assert!(!shim.is_backend_available().await);

    let inventory = shim.get_inventory().await.unwrap();
    assert_eq!(inventory.value, fixtures::inventory());
    assert!(matches!(
        inventory.fallback,
        Some(FallbackReason::Unreachable(ClientError::Request(_)))
    ));
}

#[tokio::test]
async fn slow_probe_times_out() {
    let app = Router::new().route(
        "/api/wines",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }),
    );
    let base = start_stub(app).await;
    let shim = shim(&base, 200);

    let started = std::time::Instant::now();
    let wines = shim.get_wines().await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(wines.value.len(), 7);
    assert!(matches!(
        wines.fallback,
        Some(FallbackReason::Unreachable(ClientError::ProbeTimeout(200)))
    ));
}

#[tokio::test]
async fn non_200_probe_is_unreachable() {
    // 201 is a success, but the probe wants exactly 200.
    let app = Router::new().route(
        "/api/wines",
        get(|| async { (StatusCode::CREATED, Json(json!([]))) }),
    );
    let base = start_stub(app).await;
    let shim = shim(&base, 2000);

    assert!(!shim.is_backend_available().await);

    let wines = shim.get_wines().await.unwrap();
    assert!(matches!(
        wines.fallback,
        Some(FallbackReason::Unreachable(ClientError::ProbeRejected(201)))
    ));
}

#[tokio::test]
async fn availability_is_checked_per_call() {
    let base = closed_port().await;
    let shim = shim(&base, 2000);

    for _ in 0..2 {
        let outcome = shim.delete_wine(1).await.unwrap();
        assert!(outcome.used_fallback());
    }
    assert_eq!(shim.get_wines().await.unwrap().value.len(), 6);
}
