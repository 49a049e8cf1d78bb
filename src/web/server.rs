use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::power as power_handlers;
use super::api::satellite as satellite_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Satellite API endpoints
        .route("/api/satellite/pass", get(satellite_handlers::predict_pass))
        .route("/api/satellites", get(satellite_handlers::list_satellites))
        // Weather API endpoints
        .route("/api/nasa/power", get(power_handlers::daily_point))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let state = AppState::new(&config);
    log::info!("TLE source: {}", state.tle_source.label());

    let app = router(state);

    log::info!("Starting server on {}", config.web.bind);

    let listener = tokio::net::TcpListener::bind(&config.web.bind).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::path::PathBuf;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::test_support::serve_canned;
    use crate::web::config::{PowerConfig, TleConfig};

    fn config_with(tle: TleConfig) -> Config {
        Config {
            tle,
            power: PowerConfig {
                base_url: "http://127.0.0.1:9/point".into(),
                timeout: Duration::from_secs(2),
            },
            ..Config::default()
        }
    }

    fn fixture_app() -> Router {
        let config = config_with(TleConfig::Directory {
            folder: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
        });
        router(AppState::new(&config))
    }

    /// Any TLE fetch against this app fails with a 502.
    fn offline_app() -> Router {
        let config = config_with(TleConfig::Celestrak {
            url: "http://127.0.0.1:9/gp.php".into(),
            timeout: Duration::from_secs(2),
        });
        router(AppState::new(&config))
    }

    async fn fetch_json(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn pass_endpoint_returns_estimate() {
        let (status, cache, body) =
            fetch_json(fixture_app(), "/api/satellite/pass?lat=40.0&lon=-74.0&hours=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body["satellite"], "LANDSAT 8");
        assert_eq!(body["satellite_key"], "landsat8");
        assert_eq!(body["tle_source"], "Directory");
        assert_eq!(body["window_hours"], 1.0);
        assert!(body["approxClosestApproachUTC"].as_str().unwrap().ends_with('Z'));
        assert!(body["note"].as_str().unwrap().contains("approximation"));
    }

    #[tokio::test]
    async fn pass_endpoint_honours_window_and_satellite() {
        let (status, _, body) = fetch_json(
            fixture_app(),
            "/api/satellite/pass?lat=-33.9&lon=18.4&hours=0.25&sat=landsat9",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["satellite"], "LANDSAT 9");
        assert_eq!(body["norad_id"], 49260);
        assert_eq!(body["window_hours"], 0.25);

        let (status, _, body) =
            fetch_json(fixture_app(), "/api/satellite/pass?lat=10&lon=10&hours=500").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["window_hours"], 240.0);
    }

    #[tokio::test]
    async fn invalid_coordinates_fail_before_fetching() {
        for uri in [
            "/api/satellite/pass?lon=-74",
            "/api/satellite/pass?lat=40&lon=NaN",
            "/api/satellite/pass?lat=abc&lon=-74",
        ] {
            let (status, _, body) = fetch_json(offline_app(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["error"], "invalid_input");
            assert_eq!(body["message"], "lat/lon required");
        }
    }

    #[tokio::test]
    async fn unknown_satellite_is_rejected() {
        let (status, _, body) =
            fetch_json(offline_app(), "/api/satellite/pass?lat=40&lon=-74&sat=sentinel2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_input");
    }

    #[tokio::test]
    async fn unreachable_tle_source_is_bad_gateway() {
        let (status, _, body) = fetch_json(offline_app(), "/api/satellite/pass?lat=40&lon=-74").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "data_unavailable");
    }

    #[tokio::test]
    async fn tle_source_error_status_is_bad_gateway() {
        let base = serve_canned(
            StatusCode::SERVICE_UNAVAILABLE,
            "LANDSAT 8\n1 39084U 13008A   26290.50000000  .00000300  00000-0  76000-4 0  9990\n\
             2 39084  98.2000  70.0000 0001200  95.0000 265.1300 14.57100000999999\n",
        )
        .await;
        let app = router(AppState::new(&config_with(TleConfig::Celestrak {
            url: format!("{}/gp.php", base),
            timeout: Duration::from_secs(5),
        })));

        let (status, cache, body) = fetch_json(app, "/api/satellite/pass?lat=40&lon=-74").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(cache, None);
        assert_eq!(body["error"], "data_unavailable");
    }

    #[tokio::test]
    async fn lists_supported_satellites() {
        let (status, _, body) = fetch_json(offline_app(), "/api/satellites").await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["key"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, ["landsat8", "landsat9"]);
    }

    #[tokio::test]
    async fn power_endpoint_validates_input_and_reports_upstream_failure() {
        let (status, _, _) = fetch_json(offline_app(), "/api/nasa/power?lat=40").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) =
            fetch_json(offline_app(), "/api/nasa/power?lat=40&lon=-74&start=2024-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, body) = fetch_json(offline_app(), "/api/nasa/power?lat=40&lon=-74").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "upstream_error");
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let (status, _, body) = fetch_json(offline_app(), "/api-doc/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/satellite/pass"].is_object());
    }
}
