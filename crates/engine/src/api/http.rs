//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::ports::{MapListItem, MapRecord};
use crate::use_cases::{MapCreateRequest, MapServiceError, MapUpdateRequest};

/// Create all HTTP routes.
///
/// The literal `/campaign/{campaignSeed}` route must be registered before
/// the generic `/{campaignSeed}/{zoneId}` pattern so it is not shadowed by
/// the path parameters.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/maps/campaign/{campaign_seed}", get(list_campaign_maps))
        .route("/api/maps/{campaign_seed}/{zone_id}", get(get_map))
        .route("/api/maps", post(create_map))
        .route("/api/maps/{id}", put(update_map))
}

async fn health() -> &'static str {
    "OK"
}

async fn list_campaign_maps(
    State(app): State<Arc<App>>,
    Path(campaign_seed): Path<String>,
) -> Result<Json<Vec<MapListItem>>, ApiError> {
    let maps = app.maps.list_campaign_maps(&campaign_seed).await?;
    Ok(Json(maps))
}

async fn get_map(
    State(app): State<Arc<App>>,
    Path((campaign_seed, zone_id)): Path<(String, String)>,
) -> Result<Json<MapRecord>, ApiError> {
    let map = app
        .maps
        .load_map(&campaign_seed, &zone_id)
        .await?
        .ok_or(ApiError::from(MapServiceError::NotFound))?;
    Ok(Json(map))
}

async fn create_map(
    State(app): State<Arc<App>>,
    Json(body): Json<MapCreateRequest>,
) -> Result<(StatusCode, Json<MapRecord>), ApiError> {
    let map = app.maps.save_map(body).await?;
    Ok((StatusCode::CREATED, Json(map)))
}

async fn update_map(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(body): Json<MapUpdateRequest>,
) -> Result<Json<MapRecord>, ApiError> {
    let map = app.maps.update_map_by_id(&id, body).await?;
    Ok(Json(map))
}

/// API error: HTTP status plus a `{error, code}` JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: u16,
    message: String,
    code: String,
}

impl From<MapServiceError> for ApiError {
    fn from(err: MapServiceError) -> Self {
        Self {
            status: err.status(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(serde_json::json!({
            "error": self.message,
            "code": self.code,
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::clock::SystemRandom;
    use crate::infrastructure::sqlite::SqliteMapRepo;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        let clock = Arc::new(SystemClock::new());
        let repo = SqliteMapRepo::new(pool, clock.clone()).await.expect("schema");
        let app = Arc::new(App::new(repo_arc(repo), clock, Arc::new(SystemRandom::new())));
        routes().with_state(app)
    }

    fn repo_arc(repo: SqliteMapRepo) -> Arc<dyn crate::infrastructure::ports::MapRepo> {
        Arc::new(repo)
    }

    fn create_body() -> Value {
        json!({
            "campaignSeed": "camp-1",
            "zoneId": "zone-a",
            "zoneType": "town",
            "width": 2,
            "height": 1,
            "tiles": [[
                { "x": 0, "y": 0, "biome": "town" },
                { "x": 1, "y": 0, "biome": "town" }
            ]],
            "spawnPoint": { "x": 0, "y": 0 }
        })
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, value)
    }

    fn post_map(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/maps")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let router = test_router().await;
        let (status, body) = send(
            router,
            Request::builder().uri("/api/health").body(Body::empty()).expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("OK".to_string()));
    }

    #[tokio::test]
    async fn create_then_get_map() {
        let router = test_router().await;

        let (status, created) = send(router.clone(), post_map(&create_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["zoneId"], "zone-a");
        assert_eq!(created["zoneType"], "town");

        let (status, fetched) = send(
            router,
            Request::builder()
                .uri("/api/maps/camp-1/zone-a")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], created["id"]);
    }

    #[tokio::test]
    async fn duplicate_create_is_a_409_with_error_body() {
        let router = test_router().await;
        let (status, _) = send(router.clone(), post_map(&create_body())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(router, post_map(&create_body())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "unique_violation");
        assert_eq!(body["error"], "Map already exists for this campaignSeed and zoneId");
    }

    #[tokio::test]
    async fn validation_failure_is_a_400_with_error_body() {
        let router = test_router().await;
        let mut body = create_body();
        body["zoneType"] = json!("swamp");

        let (status, response) = send(router, post_map(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["code"], "validation_error");
    }

    #[tokio::test]
    async fn absent_map_is_a_404() {
        let router = test_router().await;
        let (status, body) = send(
            router,
            Request::builder()
                .uri("/api/maps/camp-1/nowhere")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn campaign_listing_is_not_shadowed_by_the_zone_route() {
        let router = test_router().await;

        // If the generic /{campaignSeed}/{zoneId} pattern matched first,
        // this would parse as campaignSeed="campaign" and yield a 404.
        let (status, body) = send(
            router,
            Request::builder()
                .uri("/api/maps/campaign/empty-campaign")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn listing_omits_tiles() {
        let router = test_router().await;
        let (status, _) = send(router.clone(), post_map(&create_body())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            router,
            Request::builder()
                .uri("/api/maps/campaign/camp-1")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["zoneId"], "zone-a");
        assert!(body[0].get("tiles").is_none());
    }

    #[tokio::test]
    async fn update_route_patches_a_map() {
        let router = test_router().await;
        let (_, created) = send(router.clone(), post_map(&create_body())).await;
        let id = created["id"].as_str().expect("id").to_string();

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/maps/{id}"))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "spawnPoint": { "x": 1, "y": 0 } }).to_string()))
            .expect("request");
        let (status, updated) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["spawnPoint"], json!({ "x": 1, "y": 0 }));
    }
}
