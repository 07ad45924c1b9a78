use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::auth;
use super::dto::HealthResponse;
use super::posts;
use crate::config::AppConfig;
use crate::posts::{PostRepository, SiteBuilder};
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub posts: PostRepository,
    pub builder: SiteBuilder,
    pub config: AppConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            posts: PostRepository::new(config.content_dir.clone()),
            builder: SiteBuilder::new(config.site_dir.clone()),
            config,
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "scrivener is running",
        project: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

/// Browser access control. An explicit allow-list wins; without one,
/// development mode admits any localhost origin and production admits none.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = match &config.allowed_origins {
        Some(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        ),
        None if !config.environment.is_production() => {
            AllowOrigin::predicate(|origin: &HeaderValue, _| {
                origin.to_str().is_ok_and(|o| {
                    o.starts_with("http://localhost:") || o.starts_with("http://127.0.0.1:")
                })
            })
        }
        None => AllowOrigin::list([]),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/token", post(auth::login))
        .route(
            "/api/admin/posts",
            get(posts::list_posts).post(posts::create_post),
        )
        .route(
            "/api/admin/posts/{slug}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .layer(cors_layer(&state.config))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
