use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::foods::FoodStore;

pub mod foods;

/// Shared handler state. The store is injected rather than global so tests
/// can run isolated instances side by side.
#[derive(Clone)]
pub struct AppState {
    pub foods: Arc<dyn FoodStore>,
}

impl AppState {
    pub fn new(foods: Arc<dyn FoodStore>) -> Self {
        Self { foods }
    }
}

pub async fn index() -> &'static str {
    "Hello world!"
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: greeting, health and the `/foods/` CRUD routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public: Router<AppState> = Router::new()
        .route("/", get(index))
        .route("/health", get(health));

    let food_routes: Router<AppState> = Router::new()
        .route("/foods/", get(foods::list_foods).post(foods::create_food))
        .route(
            "/foods/:netid/",
            get(foods::get_food).post(foods::update_food).delete(foods::delete_food),
        );

    // Compose
    public
        .merge(food_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
