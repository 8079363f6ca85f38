use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod consulta;
pub mod error;
pub mod middleware;
pub mod operators;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    // Only lookups count against the per-client limit
    let consulta = Router::new()
        .route("/api/consulta", post(consulta::consultar))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ));

    Router::new()
        .merge(consulta)
        .route("/api/operadores", get(operators::list_operators))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
