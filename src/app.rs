use axum::extract::DefaultBodyLimit;
use axum::Router;
use crate::state::AppState;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn create_app(state: AppState) -> Router {
    // Multipart bodies must get past the extractor limit so oversized
    // posters reach the poster size check.
    let body_limit = DefaultBodyLimit::max(state.config.max_request_body);

    crate::routes::configure_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(body_limit),
        )
        .with_state(state)
}
