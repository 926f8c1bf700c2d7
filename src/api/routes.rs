//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    collection_handler, create_comment_handler, fallback_handler, item_handler, welcome_handler,
    AppState,
};
use crate::resolver::ResourceKind;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/` - Welcome message
/// - `GET /api/{kind}` and `GET /api/{kind}/:id` - Cached catalog lookup for
///   films, locations, species and vehicles
/// - `GET /api/people/:id` - Cached person lookup (id required)
/// - `POST /api/comments` - Store a comment
///
/// Any other path outside `/api` is redirected to `/api/`.
///
/// # Middleware
/// - CORS: Allows any origin, method and header
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api", get(welcome_handler))
        .route("/api/", get(welcome_handler))
        .route("/api/comments", post(create_comment_handler));

    for kind in ResourceKind::ALL {
        if !kind.id_required() {
            let collection = move |state: State<AppState>| collection_handler(state, kind);
            router = router.route(&format!("/api/{}", kind), get(collection));
        }

        let item = move |state: State<AppState>,
                         id: Result<Path<String>, PathRejection>| {
            item_handler(state, kind, id)
        };
        router = router.route(&format!("/api/{}/:id", kind), get(item));
    }

    router
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
