/**
 * Router Configuration
 *
 * Maps the HTTP surface onto handlers:
 *
 * ## Public
 *
 * - `GET /` - greeting
 * - `POST /register` - create an account (rate limited)
 * - `POST /login` - authenticate (rate limited)
 * - `GET /users/{username}` - public profile with links
 * - `GET /users/{username}/links` - public paginated link list
 *
 * ## Bearer-authenticated
 *
 * - `GET /links`, `POST /links`
 * - `GET /links/{id}`, `PUT /links/{id}`, `DELETE /links/{id}`
 * - `GET /me`, `PATCH /me`
 *
 * Authentication is not a router-level layer: the protected handlers
 * take the `CurrentUser` extractor, so the compiler, not the route
 * table, guarantees no protected handler runs without a resolved caller.
 * The rate limiters are route layers scoped to exactly one endpoint
 * each, with independent budgets.
 */

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};

use crate::auth::handlers::{get_me, get_user_profile, login, register, update_me};
use crate::links::handlers::{
    add_link, delete_user_link, edit_link, get_single_link, list_my_links, list_user_links,
};
use crate::middleware::rate_limit::rate_limit;
use crate::server::state::AppState;

/// Create the axum router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let register_route = Router::new()
        .route("/register", post(register))
        .route_layer(middleware::from_fn_with_state(
            state.register_limiter.clone(),
            rate_limit,
        ));

    let login_route = Router::new()
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(
            state.login_limiter.clone(),
            rate_limit,
        ));

    Router::new()
        .route("/", get(root_handler))
        .merge(register_route)
        .merge(login_route)
        .route("/users/{username}", get(get_user_profile))
        .route("/users/{username}/links", get(list_user_links))
        .route("/links", get(list_my_links).post(add_link))
        .route(
            "/links/{id}",
            get(get_single_link).put(edit_link).delete(delete_user_link),
        )
        .route("/me", get(get_me).patch(update_me))
        .fallback(|| async {
            (
                axum::http::StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "NOT_FOUND", "detail": "no such route" })),
            )
        })
        .with_state(state)
}

/// Greeting for the root path
async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "Hello": "World" }))
}
