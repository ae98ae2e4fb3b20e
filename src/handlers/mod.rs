pub mod assistants;
pub mod auth;
pub mod calls;
pub mod catalog;
pub mod connectivity;
pub mod health;
pub mod pages;
pub mod phone_numbers;
pub mod users;
pub mod verification;
pub mod wizard;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::session;
use crate::state::AppState;

/// Builds the console router. Everything that needs the upstream sits behind
/// the offline guard. Health, login page, logout, token verification, catalog
/// and connectivity stay reachable while offline.
pub fn create_router(state: Arc<AppState>) -> Router {
    let guarded = Router::new()
        .route("/", get(pages::console_page))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::current_user))
        .route(
            "/api/auth/profile",
            get(auth::profile).put(auth::update_profile),
        )
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/approved", get(users::approved_users))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/users/:id/approval", patch(users::set_approval))
        .route("/api/users/:id/bearer-token", patch(users::set_bearer_token))
        .route("/api/users/:id/minutes", post(users::add_minutes))
        .route("/api/assistants", get(assistants::list_assistants))
        .route(
            "/api/assistants/:id",
            get(assistants::get_assistant)
                .put(assistants::update_assistant)
                .delete(assistants::delete_assistant),
        )
        .route("/api/assistants/:id/status", patch(assistants::set_status))
        .route("/api/wizard", post(wizard::start))
        .route(
            "/api/wizard/:id",
            get(wizard::show).patch(wizard::patch).delete(wizard::discard),
        )
        .route("/api/wizard/:id/next", post(wizard::next))
        .route("/api/wizard/:id/previous", post(wizard::previous))
        .route("/api/wizard/:id/submit", post(wizard::submit))
        .route("/api/phone-numbers", get(phone_numbers::list_numbers))
        .route(
            "/api/phone-numbers/available",
            get(phone_numbers::search_available),
        )
        .route("/api/phone-numbers/purchase", post(phone_numbers::purchase))
        .route("/api/phone-numbers/:id", axum::routing::delete(phone_numbers::release))
        .route("/api/phone-numbers/:id/assign", post(phone_numbers::assign))
        .route("/api/phone-numbers/:id/unassign", post(phone_numbers::unassign))
        .route("/api/phone-numbers/:id/renew", post(phone_numbers::renew))
        .route("/api/calls", get(calls::list_calls))
        .route("/api/calls/sample", post(calls::sample_call))
        .route("/api/calls/:id", get(calls::get_call))
        .route("/api/verification/send", post(verification::send_code))
        .route("/api/verification/verify", post(verification::verify_code))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            connectivity::offline_guard,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/login", get(pages::login_page))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/catalog", get(catalog::get_catalog))
        .route(
            "/api/forms/password-strength",
            post(catalog::check_password_strength),
        )
        .route("/api/connectivity", get(connectivity::get_status))
        .route("/api/connectivity/events", get(connectivity::events_stream))
        .merge(guarded)
        .layer(middleware::from_fn(session::expire_on_unauthorized))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
