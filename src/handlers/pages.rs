use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::session::{Session, LOGIN_PATH};

static LOGIN_HTML: &str = include_str!("../web/login.html");
static CONSOLE_HTML: &str = include_str!("../web/console.html");
pub static OFFLINE_HTML: &str = include_str!("../web/offline.html");

// GET /login
pub async fn login_page(session: Session) -> Response {
    if session.token().is_some() {
        return Redirect::to("/").into_response();
    }
    Html(LOGIN_HTML).into_response()
}

// GET /
pub async fn console_page(session: Session) -> Response {
    if session.token().is_none() {
        return Redirect::to(LOGIN_PATH).into_response();
    }
    Html(CONSOLE_HTML).into_response()
}
