//! Cookie-backed admin session.
//!
//! `Session` is extracted per request and handed to handlers explicitly; it
//! is the only place that reads or writes the three session cookies.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tower_cookies::cookie::time::Duration as CookieDuration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::api::auth::LoginData;
use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "auth_token";
pub const REFRESH_COOKIE: &str = "refresh_token";
pub const USER_COOKIE: &str = "admin_user";
pub const SESSION_DAYS: i64 = 7;
pub const LOGIN_PATH: &str = "/login";
/// Browsers drop cookies past roughly 4 KiB including name and attributes.
pub const MAX_COOKIE_VALUE: usize = 3800;

/// Marker placed on responses whose upstream call came back 401.
#[derive(Debug, Clone, Copy)]
pub struct SessionExpired;

pub struct Session {
    cookies: Cookies,
    secure: bool,
}

impl Session {
    pub fn new(cookies: Cookies, secure: bool) -> Self {
        Self { cookies, secure }
    }

    pub fn token(&self) -> Option<String> {
        self.cookies
            .get(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Token for an upstream call; no cookie means no call.
    pub fn require_token(&self) -> Result<String, AppError> {
        self.token().ok_or(AppError::NotAuthenticated)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.cookies
            .get(REFRESH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn user(&self) -> Option<User> {
        let cookie = self.cookies.get(USER_COOKIE)?;
        decode_user(cookie.value())
    }

    /// Writes all three cookies after a successful login.
    pub fn persist(&self, login: &LoginData) {
        self.set(TOKEN_COOKIE, login.token.clone());
        if let Some(refresh) = &login.refresh_token {
            self.set(REFRESH_COOKIE, refresh.clone());
        }
        self.store_user(&login.user);
    }

    pub fn store_user(&self, user: &User) {
        match encode_user(user) {
            Ok(value) if value.len() <= MAX_COOKIE_VALUE => self.set(USER_COOKIE, value),
            Ok(value) => tracing::warn!(
                "profile cookie for {} is {} bytes, not stored",
                user.id,
                value.len()
            ),
            Err(e) => tracing::warn!("failed to serialize profile cookie: {e}"),
        }
    }

    pub fn clear(&self) {
        clear_cookies(&self.cookies);
    }

    fn set(&self, name: &'static str, value: String) {
        let cookie = Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .max_age(CookieDuration::days(SESSION_DAYS))
            .build();
        self.cookies.add(cookie);
    }
}

pub fn clear_cookies(cookies: &Cookies) {
    for name in [TOKEN_COOKIE, REFRESH_COOKIE, USER_COOKIE] {
        cookies.remove(Cookie::build(name).path("/").build());
    }
}

/// The provider bearer token never leaves the server.
fn encode_user(user: &User) -> Result<String, serde_json::Error> {
    let profile = User {
        bearer_token: None,
        ..user.clone()
    };
    let json = serde_json::to_vec(&profile)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_user(value: &str) -> Option<User> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        let app = Arc::<AppState>::from_ref(state);

        let forwarded_https = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("https"));

        Ok(Session::new(cookies, app.config.serves_https() || forwarded_https))
    }
}

pub fn wants_html(req: &Request) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}

/// Turns a `SessionExpired` response into a logout: cookies cleared, page
/// requests redirected to the login route. Runs once per response.
pub async fn expire_on_unauthorized(cookies: Cookies, req: Request, next: Next) -> Response {
    let html = wants_html(&req);
    let res = next.run(req).await;

    if res.extensions().get::<SessionExpired>().is_none() {
        return res;
    }

    tracing::info!("session expired, clearing cookies");
    clear_cookies(&cookies);
    if html {
        Redirect::to(LOGIN_PATH).into_response()
    } else {
        res
    }
}
