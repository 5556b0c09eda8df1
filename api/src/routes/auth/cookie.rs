//! Refresh token cookie handling
//!
//! The refresh token is only ever handed to the browser as an HttpOnly cookie
//! scoped to the auth endpoints.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use gk_shared::CookieConfig;

use crate::dto::RefreshTokenRequest;

fn same_site(config: &CookieConfig) -> SameSite {
    match config.same_site.as_str() {
        "Lax" => SameSite::Lax,
        "None" => SameSite::None,
        _ => SameSite::Strict,
    }
}

/// Cookie carrying a freshly issued refresh token
pub fn refresh_cookie(config: &CookieConfig, token: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(config.name.clone(), token.to_string())
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .path(config.path.clone())
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Cookie that makes the browser drop the refresh token
pub fn expired_refresh_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build(config.name.clone(), String::new())
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .path(config.path.clone())
        .max_age(Duration::ZERO)
        .finish()
}

/// Refresh token from the cookie, falling back to the JSON body
pub fn read_refresh_token(
    req: &HttpRequest,
    config: &CookieConfig,
    body: Option<RefreshTokenRequest>,
) -> Option<String> {
    req.cookie(&config.name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| body.and_then(|b| b.refresh_token))
        .filter(|v| !v.trim().is_empty())
}
