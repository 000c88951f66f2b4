//! Cookie middleware attaching a [`SessionId`] to every request.

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use super::SessionId;
use crate::app_state::AppState;

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "tagnotes_session";

/// Resolves the session id from the request cookie, minting one when the
/// cookie is missing or malformed, and inserts it into request extensions.
///
/// A minted id is sent back with `Set-Cookie` so the browser keeps it.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let (session_id, minted) = match session_from_headers(request.headers()) {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };
    request.extensions_mut().insert(session_id);

    let mut response = next.run(request).await;

    if minted {
        let mut cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        if state.cookie_secure {
            cookie.push_str("; Secure");
        }
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "session cookie not representable"),
        }
        tracing::debug!(%session_id, "session started");
    }
    response
}

/// Extracts a well-formed session id from the `Cookie` headers.
#[must_use]
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(cookie) {
            headers.insert(COOKIE, value);
        }
        headers
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let id = SessionId::new();
        let found = session_from_headers(&headers(&format!(
            "theme=dark; {SESSION_COOKIE}={id}; lang=en"
        )));
        assert_eq!(found, Some(id));
    }

    #[test]
    fn malformed_or_missing_cookie_yields_none() {
        assert_eq!(session_from_headers(&HeaderMap::new()), None);
        assert_eq!(
            session_from_headers(&headers(&format!("{SESSION_COOKIE}=garbage"))),
            None
        );
    }
}
