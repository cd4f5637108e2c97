use crate::server::{ServerError, SessionConfig};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use inkwell_common::model::{
    auth::{AuthToken, Authentication},
    user::User,
};
use inkwell_db::client::DbClient;
use std::sync::Arc;
use time::UtcDateTime;
use tracing::debug;

pub const SESSION_COOKIE: &str = "inkwell_session";

/// The logged-in user, if any. Never rejects a request for being anonymous.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct CurrentUser(pub Option<User>);

/// A request that must come from a logged-in user. Anonymous requests are
/// redirected to the login page.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct AuthenticatedUser(pub User);

fn session_token(jar: &CookieJar) -> Option<AuthToken> {
    let cookie = jar.get(SESSION_COOKIE)?;
    match cookie.value().parse() {
        Ok(token) => Some(token),
        Err(err) => {
            debug!(error = %err, "Ignoring malformed session cookie");
            None
        }
    }
}

async fn session_user(jar: &CookieJar, db: &DbClient) -> Result<Option<User>, ServerError> {
    let Some(token) = session_token(jar) else {
        return Ok(None);
    };

    let token_hash = token.hash()?;
    let Some(authentication) = db.fetch_auth(&token_hash).await? else {
        debug!(user_id = %token.user_id, "Session cookie does not match any session");
        return Ok(None);
    };

    if authentication.user != token.user_id || authentication.is_expired_at(UtcDateTime::now()) {
        debug!(user_id = %token.user_id, "Session expired or belongs to someone else");
        return Ok(None);
    }

    Ok(db.fetch_user(authentication.user).await?)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<DbClient>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let db = Arc::<DbClient>::from_ref(state);

        Ok(Self(session_user(&jar, &db).await?))
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<DbClient>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        user.map(Self).ok_or_else(|| ServerError::LoginRequired {
            next: parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_owned(), |path| path.as_str().to_owned()),
        })
    }
}

/// Starts a session for `user` and adds its cookie to `jar`.
pub async fn log_in(
    jar: CookieJar,
    db: &DbClient,
    sessions: SessionConfig,
    user: &User,
) -> Result<CookieJar, ServerError> {
    let token = AuthToken::generate_random(user.id);
    let authentication = Authentication {
        user: user.id,
        token_hash: token.hash()?,
        created_at: UtcDateTime::now(),
        expires_after: sessions.lifetime,
    };
    db.create_auth(&authentication).await?;

    let mut cookie = Cookie::build((SESSION_COOKIE, token.as_token_str()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    if let Some(lifetime) = sessions.lifetime {
        cookie = cookie.max_age(lifetime.get());
    }

    debug!(user_id = %user.id, username = %user.username, "Logged in");
    Ok(jar.add(cookie))
}

/// Ends the session named by the cookie in `jar`, if there is one.
pub async fn log_out(jar: CookieJar, db: &DbClient) -> Result<CookieJar, ServerError> {
    if let Some(token) = session_token(&jar) {
        db.delete_auth(&token.hash()?).await?;
        debug!(user_id = %token.user_id, "Logged out");
    }

    Ok(jar.remove(Cookie::build(SESSION_COOKIE).path("/")))
}

/// `next` if it is a path on this site, otherwise the front page.
pub fn local_redirect_target(next: Option<&str>) -> &str {
    match next {
        Some(next)
            if next.starts_with('/')
                && !next.starts_with("//")
                && !next.contains('\\')
                && next.is_ascii()
                && !next.chars().any(char::is_control) =>
        {
            next
        }
        _ => "/",
    }
}
