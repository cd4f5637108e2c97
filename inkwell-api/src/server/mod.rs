use crate::server::{
    html::render_or_plain,
    media::{MAX_UPLOAD_BYTES, MediaError},
    templates::ErrorTemplate,
};
use axum::{
    Router,
    extract::{
        DefaultBodyLimit, FromRef, Request,
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use inkwell_common::{
    model::{
        Id,
        auth::{AuthTokenHashError, PasswordHashError},
        group::GroupSlug,
        post::PostMarker,
        user::{UserMarker, Username},
    },
    util::PositiveDuration,
};
use inkwell_db::client::{DbClient, DbError};
use std::sync::Arc;
use thiserror::Error;
use tower_http::services::ServeDir;
use tracing::{debug, error};

mod auth;
mod extract;
mod forms;
mod html;
mod media;
mod routes;
mod templates;
#[cfg(test)]
mod tests;

pub use media::MediaStore;

pub type ServerRouter = Router<ServerState>;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct SessionConfig {
    /// `None` keeps sessions alive until logout.
    pub lifetime: Option<PositiveDuration>,
}

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub db_client: Arc<DbClient>,
    pub media_store: Arc<MediaStore>,
    pub sessions: SessionConfig,
}

pub fn app(state: ServerState) -> Router {
    let media_files = ServeDir::new(state.media_store.root());

    routes::routes()
        .nest_service("/media", media_files)
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

/// A `302 Found` redirect, the status browsers and form posts expect.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

pub fn login_url(next: &str) -> String {
    format!("/auth/login/?next={}", urlencoding::encode(next))
}

pub fn profile_url(username: &Username) -> String {
    format!("/profile/{}/", urlencoding::encode(username.get()))
}

pub fn post_url(post_id: Id<PostMarker>) -> String {
    format!("/posts/{post_id}/")
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query string rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Form body rejected: {0}")]
    FormRejection(#[from] FormRejection),
    #[error("Multipart body rejected: {0}")]
    MultipartRejection(#[from] MultipartRejection),
    #[error("Multipart body could not be read: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Page could not be rendered: {0}")]
    Render(#[from] askama::Error),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("The auth token could not be hashed: {0}")]
    AuthTokenHash(#[from] AuthTokenHashError),
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
    #[error(transparent)]
    Database(#[from] DbError),
    #[error("Post with id {0} was not found.")]
    PostByIdNotFound(Id<PostMarker>),
    #[error("Group with slug {0} was not found.")]
    GroupBySlugNotFound(GroupSlug),
    #[error("User with username {0} was not found.")]
    UserByUsernameNotFound(Username),
    #[error("User {user} is not the author of post {post}")]
    NotPostAuthor {
        post: Id<PostMarker>,
        user: Id<UserMarker>,
    },
    #[error("Login required to access {next}")]
    LoginRequired { next: String },
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::PostByIdNotFound(_)
            | ServerError::GroupBySlugNotFound(_)
            | ServerError::UserByUsernameNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::NotPostAuthor { .. } => StatusCode::FORBIDDEN,
            ServerError::LoginRequired { .. } => StatusCode::FOUND,
            ServerError::QueryRejection(_)
            | ServerError::FormRejection(_)
            | ServerError::MultipartRejection(_)
            | ServerError::Multipart(_) => StatusCode::BAD_REQUEST,
            ServerError::Render(_)
            | ServerError::Media(_)
            | ServerError::AuthTokenHash(_)
            | ServerError::PasswordHash(_)
            | ServerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let ServerError::LoginRequired { next } = &self {
            debug!(next, "Redirecting anonymous user to login");
            return found(&login_url(next));
        }

        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "Replying with error");
        } else {
            debug!(error = %self, %status, "Replying with error");
        }

        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
        };
        (status, render_or_plain(&page)).into_response()
    }
}
