use crate::server::ServerError;
use askama::Template;
use axum::response::{IntoResponse, Response};
use axum_extra::TypedHeader;
use headers::ContentType;
use tracing::error;

/// A rendered askama page.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html<T>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => (TypedHeader(ContentType::html()), html).into_response(),
            Err(err) => ServerError::Render(err).into_response(),
        }
    }
}

/// Renders `page`, falling back to a bare text body. Used for error pages,
/// which cannot report their own rendering failures as another error page.
pub fn render_or_plain<T: Template>(page: &T) -> Response {
    match page.render() {
        Ok(html) => (TypedHeader(ContentType::html()), html).into_response(),
        Err(err) => {
            error!(error = %err, "Error page could not be rendered");
            (TypedHeader(ContentType::text_utf8()), "Something went wrong").into_response()
        }
    }
}
