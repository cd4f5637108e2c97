use crate::server::{
    ServerRouter,
    auth::CurrentUser,
    html::Html,
    templates::{AboutAuthorTemplate, AboutTechTemplate},
};
use axum_extra::routing::{RouterExt, TypedPath};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(about_author)
        .typed_get(about_tech)
}

#[derive(TypedPath)]
#[typed_path("/about/author/")]
struct AboutAuthorPath;

async fn about_author(_: AboutAuthorPath, CurrentUser(viewer): CurrentUser) -> Html<AboutAuthorTemplate> {
    Html(AboutAuthorTemplate { viewer })
}

#[derive(TypedPath)]
#[typed_path("/about/tech/")]
struct AboutTechPath;

async fn about_tech(_: AboutTechPath, CurrentUser(viewer): CurrentUser) -> Html<AboutTechTemplate> {
    Html(AboutTechTemplate { viewer })
}
