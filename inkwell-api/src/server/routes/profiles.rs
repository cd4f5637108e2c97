use crate::server::{
    Result, ServerError, ServerRouter,
    auth::CurrentUser,
    extract::Query,
    html::Html,
    routes::{PageQuery, post_page},
    templates::ProfileTemplate,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use inkwell_common::model::user::Username;
use inkwell_db::client::{DbClient, PostFilter};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(profile)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/profile/{username}/", rejection(ServerError))]
struct ProfilePath {
    username: Username,
}

async fn profile(
    ProfilePath { username }: ProfilePath,
    State(db): State<Arc<DbClient>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Html<ProfileTemplate>> {
    let author = db
        .fetch_user_by_username(&username)
        .await?
        .ok_or(ServerError::UserByUsernameNotFound(username))?;
    let page = post_page(&db, PostFilter::Author(author.id), &query).await?;

    Ok(Html(ProfileTemplate {
        viewer,
        author,
        post_count: page.total_items,
        page,
    }))
}
