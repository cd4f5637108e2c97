use crate::server::{
    Result, ServerError, ServerRouter,
    auth::CurrentUser,
    extract::Query,
    html::Html,
    routes::{PageQuery, post_page},
    templates::GroupListTemplate,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use inkwell_common::model::group::GroupSlug;
use inkwell_db::client::{DbClient, PostFilter};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(group_posts)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/group/{slug}/", rejection(ServerError))]
struct GroupPath {
    slug: GroupSlug,
}

async fn group_posts(
    GroupPath { slug }: GroupPath,
    State(db): State<Arc<DbClient>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Html<GroupListTemplate>> {
    let group = db
        .fetch_group_by_slug(&slug)
        .await?
        .ok_or(ServerError::GroupBySlugNotFound(slug))?;
    let page = post_page(&db, PostFilter::Group(group.id), &query).await?;

    Ok(Html(GroupListTemplate {
        viewer,
        group,
        page,
    }))
}
