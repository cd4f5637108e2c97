use crate::server::{Result, ServerRouter};
use inkwell_common::{
    model::post::Post,
    paginator::{PAGE_SIZE, Page, Paginator},
};
use inkwell_db::client::{DbClient, PostFilter};
use serde::Deserialize;

mod about;
mod auth;
mod groups;
mod posts;
mod profiles;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(posts::routes())
        .merge(groups::routes())
        .merge(profiles::routes())
        .merge(auth::routes())
        .merge(about::routes())
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

/// The requested page of the posts matching `filter`.
async fn post_page(db: &DbClient, filter: PostFilter, query: &PageQuery) -> Result<Page<Post>> {
    let total = db.count_posts(filter).await?;
    let window = Paginator::new(total, PAGE_SIZE).window(query.page.as_deref());
    let posts = db.fetch_posts(filter, window.offset, window.limit).await?;

    Ok(window.into_page(posts))
}
