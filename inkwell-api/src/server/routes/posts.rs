use crate::server::{
    Result, ServerError, ServerRouter,
    auth::{AuthenticatedUser, CurrentUser},
    extract::Query,
    forms::{PostForm, PostSubmission, ValidPost},
    found,
    html::Html,
    media::MediaStore,
    post_url, profile_url,
    routes::{PageQuery, post_page},
    templates::{IndexTemplate, PostDetailTemplate, PostFormTemplate},
};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    response::{IntoResponse, Response},
};
use axum_extra::routing::{RouterExt, TypedPath};
use inkwell_common::model::{
    Id,
    post::{Post, PostContent, PostMarker},
    user::User,
};
use inkwell_db::client::{DbClient, PostFilter};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(index)
        .typed_get(post_detail)
        .typed_get(create_post_form)
        .typed_post(create_post)
        .typed_get(edit_post_form)
        .typed_post(edit_post)
}

#[derive(TypedPath)]
#[typed_path("/")]
struct IndexPath;

async fn index(
    _: IndexPath,
    State(db): State<Arc<DbClient>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Html<IndexTemplate>> {
    let page = post_page(&db, PostFilter::All, &query).await?;

    Ok(Html(IndexTemplate { viewer, page }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

async fn post_detail(
    PostPath { id }: PostPath,
    State(db): State<Arc<DbClient>>,
    CurrentUser(viewer): CurrentUser,
) -> Result<Html<PostDetailTemplate>> {
    let post = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;
    let author_post_count = db.count_posts(PostFilter::Author(post.author.id)).await?;

    Ok(Html(PostDetailTemplate {
        viewer,
        post,
        author_post_count,
    }))
}

#[derive(TypedPath)]
#[typed_path("/create/")]
struct CreatePostPath;

async fn create_post_form(
    _: CreatePostPath,
    State(db): State<Arc<DbClient>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Html<PostFormTemplate>> {
    Ok(Html(PostFormTemplate {
        viewer: Some(user),
        form: PostForm::default(),
        groups: db.fetch_groups().await?,
        post_id: None,
        current_image: None,
    }))
}

async fn create_post(
    _: CreatePostPath,
    State(db): State<Arc<DbClient>>,
    State(media): State<Arc<MediaStore>>,
    AuthenticatedUser(user): AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let submission = PostSubmission::read(multipart?).await?;
    let groups = db.fetch_groups().await?;

    match submission.validate(&groups) {
        Ok(valid) => {
            let content = post_content(valid, &media, None).await?;
            let post_id = match db.create_post(&content, user.id).await {
                Ok(post_id) => post_id,
                Err(err) => {
                    discard_image(&media, content.image.as_deref()).await;
                    return Err(err.into());
                }
            };
            info!(%post_id, author = %user.username, "Post created");

            Ok(found(&profile_url(&user.username)))
        }
        Err(form) => Ok(Html(PostFormTemplate {
            viewer: Some(user),
            form,
            groups,
            post_id: None,
            current_image: None,
        })
        .into_response()),
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/edit/", rejection(ServerError))]
struct EditPostPath {
    id: Id<PostMarker>,
}

async fn edit_post_form(
    EditPostPath { id }: EditPostPath,
    State(db): State<Arc<DbClient>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Html<PostFormTemplate>> {
    let post = fetch_own_post(&db, id, &user).await?;

    Ok(Html(PostFormTemplate {
        viewer: Some(user),
        form: PostForm::from_post(&post),
        groups: db.fetch_groups().await?,
        post_id: Some(id),
        current_image: post.image,
    }))
}

async fn edit_post(
    EditPostPath { id }: EditPostPath,
    State(db): State<Arc<DbClient>>,
    State(media): State<Arc<MediaStore>>,
    AuthenticatedUser(user): AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let post = fetch_own_post(&db, id, &user).await?;
    let submission = PostSubmission::read(multipart?).await?;
    let groups = db.fetch_groups().await?;

    match submission.validate(&groups) {
        Ok(valid) => {
            let uploaded = valid.image.is_some();
            let content = post_content(valid, &media, post.image.clone()).await?;
            let new_image = content.image.as_deref().filter(|_| uploaded);

            let result = match db.update_post(id, &content).await {
                Ok(true) => Ok(()),
                Ok(false) => Err(ServerError::PostByIdNotFound(id)),
                Err(err) => Err(err.into()),
            };
            if let Err(err) = result {
                discard_image(&media, new_image).await;
                return Err(err);
            }
            if uploaded {
                discard_image(&media, post.image.as_deref()).await;
            }
            info!(post_id = %id, author = %user.username, "Post edited");

            Ok(found(&post_url(id)))
        }
        Err(form) => Ok(Html(PostFormTemplate {
            viewer: Some(user),
            form,
            groups,
            post_id: Some(id),
            current_image: post.image,
        })
        .into_response()),
    }
}

/// The post with `id`, provided `user` wrote it.
async fn fetch_own_post(db: &DbClient, id: Id<PostMarker>, user: &User) -> Result<Post> {
    let post = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    if post.is_authored_by(user.id) {
        Ok(post)
    } else {
        Err(ServerError::NotPostAuthor {
            post: id,
            user: user.id,
        })
    }
}

/// Stores the uploaded image, if any. Without an upload the post keeps
/// `current_image`.
async fn post_content(
    valid: ValidPost,
    media: &MediaStore,
    current_image: Option<String>,
) -> Result<PostContent> {
    let image = match &valid.image {
        Some(image) => Some(media.save_post_image(image).await?),
        None => current_image,
    };

    Ok(PostContent {
        text: valid.text,
        group: valid.group,
        image,
    })
}

/// A failure here only leaves an unreferenced file behind, so it is logged
/// and otherwise ignored.
async fn discard_image(media: &MediaStore, image: Option<&str>) {
    if let Some(image) = image {
        if let Err(err) = media.remove(image).await {
            warn!(error = %err, "Could not discard post image");
        }
    }
}
