//! End-to-end tests against the full router, backed by an in-memory database
//! and a temporary media directory.

use crate::server::{
    MediaStore, ServerState, SessionConfig, app,
    auth::SESSION_COOKIE,
    forms::{INVALID_IMAGE, INVALID_LOGIN, PASSWORD_TOO_SHORT, REQUIRED, USERNAME_TAKEN},
    media::tests::SMALL_GIF,
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use inkwell_common::{
    model::{
        Id,
        auth::{AuthToken, Authentication, PasswordDigest},
        group::{CreateGroup, GroupMarker, GroupSlug, GroupTitle},
        post::{PostContent, PostMarker, PostText},
        user::{CreateUser, User, Username},
    },
    util::PositiveDuration,
};
use inkwell_db::client::{DbClient, PostFilter};
use std::sync::Arc;
use tempfile::TempDir;
use time::{Duration, UtcDateTime};
use tower::ServiceExt;

const BOUNDARY: &str = "inkwell-test-boundary";
const PASSWORD: &str = "correct horse battery";
const POST_CARD: &str = r#"<article class="post-card">"#;

struct TestApp {
    db: Arc<DbClient>,
    media: TempDir,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let db = Arc::new(DbClient::in_memory().await.unwrap());
        let media = tempfile::tempdir().unwrap();
        let state = ServerState {
            db_client: Arc::clone(&db),
            media_store: Arc::new(MediaStore::new(media.path().to_owned())),
            sessions: SessionConfig::default(),
        };

        Self {
            db,
            media,
            router: app(state),
        }
    }

    async fn user(&self, username: &str) -> User {
        let username = Username::new(username.to_owned()).unwrap();
        let id = self
            .db
            .create_user(&CreateUser {
                username: username.clone(),
                password_digest: PasswordDigest::create(PASSWORD).unwrap(),
            })
            .await
            .unwrap();

        User { id, username }
    }

    async fn group(&self, title: &str, slug: &str) -> Id<GroupMarker> {
        self.db
            .create_group(&CreateGroup {
                title: GroupTitle::new(title.to_owned()).unwrap(),
                slug: GroupSlug::new(slug.to_owned()).unwrap(),
                description: format!("All about {title}"),
            })
            .await
            .unwrap()
    }

    async fn post(
        &self,
        author: &User,
        text: &str,
        group: Option<Id<GroupMarker>>,
    ) -> Id<PostMarker> {
        let content = PostContent {
            text: PostText::new(text).unwrap(),
            group,
            image: None,
        };
        self.db.create_post(&content, author.id).await.unwrap()
    }

    /// A `Cookie` header value carrying a fresh session for `user`.
    async fn session(&self, user: &User) -> String {
        self.session_created_at(user, UtcDateTime::now(), None)
            .await
    }

    async fn session_created_at(
        &self,
        user: &User,
        created_at: UtcDateTime,
        expires_after: Option<PositiveDuration>,
    ) -> String {
        let token = AuthToken::generate_random(user.id);
        self.db
            .create_auth(&Authentication {
                user: user.id,
                token_hash: token.hash().unwrap(),
                created_at,
                expires_after,
            })
            .await
            .unwrap();

        format!("{SESSION_COOKIE}={}", token.as_token_str())
    }

    async fn post_count(&self) -> u64 {
        self.db.count_posts(PostFilter::All).await.unwrap()
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::get(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Response {
        let body = fields
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(body)).unwrap()).await
    }

    async fn post_multipart(
        &self,
        uri: &str,
        text: &str,
        group: &str,
        image: Option<&[u8]>,
        cookie: Option<&str>,
    ) -> Response {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let body = multipart_body(text, group, image);
        self.send(request.body(Body::from(body)).unwrap()).await
    }
}

fn multipart_body(text: &str, group: &str, image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [("text", text), ("group", group)] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match image {
        Some(image) => {
            body.extend_from_slice(
                b"Content-Disposition: form-data; name=\"image\"; filename=\"small.gif\"\r\n\
                Content-Type: image/gif\r\n\r\n",
            );
            body.extend_from_slice(image);
        }
        None => body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n",
        ),
    }
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    body
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// The `name=value` part of the session cookie the response sets.
fn set_session_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap())
        .find(|value| value.starts_with(SESSION_COOKIE))
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_owned()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn create_post_adds_exactly_one_and_redirects_to_profile() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let group = app.group("Cats", "cats").await;
    let cookie = app.session(&author).await;

    let response = app.get("/create/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"name="text""#));

    let response = app
        .post_multipart(
            "/create/",
            "A brand new post",
            &group.to_string(),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/profile/author/");
    assert_eq!(app.post_count().await, 1);

    let posts = app.db.fetch_posts(PostFilter::All, 0, 10).await.unwrap();
    assert_eq!(posts[0].text.get(), "A brand new post");
    assert_eq!(posts[0].author, author);
    assert_eq!(posts[0].group.as_ref().map(|group| group.id), Some(group));
    assert_eq!(posts[0].image, None);
}

#[tokio::test]
async fn create_post_with_image_stores_the_file() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let cookie = app.session(&author).await;

    let response = app
        .post_multipart("/create/", "With a picture", "", Some(SMALL_GIF), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(app.post_count().await, 1);

    let post = app
        .db
        .fetch_posts(PostFilter::All, 0, 1)
        .await
        .unwrap()
        .remove(0);
    let image = post.image.clone().unwrap();
    assert!(image.starts_with("posts/"));
    assert_eq!(std::fs::read(app.media.path().join(&image)).unwrap(), SMALL_GIF);

    let response = app.get(&format!("/posts/{}/", post.id), None).await;
    assert!(body_text(response).await.contains(r#"class="post-image""#));

    let response = app.get(&format!("/media/{image}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], SMALL_GIF);
}

#[tokio::test]
async fn invalid_post_rerenders_form_without_saving() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let cookie = app.session(&author).await;

    let response = app
        .post_multipart("/create/", "Text", "", Some(b"not an image"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(INVALID_IMAGE));

    let response = app
        .post_multipart("/create/", "   ", "", None, Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(REQUIRED));

    let response = app
        .post_multipart("/create/", "Text", "12345", None, Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(app.post_count().await, 0);
    assert!(!app.media.path().join("posts").exists());
}

#[tokio::test]
async fn anonymous_create_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app.get("/create/", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/login/?next=%2Fcreate%2F");

    let response = app
        .post_multipart("/create/", "Sneaky", "", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/login/?next=%2Fcreate%2F");
    assert_eq!(app.post_count().await, 0);
}

#[tokio::test]
async fn author_edits_post_in_place() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let group = app.group("Cats", "cats").await;
    let dogs = app.group("Dogs", "dogs").await;
    let post_id = app.post(&author, "Before", Some(dogs)).await;
    let cookie = app.session(&author).await;

    let response = app
        .get(&format!("/posts/{post_id}/edit/"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let form = body_text(response).await;
    assert!(form.contains("Before"));
    assert!(form.contains(&format!(r#"<option value="{dogs}" selected>Dogs</option>"#)));
    assert!(form.contains(&format!(r#"<option value="{group}">Cats</option>"#)));

    let response = app
        .post_multipart(
            &format!("/posts/{post_id}/edit/"),
            "After",
            &group.to_string(),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("/posts/{post_id}/"));
    assert_eq!(app.post_count().await, 1);

    let post = app.db.fetch_post(post_id).await.unwrap().unwrap();
    assert_eq!(post.text.get(), "After");
    assert_eq!(post.author, author);
    assert_eq!(post.group.map(|group| group.id), Some(group));
}

#[tokio::test]
async fn edit_without_upload_keeps_image() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let cookie = app.session(&author).await;

    app.post_multipart("/create/", "Picture", "", Some(SMALL_GIF), Some(&cookie))
        .await;
    let post = app
        .db
        .fetch_posts(PostFilter::All, 0, 1)
        .await
        .unwrap()
        .remove(0);

    let response = app
        .post_multipart(
            &format!("/posts/{}/edit/", post.id),
            "Picture, reworded",
            "",
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let edited = app.db.fetch_post(post.id).await.unwrap().unwrap();
    assert_eq!(edited.text.get(), "Picture, reworded");
    assert_eq!(edited.image, post.image);
}

#[tokio::test]
async fn edit_with_upload_replaces_image_file() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let cookie = app.session(&author).await;

    app.post_multipart("/create/", "Picture", "", Some(SMALL_GIF), Some(&cookie))
        .await;
    let post = app
        .db
        .fetch_posts(PostFilter::All, 0, 1)
        .await
        .unwrap()
        .remove(0);
    let old_image = post.image.unwrap();

    let response = app
        .post_multipart(
            &format!("/posts/{}/edit/", post.id),
            "New picture",
            "",
            Some(SMALL_GIF),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let new_image = app
        .db
        .fetch_post(post.id)
        .await
        .unwrap()
        .unwrap()
        .image
        .unwrap();
    assert_ne!(new_image, old_image);
    assert!(app.media.path().join(&new_image).exists());
    assert!(!app.media.path().join(&old_image).exists());
}

#[tokio::test]
async fn other_users_cannot_edit() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let intruder = app.user("intruder").await;
    let post_id = app.post(&author, "Original", None).await;
    let cookie = app.session(&intruder).await;

    let response = app
        .get(&format!("/posts/{post_id}/edit/"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let page = body_text(response).await;
    assert!(page.contains(r#"<h1 class="error-status">403</h1>"#));
    assert!(!page.contains(r#"href="/auth/login/""#));

    let response = app
        .post_multipart(
            &format!("/posts/{post_id}/edit/"),
            "Hijacked",
            "",
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let post = app.db.fetch_post(post_id).await.unwrap().unwrap();
    assert_eq!(post.text.get(), "Original");
    assert_eq!(post.author, author);
}

#[tokio::test]
async fn anonymous_edit_redirects_to_login() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let post_id = app.post(&author, "Original", None).await;

    let response = app
        .post_multipart(&format!("/posts/{post_id}/edit/"), "Changed", "", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        format!("/auth/login/?next=%2Fposts%2F{post_id}%2Fedit%2F")
    );

    let post = app.db.fetch_post(post_id).await.unwrap().unwrap();
    assert_eq!(post.text.get(), "Original");
}

#[tokio::test]
async fn listings_are_paginated() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let group = app.group("Cats", "cats").await;
    for i in 0..13 {
        app.post(&author, &format!("Post number {i}"), Some(group))
            .await;
    }

    for listing in ["/", "/group/cats/", "/profile/author/"] {
        let first = body_text(app.get(listing, None).await).await;
        assert_eq!(first.matches(POST_CARD).count(), 10, "{listing}");
        assert!(first.contains("Post number 12"), "{listing}");

        let second = body_text(app.get(&format!("{listing}?page=2"), None).await).await;
        assert_eq!(second.matches(POST_CARD).count(), 3, "{listing}");
        assert!(second.contains("Post number 0"), "{listing}");

        let past_end = body_text(app.get(&format!("{listing}?page=9"), None).await).await;
        assert_eq!(past_end.matches(POST_CARD).count(), 3, "{listing}");

        let garbage = body_text(app.get(&format!("{listing}?page=abc"), None).await).await;
        assert_eq!(garbage.matches(POST_CARD).count(), 10, "{listing}");

        let huge = body_text(
            app.get(&format!("{listing}?page=99999999999999999999"), None)
                .await,
        )
        .await;
        assert_eq!(huge.matches(POST_CARD).count(), 3, "{listing}");
        assert!(!huge.contains("empty-listing"), "{listing}");
    }
}

#[tokio::test]
async fn group_pages_only_show_their_posts() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let cats = app.group("Cats", "cats").await;
    app.group("Dogs", "dogs").await;
    app.post(&author, "Purring", Some(cats)).await;

    let index = body_text(app.get("/", None).await).await;
    assert!(index.contains("Purring"));

    let cats_page = body_text(app.get("/group/cats/", None).await).await;
    assert!(cats_page.contains("Purring"));
    assert_eq!(cats_page.matches(POST_CARD).count(), 1);

    let dogs_page = body_text(app.get("/group/dogs/", None).await).await;
    assert!(!dogs_page.contains("Purring"));
    assert_eq!(dogs_page.matches(POST_CARD).count(), 0);
    assert!(dogs_page.contains(r#"class="empty-listing""#));
}

#[tokio::test]
async fn unknown_objects_are_not_found() {
    let app = TestApp::new().await;

    for uri in [
        "/posts/999/",
        "/posts/abc/",
        "/group/nope/",
        "/group/not%20a%20slug/",
        "/profile/nobody/",
        "/no/such/page/",
    ] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let response = app.get("/group/nope/", None).await;
    assert!(body_text(response).await.contains(r#"<h1 class="error-status">404</h1>"#));
}

#[tokio::test]
async fn editing_unknown_post_is_not_found() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let cookie = app.session(&author).await;

    let response = app.get("/posts/999/edit/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_multipart("/posts/999/edit/", "Ghost", "", Some(SMALL_GIF), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let page = body_text(response).await;
    assert!(page.contains(r#"<h1 class="error-status">404</h1>"#));
    assert!(!page.contains(r#"href="/auth/signup/""#));

    assert_eq!(app.post_count().await, 0);
    assert!(!app.media.path().join("posts").exists());
}

#[tokio::test]
async fn post_detail_shows_author_stats_and_edit_link() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let reader = app.user("reader").await;
    let post_id = app.post(&author, "First", None).await;
    app.post(&author, "Second", None).await;
    app.post(&reader, "Unrelated", None).await;

    let anonymous = body_text(app.get(&format!("/posts/{post_id}/"), None).await).await;
    assert!(anonymous.contains(r#"<span class="author-post-count">2</span>"#));
    assert!(anonymous.contains("First"));
    assert!(!anonymous.contains("edit-link"));

    let cookie = app.session(&reader).await;
    let as_reader = body_text(app.get(&format!("/posts/{post_id}/"), Some(&cookie)).await).await;
    assert!(!as_reader.contains("edit-link"));

    let cookie = app.session(&author).await;
    let as_author = body_text(app.get(&format!("/posts/{post_id}/"), Some(&cookie)).await).await;
    assert!(as_author.contains("edit-link"));
}

#[tokio::test]
async fn profile_shows_post_count() {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    app.post(&author, "One", None).await;
    app.post(&author, "Two", None).await;

    let profile = body_text(app.get("/profile/author/", None).await).await;
    assert!(profile.contains("Total posts: 2"));
}

#[tokio::test]
async fn signup_logs_in_and_logout_ends_session() {
    let app = TestApp::new().await;

    let response = app.get("/auth/signup/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_form(
            "/auth/signup/",
            &[
                ("username", "newcomer"),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
    let cookie = set_session_cookie(&response);

    let response = app.get("/create/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.post_form("/auth/logout/", &[], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("logged out"));

    let response = app.get("/create/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn signup_rejects_bad_input() {
    let app = TestApp::new().await;
    app.user("taken").await;

    let response = app
        .post_form(
            "/auth/signup/",
            &[
                ("username", "taken"),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(USERNAME_TAKEN));

    let response = app
        .post_form(
            "/auth/signup/",
            &[("username", "fresh"), ("password1", "short"), ("password2", "short")],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(PASSWORD_TOO_SHORT));

    let fresh = Username::new("fresh".to_owned()).unwrap();
    assert_eq!(app.db.fetch_user_by_username(&fresh).await.unwrap(), None);
}

#[tokio::test]
async fn login_checks_credentials_and_follows_local_next() {
    let app = TestApp::new().await;
    app.user("author").await;

    let response = app.get("/auth/login/?next=%2Fcreate%2F", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"name="next""#));

    let response = app
        .post_form(
            "/auth/login/",
            &[("username", "author"), ("password", "wrong password")],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(response).await.contains(INVALID_LOGIN));

    let response = app
        .post_form(
            "/auth/login/",
            &[
                ("username", "author"),
                ("password", PASSWORD),
                ("next", "/create/"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/create/");
    let cookie = set_session_cookie(&response);
    assert_eq!(
        app.get("/create/", Some(&cookie)).await.status(),
        StatusCode::OK
    );

    let response = app
        .post_form(
            "/auth/login/",
            &[
                ("username", "author"),
                ("password", PASSWORD),
                ("next", "https://evil.example/"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn expired_and_forged_sessions_are_ignored() {
    let app = TestApp::new().await;
    let author = app.user("author").await;

    let expired = app
        .session_created_at(
            &author,
            UtcDateTime::now() - Duration::hours(2),
            PositiveDuration::new(Duration::hours(1)),
        )
        .await;
    let response = app.get("/create/", Some(&expired)).await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let forged = format!("{SESSION_COOKIE}=1.AAAA.BBBB");
    let response = app.get("/create/", Some(&forged)).await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let fresh = app
        .session_created_at(
            &author,
            UtcDateTime::now(),
            PositiveDuration::new(Duration::hours(1)),
        )
        .await;
    let response = app.get("/create/", Some(&fresh)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn about_pages_render() {
    let app = TestApp::new().await;

    for uri in ["/about/author/", "/about/tech/"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }
}
