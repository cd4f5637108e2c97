use crate::server::{
    Result, ServerRouter, SessionConfig,
    auth::{CurrentUser, local_redirect_target, log_in, log_out},
    extract::{Form, Query},
    forms::{LoginForm, LoginSubmission, SignupForm, SignupSubmission},
    found,
    html::Html,
    templates::{LoggedOutTemplate, LoginTemplate, SignupTemplate},
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::{
    extract::CookieJar,
    routing::{RouterExt, TypedPath},
};
use inkwell_common::model::{
    auth::PasswordDigest,
    user::{CreateUser, User},
};
use inkwell_db::client::{DbClient, DbError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(login_form)
        .typed_post(login)
        .typed_get(signup_form)
        .typed_post(signup)
        .typed_get(logout)
        .typed_post(logout)
}

#[derive(TypedPath)]
#[typed_path("/auth/login/")]
struct LoginPath;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct NextQuery {
    next: Option<String>,
}

async fn login_form(
    _: LoginPath,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<NextQuery>,
) -> Html<LoginTemplate> {
    Html(LoginTemplate {
        viewer,
        form: LoginForm {
            next: query.next.unwrap_or_default(),
            ..LoginForm::default()
        },
    })
}

async fn login(
    _: LoginPath,
    State(db): State<Arc<DbClient>>,
    State(sessions): State<SessionConfig>,
    jar: CookieJar,
    Form(submission): Form<LoginSubmission>,
) -> Result<Response> {
    let username = match submission.validate() {
        Ok(username) => username,
        Err(form) => return Ok(Html(LoginTemplate { viewer: None, form }).into_response()),
    };

    let credentials = db
        .fetch_credentials(&username)
        .await?
        .filter(|credentials| credentials.password_digest.verify(&submission.password));
    let Some(credentials) = credentials else {
        debug!(%username, "Rejected login attempt");
        return Ok(Html(LoginTemplate {
            viewer: None,
            form: submission.rejected(),
        })
        .into_response());
    };

    let jar = log_in(jar, &db, sessions, &credentials.user).await?;
    let target = local_redirect_target(submission.next.as_deref());

    Ok((jar, found(target)).into_response())
}

#[derive(TypedPath)]
#[typed_path("/auth/signup/")]
struct SignupPath;

async fn signup_form(_: SignupPath, CurrentUser(viewer): CurrentUser) -> Html<SignupTemplate> {
    Html(SignupTemplate {
        viewer,
        form: SignupForm::default(),
    })
}

async fn signup(
    _: SignupPath,
    State(db): State<Arc<DbClient>>,
    State(sessions): State<SessionConfig>,
    jar: CookieJar,
    Form(submission): Form<SignupSubmission>,
) -> Result<Response> {
    let signup = match submission.validate() {
        Ok(signup) => signup,
        Err(form) => return Ok(Html(SignupTemplate { viewer: None, form }).into_response()),
    };

    let create_user = CreateUser {
        username: signup.username,
        password_digest: PasswordDigest::create(&signup.password)?,
    };
    let user_id = match db.create_user(&create_user).await {
        Ok(user_id) => user_id,
        Err(DbError::UsernameTaken(username)) => {
            return Ok(Html(SignupTemplate {
                viewer: None,
                form: SignupForm::username_taken(&username),
            })
            .into_response());
        }
        Err(err) => return Err(err.into()),
    };
    info!(%user_id, username = %create_user.username, "User signed up");

    let user = User {
        id: user_id,
        username: create_user.username,
    };
    let jar = log_in(jar, &db, sessions, &user).await?;

    Ok((jar, found("/")).into_response())
}

#[derive(TypedPath)]
#[typed_path("/auth/logout/")]
struct LogoutPath;

async fn logout(
    _: LogoutPath,
    State(db): State<Arc<DbClient>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<LoggedOutTemplate>)> {
    let jar = log_out(jar, &db).await?;

    Ok((jar, Html(LoggedOutTemplate { viewer: None })))
}
