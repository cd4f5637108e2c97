use crate::server::forms::{LoginForm, PostForm, SignupForm};
use askama::Template;
use inkwell_common::{
    model::{
        Id,
        group::Group,
        post::{Post, PostMarker},
        user::User,
    },
    paginator::Page,
};

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct IndexTemplate {
    pub viewer: Option<User>,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "posts/group_list.html")]
pub struct GroupListTemplate {
    pub viewer: Option<User>,
    pub group: Group,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "posts/profile.html")]
pub struct ProfileTemplate {
    pub viewer: Option<User>,
    pub author: User,
    pub post_count: u64,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "posts/post_detail.html")]
pub struct PostDetailTemplate {
    pub viewer: Option<User>,
    pub post: Post,
    pub author_post_count: u64,
}

/// Shared by the create and edit pages.
#[derive(Template)]
#[template(path = "posts/create_post.html")]
pub struct PostFormTemplate {
    pub viewer: Option<User>,
    pub form: PostForm,
    pub groups: Vec<Group>,
    /// Set when editing an existing post.
    pub post_id: Option<Id<PostMarker>>,
    pub current_image: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub viewer: Option<User>,
    pub form: LoginForm,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub viewer: Option<User>,
    pub form: SignupForm,
}

#[derive(Template)]
#[template(path = "auth/logged_out.html")]
pub struct LoggedOutTemplate {
    pub viewer: Option<User>,
}

#[derive(Template)]
#[template(path = "about/author.html")]
pub struct AboutAuthorTemplate {
    pub viewer: Option<User>,
}

#[derive(Template)]
#[template(path = "about/tech.html")]
pub struct AboutTechTemplate {
    pub viewer: Option<User>,
}

/// Rendered without the session lookup, so its header has no account links.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: &'static str,
}
