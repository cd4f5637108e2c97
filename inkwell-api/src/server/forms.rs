//! Submitted forms, their validation and the state needed to show them again
//! with error messages.

use crate::server::{
    Result,
    media::{InvalidImageError, ValidImage},
};
use axum::extract::Multipart;
use inkwell_common::model::{
    Id,
    group::{Group, GroupMarker},
    post::{Post, PostText},
    user::Username,
};
use serde::Deserialize;
use tracing::debug;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
pub const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";
pub const INVALID_LOGIN: &str = "Please enter a correct username and password.";
pub const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const PASSWORD_TOO_SHORT: &str = "This password is too short. It must contain at least 8 characters.";
pub const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";

pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct PostFormErrors {
    pub text: Vec<&'static str>,
    pub group: Vec<&'static str>,
    pub image: Vec<&'static str>,
}

impl PostFormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.group.is_empty() && self.image.is_empty()
    }
}

/// The post form as shown to the user: raw field values plus errors.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct PostForm {
    pub text: String,
    /// Selected group id, empty for "no group".
    pub group: String,
    pub errors: PostFormErrors,
}

impl PostForm {
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self {
            text: post.text.get().to_owned(),
            group: post
                .group
                .as_ref()
                .map(|group| group.id.to_string())
                .unwrap_or_default(),
            errors: PostFormErrors::default(),
        }
    }

    #[must_use]
    pub fn is_group_selected(&self, group_id: Id<GroupMarker>) -> bool {
        self.group == group_id.to_string()
    }
}

/// A post form that passed validation.
#[derive(Clone, PartialEq, Debug)]
pub struct ValidPost {
    pub text: PostText,
    pub group: Option<Id<GroupMarker>>,
    pub image: Option<ValidImage>,
}

/// Raw multipart submission of the post form.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PostSubmission {
    pub text: String,
    pub group: String,
    pub image: Option<Vec<u8>>,
}

impl PostSubmission {
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("text") => submission.text = field.text().await?,
                Some("group") => submission.group = field.text().await?,
                Some("image") => {
                    // Browsers send an empty, unnamed file part when nothing was chosen.
                    let has_file = field.file_name().is_some_and(|name| !name.is_empty());
                    let bytes = field.bytes().await?;
                    if has_file || !bytes.is_empty() {
                        submission.image = Some(bytes.to_vec());
                    }
                }
                other => debug!(field = ?other, "Ignoring unknown post form field"),
            }
        }

        Ok(submission)
    }

    /// Checks the submission against the existing `groups`. On failure the
    /// returned form carries the submitted values and the errors.
    pub fn validate(self, groups: &[Group]) -> Result<ValidPost, PostForm> {
        let mut errors = PostFormErrors::default();

        let text = PostText::new(&self.text)
            .inspect_err(|_| errors.text.push(REQUIRED))
            .ok();

        let group = match self.group.trim() {
            "" => None,
            raw => {
                let selected = raw
                    .parse::<i64>()
                    .ok()
                    .map(Id::new)
                    .filter(|id| groups.iter().any(|group| group.id == *id));
                if selected.is_none() {
                    errors.group.push(INVALID_CHOICE);
                }
                selected
            }
        };

        let image = match self.image.map(ValidImage::new).transpose() {
            Ok(image) => image,
            Err(InvalidImageError) => {
                errors.image.push(INVALID_IMAGE);
                None
            }
        };

        match text {
            Some(text) if errors.is_empty() => Ok(ValidPost { text, group, image }),
            _ => Err(PostForm {
                text: self.text,
                group: self.group,
                errors,
            }),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub struct LoginSubmission {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct LoginForm {
    pub username: String,
    pub next: String,
    pub errors: Vec<&'static str>,
}

impl LoginSubmission {
    /// Field-level checks; the credentials themselves are checked against
    /// the database by the caller.
    pub fn validate(&self) -> Result<Username, LoginForm> {
        Username::new(self.username.trim().to_owned())
            .ok()
            .filter(|_| !self.password.is_empty())
            .ok_or_else(|| self.rejected())
    }

    #[must_use]
    pub fn rejected(&self) -> LoginForm {
        LoginForm {
            username: self.username.clone(),
            next: self.next.clone().unwrap_or_default(),
            errors: vec![INVALID_LOGIN],
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub struct SignupSubmission {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct SignupFormErrors {
    pub username: Vec<&'static str>,
    pub password1: Vec<&'static str>,
    pub password2: Vec<&'static str>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct SignupForm {
    pub username: String,
    pub errors: SignupFormErrors,
}

/// A signup form that passed validation. Username uniqueness is only known
/// once the insert went through.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct ValidSignup {
    pub username: Username,
    pub password: String,
}

impl SignupSubmission {
    pub fn validate(self) -> Result<ValidSignup, SignupForm> {
        let mut errors = SignupFormErrors::default();

        let username = match self.username.trim() {
            "" => {
                errors.username.push(REQUIRED);
                None
            }
            raw => Username::new(raw.to_owned())
                .inspect_err(|_| errors.username.push(INVALID_USERNAME))
                .ok(),
        };

        if self.password1.is_empty() {
            errors.password1.push(REQUIRED);
        } else if self.password1.chars().count() < PASSWORD_MIN_LEN {
            errors.password1.push(PASSWORD_TOO_SHORT);
        }
        if self.password2.is_empty() {
            errors.password2.push(REQUIRED);
        } else if self.password1 != self.password2 {
            errors.password2.push(PASSWORD_MISMATCH);
        }

        let valid = errors.username.is_empty()
            && errors.password1.is_empty()
            && errors.password2.is_empty();
        match username {
            Some(username) if valid => Ok(ValidSignup {
                username,
                password: self.password1,
            }),
            _ => Err(SignupForm {
                username: self.username,
                errors,
            }),
        }
    }
}

impl SignupForm {
    #[must_use]
    pub fn username_taken(username: &Username) -> Self {
        Self {
            username: username.get().to_owned(),
            errors: SignupFormErrors {
                username: vec![USERNAME_TAKEN],
                ..SignupFormErrors::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{
        forms::{
            INVALID_CHOICE, INVALID_IMAGE, LoginSubmission, PASSWORD_MISMATCH,
            PASSWORD_TOO_SHORT, PostSubmission, REQUIRED, SignupSubmission,
        },
        media::tests::SMALL_GIF,
    };
    use inkwell_common::model::{
        Id,
        group::{Group, GroupSlug, GroupTitle},
    };

    fn groups() -> Vec<Group> {
        vec![Group {
            id: Id::new(3),
            title: GroupTitle::new("Cats".to_owned()).unwrap(),
            slug: GroupSlug::new("cats".to_owned()).unwrap(),
            description: String::new(),
        }]
    }

    #[test]
    fn valid_post_without_group_or_image() {
        let submission = PostSubmission {
            text: "  Some text ".to_owned(),
            ..PostSubmission::default()
        };

        let post = submission.validate(&groups()).unwrap();
        assert_eq!(post.text.get(), "Some text");
        assert_eq!(post.group, None);
        assert!(post.image.is_none());
    }

    #[test]
    fn valid_post_with_group_and_image() {
        let submission = PostSubmission {
            text: "text".to_owned(),
            group: "3".to_owned(),
            image: Some(SMALL_GIF.to_vec()),
        };

        let post = submission.validate(&groups()).unwrap();
        assert_eq!(post.group, Some(Id::new(3)));
        assert_eq!(post.image.unwrap().extension(), "gif");
    }

    #[test]
    fn invalid_post_keeps_values() {
        let submission = PostSubmission {
            text: "   ".to_owned(),
            group: "42".to_owned(),
            image: Some(b"plain text".to_vec()),
        };

        let form = submission.validate(&groups()).unwrap_err();
        assert_eq!(form.text, "   ");
        assert_eq!(form.group, "42");
        assert_eq!(form.errors.text, [REQUIRED]);
        assert_eq!(form.errors.group, [INVALID_CHOICE]);
        assert_eq!(form.errors.image, [INVALID_IMAGE]);
        assert!(!form.is_group_selected(Id::new(3)));
    }

    #[test]
    fn login_needs_both_fields() {
        let submission = LoginSubmission {
            username: "Author".to_owned(),
            password: String::new(),
            next: Some("/create/".to_owned()),
        };
        let form = submission.validate().unwrap_err();
        assert_eq!(form.next, "/create/");
        assert_eq!(form.username, "Author");

        let submission = LoginSubmission {
            password: "secret".to_owned(),
            ..submission
        };
        assert_eq!(submission.validate().unwrap().get(), "Author");
    }

    #[test]
    fn signup_rules() {
        let form = SignupSubmission {
            username: "bad name".to_owned(),
            password1: "short".to_owned(),
            password2: "other".to_owned(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(form.errors.username.len(), 1);
        assert_eq!(form.errors.password1, [PASSWORD_TOO_SHORT]);
        assert_eq!(form.errors.password2, [PASSWORD_MISMATCH]);

        let form = SignupSubmission::default().validate().unwrap_err();
        assert_eq!(form.errors.username, [REQUIRED]);
        assert_eq!(form.errors.password1, [REQUIRED]);
        assert_eq!(form.errors.password2, [REQUIRED]);

        let signup = SignupSubmission {
            username: "NewUser".to_owned(),
            password1: "long enough".to_owned(),
            password2: "long enough".to_owned(),
        }
        .validate()
        .unwrap();
        assert_eq!(signup.username.get(), "NewUser");
        assert_eq!(signup.password, "long enough");
    }
}
