use crate::model::{
    Id,
    group::{Group, GroupMarker},
    user::{User, UserMarker},
};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::fmt::Display;
use thiserror::Error;
use time::{UtcDateTime, macros::format_description};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub text: PostText,
    pub created_at: UtcDateTime,
    pub author: User,
    pub group: Option<Group>,
    /// Path of the attached image, relative to the media root.
    pub image: Option<String>,
}

impl Post {
    #[must_use]
    pub fn is_authored_by(&self, user_id: Id<UserMarker>) -> bool {
        self.author.id == user_id
    }

    /// Publication date as shown on pages, e.g. `17 Oct 2026`.
    #[must_use]
    pub fn published(&self) -> String {
        self.created_at
            .format(format_description!("[day] [month repr:short] [year]"))
            .unwrap_or_default()
    }
}

/// Everything about a post its author gets to choose.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct PostContent {
    pub text: PostText,
    pub group: Option<Id<GroupMarker>>,
    pub image: Option<String>,
}

/// Post body with surrounding whitespace removed. Never blank.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct PostText(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post text must not be blank")]
pub struct InvalidPostTextError;

impl PostText {
    pub fn new(text: &str) -> Result<Self, InvalidPostTextError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Err(InvalidPostTextError)
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    /// Leading part of the text for listings, cut at a char boundary.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl Display for PostText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PostText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        PostText::new(&inner).map_err(|_| Error::invalid_value(Unexpected::Str(&inner), &"PostText"))
    }
}
