use crate::record::{
    AuthenticationRecord, CredentialsRecord, FullPostRecord, GroupRecord, UserRecord,
    to_primitive,
};
use inkwell_common::model::{
    Id, ModelValidationError,
    auth::{AuthTokenHash, Authentication},
    group::{CreateGroup, Group, GroupMarker, GroupSlug},
    post::{Post, PostContent, PostMarker},
    user::{CreateUser, User, UserCredentials, UserMarker, Username},
};
use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    query, query_as, query_scalar,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use thiserror::Error;
use time::UtcDateTime;
use tracing::{debug, info};

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error("Username {0} is already taken")]
    UsernameTaken(Username),
    #[error("Group slug {0} is already taken")]
    GroupSlugTaken(GroupSlug),
    #[error("Running migrations failed: {0}")]
    Migrate(#[from] MigrateError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Which posts a listing shows.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum PostFilter {
    #[default]
    All,
    Group(Id<GroupMarker>),
    Author(Id<UserMarker>),
}

impl PostFilter {
    fn group_id(self) -> Option<i64> {
        match self {
            PostFilter::Group(id) => Some(id.get()),
            PostFilter::All | PostFilter::Author(_) => None,
        }
    }

    fn author_id(self) -> Option<i64> {
        match self {
            PostFilter::Author(id) => Some(id.get()),
            PostFilter::All | PostFilter::Group(_) => None,
        }
    }
}

const FULL_POST_SELECT: &str = "
    SELECT
        posts.post_id,
        posts.text,
        posts.created_at,
        posts.image,
        users.user_id AS author_id,
        users.username,
        post_groups.group_id,
        post_groups.title AS group_title,
        post_groups.slug AS group_slug,
        post_groups.description AS group_description
    FROM
        posts
        JOIN users ON users.user_id = posts.author_id
        LEFT JOIN post_groups ON post_groups.group_id = posts.group_id
";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[derive(Clone, Debug)]
pub struct DbClient {
    pool: SqlitePool,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `database_url` and brings
    /// its schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let client = Self::new(pool);
        client.migrate().await?;

        info!(database_url, "Connected to database");
        Ok(client)
    }

    /// A private database that lives as long as the returned client.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        // Every connection to `:memory:` is its own database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let client = Self::new(pool);
        client.migrate().await?;
        Ok(client)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    pub async fn fetch_user(&self, user_id: Id<UserMarker>) -> Result<Option<User>> {
        let record = query_as::<_, UserRecord>(
            "
            SELECT
                users.user_id,
                users.username
            FROM
                users
            WHERE
                users.user_id = ?1
            ",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        let user = record.map(User::try_from).transpose()?;
        Ok(user)
    }

    pub async fn fetch_user_by_username(&self, username: &Username) -> Result<Option<User>> {
        let record = query_as::<_, UserRecord>(
            "
            SELECT
                users.user_id,
                users.username
            FROM
                users
            WHERE
                users.username = ?1
            ",
        )
        .bind(username.get())
        .fetch_optional(&self.pool)
        .await?;

        let user = record.map(User::try_from).transpose()?;
        Ok(user)
    }

    pub async fn fetch_credentials(&self, username: &Username) -> Result<Option<UserCredentials>> {
        let record = query_as::<_, CredentialsRecord>(
            "
            SELECT
                users.user_id,
                users.username,
                users.password_hash
            FROM
                users
            WHERE
                users.username = ?1
            ",
        )
        .bind(username.get())
        .fetch_optional(&self.pool)
        .await?;

        let credentials = record.map(UserCredentials::try_from).transpose()?;
        Ok(credentials)
    }

    pub async fn create_user(&self, user: &CreateUser) -> Result<Id<UserMarker>> {
        let user_id = query_scalar::<_, i64>(
            "
            INSERT INTO users (username, password_hash)
            VALUES (?1, ?2)
            RETURNING users.user_id
            ",
        )
        .bind(user.username.get())
        .bind(user.password_digest.as_phc())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::UsernameTaken(user.username.clone())
            } else {
                err.into()
            }
        })?;

        debug!(user_id, username = %user.username, "Created user");
        Ok(user_id.into())
    }

    pub async fn fetch_group_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>> {
        let record = query_as::<_, GroupRecord>(
            "
            SELECT
                post_groups.group_id,
                post_groups.title,
                post_groups.slug,
                post_groups.description
            FROM
                post_groups
            WHERE
                post_groups.slug = ?1
            ",
        )
        .bind(slug.get())
        .fetch_optional(&self.pool)
        .await?;

        let group = record.map(Group::try_from).transpose()?;
        Ok(group)
    }

    /// All groups, alphabetically by title.
    pub async fn fetch_groups(&self) -> Result<Vec<Group>> {
        let records = query_as::<_, GroupRecord>(
            "
            SELECT
                post_groups.group_id,
                post_groups.title,
                post_groups.slug,
                post_groups.description
            FROM
                post_groups
            ORDER BY
                post_groups.title,
                post_groups.group_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        let groups = records
            .into_iter()
            .map(Group::try_from)
            .collect::<Result<_, _>>()?;
        Ok(groups)
    }

    pub async fn create_group(&self, group: &CreateGroup) -> Result<Id<GroupMarker>> {
        let group_id = query_scalar::<_, i64>(
            "
            INSERT INTO post_groups (title, slug, description)
            VALUES (?1, ?2, ?3)
            RETURNING post_groups.group_id
            ",
        )
        .bind(group.title.get())
        .bind(group.slug.get())
        .bind(&group.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::GroupSlugTaken(group.slug.clone())
            } else {
                err.into()
            }
        })?;

        debug!(group_id, slug = %group.slug, "Created group");
        Ok(group_id.into())
    }

    pub async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let record = query_as::<_, FullPostRecord>(&format!(
            "{FULL_POST_SELECT} WHERE posts.post_id = ?1"
        ))
        .bind(post_id.get())
        .fetch_optional(&self.pool)
        .await?;

        let post = record.map(Post::try_from).transpose()?;
        Ok(post)
    }

    pub async fn count_posts(&self, filter: PostFilter) -> Result<u64> {
        let count = query_scalar::<_, i64>(
            "
            SELECT
                COUNT(*)
            FROM
                posts
            WHERE
                (?1 IS NULL OR posts.group_id = ?1)
                AND (?2 IS NULL OR posts.author_id = ?2)
            ",
        )
        .bind(filter.group_id())
        .bind(filter.author_id())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.cast_unsigned())
    }

    /// Posts matching `filter`, newest first.
    pub async fn fetch_posts(&self, filter: PostFilter, offset: u64, limit: u64) -> Result<Vec<Post>> {
        let records = query_as::<_, FullPostRecord>(&format!(
            "{FULL_POST_SELECT}
            WHERE
                (?1 IS NULL OR posts.group_id = ?1)
                AND (?2 IS NULL OR posts.author_id = ?2)
            ORDER BY
                posts.created_at DESC,
                posts.post_id DESC
            LIMIT ?3 OFFSET ?4"
        ))
        .bind(filter.group_id())
        .bind(filter.author_id())
        .bind(limit.cast_signed())
        .bind(offset.cast_signed())
        .fetch_all(&self.pool)
        .await?;

        let posts = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        Ok(posts)
    }

    pub async fn create_post(
        &self,
        post: &PostContent,
        author: Id<UserMarker>,
    ) -> Result<Id<PostMarker>> {
        let post_id = query_scalar::<_, i64>(
            "
            INSERT INTO posts (text, created_at, author_id, group_id, image)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING posts.post_id
            ",
        )
        .bind(post.text.get())
        .bind(to_primitive(UtcDateTime::now()))
        .bind(author.get())
        .bind(post.group.map(Id::get))
        .bind(post.image.as_deref())
        .fetch_one(&self.pool)
        .await?;

        debug!(post_id, author_id = author.get(), "Created post");
        Ok(post_id.into())
    }

    /// Replaces the author-chosen content of a post. The author itself is
    /// never touched. Returns whether the post existed.
    pub async fn update_post(&self, post_id: Id<PostMarker>, post: &PostContent) -> Result<bool> {
        let result = query(
            "
            UPDATE posts
            SET
                text = ?2,
                group_id = ?3,
                image = ?4
            WHERE
                posts.post_id = ?1
            ",
        )
        .bind(post_id.get())
        .bind(post.text.get())
        .bind(post.group.map(Id::get))
        .bind(post.image.as_deref())
        .execute(&self.pool)
        .await?;

        debug!(post_id = post_id.get(), "Updated post");
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_auth(&self, authentication: &Authentication) -> Result<()> {
        query(
            "
            INSERT INTO sessions (token_hash, user_id, created_at, expires_after_seconds)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&authentication.token_hash.0[..])
        .bind(authentication.user.get())
        .bind(to_primitive(authentication.created_at))
        .bind(
            authentication
                .expires_after
                .map(|duration| duration.whole_seconds()),
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn fetch_auth(&self, token_hash: &AuthTokenHash) -> Result<Option<Authentication>> {
        let record = query_as::<_, AuthenticationRecord>(
            "
            SELECT
                sessions.user_id,
                sessions.token_hash,
                sessions.created_at,
                sessions.expires_after_seconds
            FROM
                sessions
            WHERE
                sessions.token_hash = ?1
            ",
        )
        .bind(&token_hash.0[..])
        .fetch_optional(&self.pool)
        .await?;

        let authentication = record.map(Authentication::try_from).transpose()?;
        Ok(authentication)
    }

    pub async fn delete_auth(&self, token_hash: &AuthTokenHash) -> Result<()> {
        query(
            "
            DELETE FROM sessions
            WHERE
                sessions.token_hash = ?1
            ",
        )
        .bind(&token_hash.0[..])
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
