use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::posts::repo_types::{Post, PostAuthorRow, PostWithAuthor};

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest first.
    async fn list_recent(&self) -> anyhow::Result<Vec<PostWithAuthor>>;
    /// One author's posts, newest first.
    async fn list_by_author(&self, author_id: Uuid) -> anyhow::Result<Vec<PostWithAuthor>>;
    async fn create(&self, author_id: Uuid, content: &str) -> anyhow::Result<Post>;
    /// Atomically bumps the like counter. `None` if the post does not exist.
    async fn like(&self, post_id: Uuid) -> anyhow::Result<Option<Post>>;
}

#[derive(Clone)]
pub struct PgPostStore {
    db: PgPool,
}

impl PgPostStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT p.id, p.author_id, p.content, p.likes, p.created_at,
           u.name AS author_name, u.email AS author_email,
           u.bio AS author_bio, u.created_at AS author_created_at
      FROM posts p
      JOIN users u ON u.id = p.author_id
"#;

#[async_trait]
impl PostStore for PgPostStore {
    async fn list_recent(&self) -> anyhow::Result<Vec<PostWithAuthor>> {
        let sql = format!("{SELECT_WITH_AUTHOR} ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, PostAuthorRow>(&sql)
            .fetch_all(&self.db)
            .await
            .context("list posts")?;
        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn list_by_author(&self, author_id: Uuid) -> anyhow::Result<Vec<PostWithAuthor>> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE p.author_id = $1 ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, PostAuthorRow>(&sql)
            .bind(author_id)
            .fetch_all(&self.db)
            .await
            .context("list posts by author")?;
        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn create(&self, author_id: Uuid, content: &str) -> anyhow::Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, content)
            VALUES ($1, $2)
            RETURNING id, author_id, content, likes, created_at
            "#,
        )
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.db)
        .await
        .context("insert post")?;
        Ok(post)
    }

    async fn like(&self, post_id: Uuid) -> anyhow::Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
               SET likes = likes + 1
             WHERE id = $1
            RETURNING id, author_id, content, likes, created_at
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.db)
        .await
        .context("like post")?;
        Ok(post)
    }
}
