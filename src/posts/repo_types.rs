use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::PublicUser;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub likes: i64,
    pub created_at: OffsetDateTime,
}

/// One row of the posts/users join.
#[derive(Debug, FromRow)]
pub struct PostAuthorRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub likes: i64,
    pub created_at: OffsetDateTime,
    pub author_name: String,
    pub author_email: String,
    pub author_bio: String,
    pub author_created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: PublicUser,
}

impl From<PostAuthorRow> for PostWithAuthor {
    fn from(r: PostAuthorRow) -> Self {
        Self {
            author: PublicUser {
                id: r.author_id,
                name: r.author_name,
                email: r.author_email,
                bio: r.author_bio,
                created_at: r.author_created_at,
            },
            post: Post {
                id: r.id,
                author_id: r.author_id,
                content: r.content,
                likes: r.likes,
                created_at: r.created_at,
            },
        }
    }
}
