use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{posts::repo_types::PostWithAuthor, users::repo_types::PublicUser};

pub const CONTENT_MAX: usize = 1000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub likes: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author: PublicUser,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(p: PostWithAuthor) -> Self {
        Self {
            id: p.post.id,
            content: p.post.content,
            author_id: p.post.author_id,
            likes: p.post.likes,
            created_at: p.post.created_at,
            author: p.author,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub id: Uuid,
    pub likes: i64,
}
