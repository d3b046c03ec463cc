use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::PublicUser;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// A profile as seen by whoever is asking. Anonymous viewers get no email.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub bio: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub is_own_profile: bool,
}

impl ProfileResponse {
    pub fn for_viewer(user: PublicUser, viewer: Option<Uuid>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: viewer.map(|_| user.email),
            bio: user.bio,
            created_at: user.created_at,
            is_own_profile: viewer == Some(user.id),
        }
    }
}
