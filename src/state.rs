use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::auth::{jwt::JwtKeys, password};
use crate::config::AppConfig;
use crate::posts::repo::{PgPostStore, PostStore};
use crate::users::repo::{PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub jwt: Arc<JwtKeys>,
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        tokio::task::spawn_blocking(password::prepare_decoy)
            .await
            .context("prepare decoy hash")?;

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        let users = Arc::new(PgUserStore::new(db.clone())) as Arc<dyn UserStore>;
        let posts = Arc::new(PgPostStore::new(db)) as Arc<dyn PostStore>;
        Ok(Self::from_parts(&config, users, posts))
    }

    pub fn from_parts(
        config: &AppConfig,
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
    ) -> Self {
        Self {
            jwt: Arc::new(JwtKeys::new(&config.jwt)),
            users,
            posts,
        }
    }
}
