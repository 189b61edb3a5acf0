//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{PasswordService, TokenService};
use blog_core::services::{CommentService, PostService, UserService};
use blog_infra::database;
use blog_infra::{
    Argon2PasswordService, JwtConfig, JwtTokenService, SqliteCommentRepository,
    SqlitePostRepository, SqliteUserRepository,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DbConn, DbErr};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub tokens: Arc<dyn TokenService>,
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
}

impl AppState {
    /// Connect to the store, bring the schema up to date and wire the services.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = database::connect(&config.database).await?;

        Migrator::up(&db, None).await?;
        tracing::info!("Database schema is up to date");

        Ok(Self::from_parts(db, config.jwt.clone()))
    }

    /// Wire services around an already migrated connection.
    pub fn from_parts(db: DbConn, jwt: JwtConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let user_repo = Arc::new(SqliteUserRepository::new(db.clone()));
        let post_repo = Arc::new(SqlitePostRepository::new(db.clone()));
        let comment_repo = Arc::new(SqliteCommentRepository::new(db.clone()));

        tracing::info!("Application state initialized");

        Self {
            users: UserService::new(user_repo, passwords, tokens.clone()),
            posts: PostService::new(post_repo.clone()),
            comments: CommentService::new(comment_repo, post_repo),
            tokens,
            db,
        }
    }
}
