//! MySQL-backed comment store.

use async_trait::async_trait;
use chrono::SubsecRound;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use super::CommentRepository;
use crate::error::RepoError;
use crate::models::{Comment, NewComment};

#[derive(Clone)]
pub struct MySqlCommentRepository {
    pool: MySqlPool,
}

impl MySqlCommentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
        MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &MySqlPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map(|_| ())
    }

    /// Loads a stored comment. Not exposed over HTTP.
    pub async fn find(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, name, content, ip_address, browser_info, created_at
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(comment)
    }
}

#[async_trait]
impl CommentRepository for MySqlCommentRepository {
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError> {
        // DATETIME(6) keeps microseconds; return what the row will hold
        let created_at = comment.created_at.trunc_subsecs(6);
        let result = sqlx::query(
            r#"
            INSERT INTO comments (name, content, ip_address, browser_info, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.name)
        .bind(&comment.content)
        .bind(&comment.ip_address)
        .bind(&comment.browser_info)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        let id = i64::try_from(result.last_insert_id()).map_err(RepoError::from_persistence)?;

        Ok(Comment {
            id,
            name: comment.name,
            content: comment.content,
            ip_address: comment.ip_address,
            browser_info: comment.browser_info,
            created_at,
        })
    }
}
