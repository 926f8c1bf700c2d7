//! In-process comment store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CommentRepository;
use crate::error::RepoError;
use crate::models::{Comment, NewComment};

/// Vector-backed repository with sequential identities starting at 1.
#[derive(Debug, Default)]
pub struct MemoryCommentRepository {
    comments: RwLock<Vec<Comment>>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored comment, in insertion order.
    pub async fn all(&self) -> Vec<Comment> {
        self.comments.read().await.clone()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        let id = comments.last().map_or(1, |last| last.id + 1);

        let stored = Comment {
            id,
            name: comment.name,
            content: comment.content,
            ip_address: comment.ip_address,
            browser_info: comment.browser_info,
            created_at: comment.created_at,
        };
        comments.push(stored.clone());

        Ok(stored)
    }
}
