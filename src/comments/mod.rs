//! Comment Repository
//!
//! Append-only storage for user comments. Records are validated before
//! they reach a repository; repositories only assign identity and persist.

mod memory;
mod mysql;

use async_trait::async_trait;

use crate::error::RepoError;
use crate::models::{Comment, NewComment};

pub use memory::MemoryCommentRepository;
pub use mysql::MySqlCommentRepository;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persists `comment` and returns the stored record with its identity.
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError>;
}
