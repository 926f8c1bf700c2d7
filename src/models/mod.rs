//! Request and Response models for the gateway API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    CreateCommentRequest, NewComment, ValidationErrors, MAX_CONTENT_LENGTH, MAX_NAME_LENGTH,
};
pub use responses::{Comment, Document, ProblemDetails, WELCOME_MESSAGE};
