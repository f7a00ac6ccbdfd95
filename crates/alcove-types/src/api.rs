use serde::{Deserialize, Serialize};

use crate::models::{CommentId, ThreadRef};

// -- Submission --

/// The raw submission form as posted by the embedded widget. All fields
/// default to empty so that "missing" and "empty" are rejected the same way
/// by the core's validation.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub comment_author: String,
    #[serde(default)]
    pub comment_author_email: String,
    #[serde(default)]
    pub comment_author_url: String,
    #[serde(default)]
    pub comment_content: String,
}

/// A cleaned submission bundle: the form fields plus the request metadata
/// the HTTP layer extracted (client IP, user agent, referrer).
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub url: String,
    pub author: String,
    pub author_email: String,
    pub author_url: String,
    pub content: String,
    pub user_ip: String,
    pub user_agent: String,
    pub referrer: String,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub thread: ThreadRef,
    pub id: CommentId,
    /// Whether the comment was promoted to the public index right away.
    pub approved: bool,
    pub permalink: String,
}

// -- Listing --

/// The part of a comment that goes out through the API. `author` and
/// `content` are HTML-escaped before this is built.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub author: String,
    pub content: String,
}
