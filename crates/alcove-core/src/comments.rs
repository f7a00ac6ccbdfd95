use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use alcove_store::ThreadStore;
use alcove_types::{CommentId, CommentRecord, CommentView, SubmitRequest, Submission, ThreadRef};

use crate::akismet::Classifier;
use crate::error::{Error, Result};
use crate::{enabled, id, thread};

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The comment service: submission, listing and retraction over an injected
/// store and classifier. Holds no mutable state, so one instance is shared
/// across all request handlers.
pub struct Comments {
    store: Arc<dyn ThreadStore>,
    classifier: Classifier,
}

impl Comments {
    pub fn new(store: Arc<dyn ThreadStore>, classifier: Classifier) -> Self {
        Self { store, classifier }
    }

    /// Validate and store a submission, then hand it to the classifier.
    ///
    /// Validation happens before any store access. A classification failure
    /// is logged and swallowed: the comment is already durable and pending,
    /// and losing the verdict must never lose the comment.
    pub async fn submit(&self, req: SubmitRequest) -> Result<Submission> {
        let parsed = Url::parse(&req.url)?;
        let thread = thread::of(&parsed)?;
        // The serialized URL is what we store and redirect to; unlike the
        // raw input it is always header-safe.
        let permalink = parsed.to_string();
        if req.author.is_empty() {
            return Err(Error::MissingField("comment_author"));
        }
        if req.content.is_empty() {
            return Err(Error::MissingField("comment_content"));
        }

        if !enabled::is_enabled(self.store.as_ref(), &thread).await? {
            return Err(Error::Disabled);
        }

        let id = id::allocate(self.store.as_ref(), &thread).await?;
        let record = CommentRecord {
            permalink: permalink.clone(),
            user_ip: req.user_ip,
            user_agent: req.user_agent,
            referrer: req.referrer,
            author: req.author,
            author_email: req.author_email,
            author_url: req.author_url,
            content: req.content,
        };
        self.store.put_comment(&thread, id, &record).await?;

        let approved = match self
            .classifier
            .auto_approve(self.store.as_ref(), &thread, id)
            .await
        {
            Ok(approved) => approved,
            Err(err) => {
                // Just the approval that failed; the comment is stored.
                warn!(
                    "classification failed for {}{} comment {}: {}",
                    thread.host, thread.path, id, err
                );
                false
            }
        };

        if approved {
            info!("new approved comment at {}{}: {}", thread.host, thread.path, id);
        } else {
            info!("new unapproved comment at {}{}: {}", thread.host, thread.path, id);
        }

        Ok(Submission {
            thread,
            id,
            approved,
            permalink,
        })
    }

    /// Approved comments for a thread, chronological ascending, at most
    /// `limit`, with `author` and `content` HTML-escaped for embedding.
    ///
    /// A thread with no approvals yields an empty list. An approved id whose
    /// record cannot be read fails the whole read rather than being skipped.
    pub async fn list(&self, thread: &ThreadRef, limit: usize) -> Result<Vec<CommentView>> {
        let ids = self.store.approved_ids(thread, limit).await?;
        let mut comments = Vec::with_capacity(ids.len());
        for id in ids {
            let record = self
                .store
                .get_comment(thread, id)
                .await?
                .ok_or(Error::CorruptIndex { id })?;
            comments.push(CommentView {
                id,
                author: html_escape::encode_safe(&record.author).into_owned(),
                content: html_escape::encode_safe(&record.content).into_owned(),
            });
        }
        Ok(comments)
    }

    /// Pull a previously approved comment back out of the public index.
    /// The full index and the record are untouched. Returns whether the id
    /// was approved before the call.
    pub async fn retract(&self, thread: &ThreadRef, id: CommentId) -> Result<bool> {
        Ok(self.store.retract(thread, id).await?)
    }
}
