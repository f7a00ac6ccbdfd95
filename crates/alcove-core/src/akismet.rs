use tracing::debug;

use alcove_store::ThreadStore;
use alcove_types::{CommentId, ThreadRef};

use crate::error::{Error, Result};

/// Moderation settings, read once at startup and passed in.
#[derive(Debug, Clone, Default)]
pub struct ModerationConfig {
    /// Akismet API key. `None` disables classification entirely: every
    /// comment stays pending rather than going public unchecked.
    pub akismet_key: Option<String>,
    /// The `blog` value sent with every classification request.
    pub site_url: String,
}

fn check_url(key: &str) -> String {
    format!("https://{key}.rest.akismet.com/1.1/comment-check")
}

/// The body must be a literal boolean token; `true` means spam.
fn parse_verdict(body: &str) -> Result<bool> {
    body.parse::<bool>()
        .map_err(|_| Error::ClassifierProtocol(body.to_string()))
}

/// Binary spam/ham classifier client.
pub struct Classifier {
    http: reqwest::Client,
    endpoint: Option<String>,
    site_url: String,
}

impl Classifier {
    pub fn new(config: ModerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.akismet_key.as_deref().map(check_url),
            site_url: config.site_url,
        }
    }

    /// Point at a non-default classification endpoint (a self-hosted
    /// classifier, or a stub in tests).
    pub fn with_endpoint(endpoint: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: Some(endpoint.into()),
            site_url: site_url.into(),
        }
    }

    /// Classify the stored comment at `(thread, id)` and promote it into the
    /// approved index on a ham verdict.
    ///
    /// Returns whether the comment was newly approved. Without a configured
    /// endpoint this is always `Ok(false)`: unclassified comments fail safe
    /// to pending. The caller treats errors here as non-fatal — the comment
    /// record is already durable and can be reclassified later.
    pub async fn auto_approve(
        &self,
        store: &dyn ThreadStore,
        thread: &ThreadRef,
        id: CommentId,
    ) -> Result<bool> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(false);
        };

        let record = store
            .get_comment(thread, id)
            .await?
            .ok_or(Error::CorruptIndex { id })?;

        let mut form: Vec<(&str, &str)> = vec![("blog", self.site_url.as_str())];
        form.extend(record.fields());

        let body = self
            .http
            .post(endpoint)
            .form(&form)
            .send()
            .await?
            .text()
            .await?;

        if parse_verdict(&body)? {
            debug!("comment {} at {}{} classified as spam", id, thread.host, thread.path);
            return Ok(false);
        }
        Ok(store.approve(thread, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alcove_store::MemoryStore;

    #[test]
    fn check_url_puts_the_key_in_the_subdomain() {
        assert_eq!(
            check_url("abc123"),
            "https://abc123.rest.akismet.com/1.1/comment-check"
        );
    }

    #[test]
    fn verdict_accepts_only_boolean_literals() {
        assert!(parse_verdict("true").unwrap());
        assert!(!parse_verdict("false").unwrap());
        assert!(matches!(
            parse_verdict("Missing required field: blog"),
            Err(Error::ClassifierProtocol(_))
        ));
        assert!(matches!(
            parse_verdict("true\n"),
            Err(Error::ClassifierProtocol(_))
        ));
    }

    #[tokio::test]
    async fn no_key_means_no_approval() {
        let store = MemoryStore::new();
        let thread = ThreadRef {
            host: "example.com".into(),
            path: "/post".into(),
        };
        let classifier = Classifier::new(ModerationConfig::default());
        let approved = classifier.auto_approve(&store, &thread, 100).await.unwrap();
        assert!(!approved);
        assert!(store.approved_ids(&thread, 10).await.unwrap().is_empty());
    }
}
