//! Storage-level types. These map directly to what lives in Redis and stay
//! distinct from the API types in `api.rs` to keep the store layer independent.

use std::collections::HashMap;

/// A comment identifier: seconds since the Unix epoch at allocation time.
/// Doubles as the primary key and the chronological sort score.
pub type CommentId = i64;

/// One comment thread, scoped to a single page.
///
/// Derived from a URL's authority and path. No normalization is applied:
/// callers that submit inconsistent URLs get fragmented threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreadRef {
    pub host: String,
    pub path: String,
}

/// The full stored comment record, keyed by `(thread, id)`.
///
/// Written once at submission and never mutated. Field names in the store
/// hash match the Akismet form parameter names so the record can be
/// submitted for classification as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentRecord {
    pub permalink: String,
    pub user_ip: String,
    pub user_agent: String,
    pub referrer: String,
    pub author: String,
    pub author_email: String,
    pub author_url: String,
    pub content: String,
}

impl CommentRecord {
    /// Field-name/value pairs as stored in the hash and as posted to the
    /// classifier.
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("permalink", self.permalink.as_str()),
            ("user_ip", self.user_ip.as_str()),
            ("user_agent", self.user_agent.as_str()),
            ("referrer", self.referrer.as_str()),
            ("comment_author", self.author.as_str()),
            ("comment_author_email", self.author_email.as_str()),
            ("comment_author_url", self.author_url.as_str()),
            ("comment_content", self.content.as_str()),
        ]
    }

    /// Rebuild a record from a stored hash. Missing fields come back empty.
    pub fn from_fields(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).cloned().unwrap_or_default();
        Self {
            permalink: get("permalink"),
            user_ip: get("user_ip"),
            user_agent: get("user_agent"),
            referrer: get("referrer"),
            author: get("comment_author"),
            author_email: get("comment_author_email"),
            author_url: get("comment_author_url"),
            content: get("comment_content"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fields_roundtrip() {
        let record = CommentRecord {
            permalink: "https://example.com/post".into(),
            user_ip: "203.0.113.7".into(),
            user_agent: "Mozilla/5.0".into(),
            referrer: "https://example.com/".into(),
            author: "a".into(),
            author_email: "a@example.com".into(),
            author_url: "https://a.example".into(),
            content: "hello".into(),
        };

        let map: HashMap<String, String> = record
            .fields()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(CommentRecord::from_fields(&map), record);
    }

    #[test]
    fn missing_fields_come_back_empty() {
        let map = HashMap::from([("comment_author".to_string(), "a".to_string())]);
        let record = CommentRecord::from_fields(&map);
        assert_eq!(record.author, "a");
        assert_eq!(record.content, "");
    }
}
