use url::Url;

use alcove_types::ThreadRef;

use crate::error::{Error, Result};

/// Derive the thread identity from an already parsed URL: its authority and
/// path.
///
/// Non-default ports stay part of the host. Nothing else is normalized, so
/// callers must supply consistent URLs or threads silently fragment.
pub fn of(url: &Url) -> Result<ThreadRef> {
    let mut host = url.host_str().ok_or(Error::MissingHost)?.to_string();
    if let Some(port) = url.port() {
        host.push_str(&format!(":{port}"));
    }
    Ok(ThreadRef {
        host,
        path: url.path().to_string(),
    })
}

/// Parse and derive in one step.
pub fn from_url(raw: &str) -> Result<ThreadRef> {
    of(&Url::parse(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_host_and_path() {
        let t = from_url("https://example.com/posts/1").unwrap();
        assert_eq!(t.host, "example.com");
        assert_eq!(t.path, "/posts/1");
    }

    #[test]
    fn keeps_non_default_ports() {
        let t = from_url("http://example.com:8080/p").unwrap();
        assert_eq!(t.host, "example.com:8080");
    }

    #[test]
    fn empty_path_becomes_slash() {
        let t = from_url("https://example.com").unwrap();
        assert_eq!(t.path, "/");
    }

    #[test]
    fn rejects_unparseable_urls() {
        assert!(matches!(from_url("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(from_url(""), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn rejects_urls_without_a_host() {
        assert!(matches!(from_url("mailto:a@b.c"), Err(Error::MissingHost)));
    }
}
