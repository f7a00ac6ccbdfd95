//! Comment storage and moderation logic: thread addressing, enablement
//! resolution, identifier allocation, spam classification and listing.
//! Persistence and the classifier endpoint are injected; this crate holds no
//! authoritative state of its own.

pub mod akismet;
pub mod comments;
pub mod enabled;
pub mod error;
pub mod id;
pub mod thread;

pub use akismet::{Classifier, ModerationConfig};
pub use comments::{Comments, DEFAULT_PAGE_SIZE};
pub use error::{Error, Result};
