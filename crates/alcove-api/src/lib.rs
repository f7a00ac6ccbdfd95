pub mod comments;
pub mod health;

use std::sync::Arc;

use alcove_core::Comments;
use alcove_store::ThreadStore;

pub type AppState = Arc<AppStateInner>;

/// State shared across all request handlers.
pub struct AppStateInner {
    pub comments: Comments,
    pub store: Arc<dyn ThreadStore>,
}
