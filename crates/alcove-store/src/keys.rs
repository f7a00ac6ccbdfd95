//! Redis key schema.
//!
//! Keys for one thread share a `{<ns>://<host><path>}` hash tag so all of a
//! thread's structures land in the same cluster slot.

use alcove_types::{CommentId, ThreadRef};

/// SET of hostnames eligible for fallback enablement.
pub fn auto_enable(ns: &str) -> String {
    format!("{{{ns}}}:auto_enable")
}

/// STRING "true"/"false"; absent means not explicitly set.
pub fn enabled(ns: &str, thread: &ThreadRef) -> String {
    format!("{{{ns}://{}{}}}:enabled", thread.host, thread.path)
}

/// ZSET of every comment id ever allocated for the thread, scored by id.
pub fn all(ns: &str, thread: &ThreadRef) -> String {
    format!("{{{ns}://{}{}}}:all", thread.host, thread.path)
}

/// ZSET of approved comment ids, same scoring. Subset of `all`.
pub fn approved(ns: &str, thread: &ThreadRef) -> String {
    format!("{{{ns}://{}{}}}:approved", thread.host, thread.path)
}

/// HASH holding one comment record.
pub fn comment(ns: &str, thread: &ThreadRef, id: CommentId) -> String {
    format!("{{{ns}://{}{}}}:comment:{id}", thread.host, thread.path)
}
