// In-progress resume drafts: persistence, per-request sessions and
// generation-assisted form filling.

pub mod assist;
pub mod handlers;
pub mod session;
pub mod store;

pub use store::{DraftStore, MemoryDraftStore, RedisDraftStore};
