//! Draft persistence backends.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeData;

/// Where in-progress resume forms live between requests.
///
/// Carried in `AppState` as `Arc<dyn DraftStore>`.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn load(&self, user_id: Uuid) -> Result<Option<ResumeData>, AppError>;

    async fn save(&self, user_id: Uuid, data: &ResumeData) -> Result<(), AppError>;

    async fn clear(&self, user_id: Uuid) -> Result<(), AppError>;
}

pub fn draft_key(user_id: Uuid) -> String {
    format!("resume_data:{user_id}")
}

/// A stored blob that no longer parses is treated as no draft at all.
fn decode_draft(user_id: Uuid, raw: &str) -> Option<ResumeData> {
    match serde_json::from_str(raw) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("Discarding unreadable draft for user {user_id}: {e}");
            None
        }
    }
}

fn encode_draft(data: &ResumeData) -> Result<String, AppError> {
    serde_json::to_string(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize draft: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// RedisDraftStore
// ────────────────────────────────────────────────────────────────────────────

/// JSON blob per user under `resume_data:{user_id}`.
pub struct RedisDraftStore {
    client: redis::Client,
}

impl RedisDraftStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl DraftStore for RedisDraftStore {
    async fn load(&self, user_id: Uuid) -> Result<Option<ResumeData>, AppError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(draft_key(user_id)).await?;
        Ok(raw.and_then(|raw| decode_draft(user_id, &raw)))
    }

    async fn save(&self, user_id: Uuid, data: &ResumeData) -> Result<(), AppError> {
        let blob = encode_draft(data)?;
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(draft_key(user_id), blob).await?;
        debug!("Saved draft for user {user_id}");
        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(draft_key(user_id)).await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryDraftStore
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store. Drafts are lost on restart.
#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: RwLock<HashMap<Uuid, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self, user_id: Uuid) -> Result<Option<ResumeData>, AppError> {
        let drafts = self.drafts.read().await;
        Ok(drafts
            .get(&user_id)
            .and_then(|raw| decode_draft(user_id, raw)))
    }

    async fn save(&self, user_id: Uuid, data: &ResumeData) -> Result<(), AppError> {
        let blob = encode_draft(data)?;
        self.drafts.write().await.insert(user_id, blob);
        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), AppError> {
        self.drafts.write().await.remove(&user_id);
        Ok(())
    }
}
