use charsheet_core::context::BotContext;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A pushed-update notification waiting for the operator to confirm or
/// dismiss it from the web UI.
#[derive(Debug, Clone, Serialize)]
pub struct PendingUpdate {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl PendingUpdate {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<BotContext>,
    pub updates: Arc<Mutex<Vec<PendingUpdate>>>,
    pub event_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            ctx,
            updates: Arc::new(Mutex::new(Vec::new())),
            event_tx,
        }
    }

    /// Wake any connected SSE clients.
    pub fn notify(&self) {
        let _ = self.event_tx.send(());
    }
}
