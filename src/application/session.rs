// Session context - the "data uploaded" flag that gates analytics pages
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub data_uploaded: bool,
}

impl SessionContext {
    pub fn reset(&mut self) {
        self.data_uploaded = false;
    }
}

/// Explicit per-user sessions. Pages receive the registry by reference and
/// check the flag before fetching anything.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionContext>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// New-session start: the upload flag never carries over
    pub async fn start(&self, username: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(username.to_string()).or_default().reset();
        tracing::info!("Started session for {}", username);
    }

    pub async fn mark_uploaded(&self, username: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(username.to_string()).or_default().data_uploaded = true;
    }

    pub async fn reset(&self, username: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(username) {
            session.reset();
        }
    }

    pub async fn is_data_uploaded(&self, username: &str) -> bool {
        self.sessions
            .read()
            .await
            .get(username)
            .map(|s| s.data_uploaded)
            .unwrap_or(false)
    }
}
