//! Per-chat session state. Lives only as long as the process.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Identity a session is keyed by (the Telegram chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatKey(pub i64);

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub resume_text: Option<String>,
    /// Set only when uploads are retained on disk.
    pub resume_path: Option<PathBuf>,
    /// Only meaningful once `resume_text` is present.
    pub last_job_description: Option<String>,
}

impl Session {
    pub fn has_resume(&self) -> bool {
        self.resume_text.is_some()
    }

    /// Resume and job description, when both are present.
    pub fn comparison_inputs(&self) -> Option<(&str, &str)> {
        Some((
            self.resume_text.as_deref()?,
            self.last_job_description.as_deref()?,
        ))
    }
}

/// Key-value session storage, injected into `AppState`.
/// Swap the in-memory map for a durable store without touching the handlers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, chat: ChatKey) -> Option<Session>;

    /// Creates the session if needed and replaces the resume.
    async fn set_resume(&self, chat: ChatKey, text: String, path: Option<PathBuf>);

    /// No-op for chats that have no session yet.
    async fn set_last_job_description(&self, chat: ChatKey, text: String);

    async fn clear_last_job_description(&self, chat: ChatKey);
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<ChatKey, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, chat: ChatKey) -> Option<Session> {
        self.sessions.read().await.get(&chat).cloned()
    }

    async fn set_resume(&self, chat: ChatKey, text: String, path: Option<PathBuf>) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(chat).or_default();
        session.resume_text = Some(text);
        session.resume_path = path;
    }

    async fn set_last_job_description(&self, chat: ChatKey, text: String) {
        if let Some(session) = self.sessions.write().await.get_mut(&chat) {
            session.last_job_description = Some(text);
        }
    }

    async fn clear_last_job_description(&self, chat: ChatKey) {
        if let Some(session) = self.sessions.write().await.get_mut(&chat) {
            session.last_job_description = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: ChatKey = ChatKey(1);
    const BOB: ChatKey = ChatKey(2);

    #[tokio::test]
    async fn test_get_unknown_chat_is_none() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(ALICE).await, None);
    }

    #[tokio::test]
    async fn test_set_resume_creates_session() {
        let store = InMemorySessionStore::new();
        store.set_resume(ALICE, "cv".into(), None).await;
        let session = store.get(ALICE).await.unwrap();
        assert_eq!(session.resume_text.as_deref(), Some("cv"));
        assert_eq!(session.last_job_description, None);
    }

    #[tokio::test]
    async fn test_job_description_ignored_without_session() {
        let store = InMemorySessionStore::new();
        store.set_last_job_description(ALICE, "jd".into()).await;
        assert_eq!(store.get(ALICE).await, None);
    }

    #[tokio::test]
    async fn test_job_description_overwritten_and_cleared() {
        let store = InMemorySessionStore::new();
        store.set_resume(ALICE, "cv".into(), None).await;
        store.set_last_job_description(ALICE, "first".into()).await;
        store.set_last_job_description(ALICE, "second".into()).await;
        assert_eq!(
            store.get(ALICE).await.unwrap().comparison_inputs(),
            Some(("cv", "second"))
        );

        store.clear_last_job_description(ALICE).await;
        let session = store.get(ALICE).await.unwrap();
        assert_eq!(session.resume_text.as_deref(), Some("cv"));
        assert_eq!(session.comparison_inputs(), None);
    }

    #[tokio::test]
    async fn test_new_resume_keeps_job_description() {
        let store = InMemorySessionStore::new();
        store.set_resume(ALICE, "old".into(), None).await;
        store.set_last_job_description(ALICE, "jd".into()).await;
        store
            .set_resume(ALICE, "new".into(), Some(PathBuf::from("/tmp/r.pdf")))
            .await;
        let session = store.get(ALICE).await.unwrap();
        assert_eq!(session.comparison_inputs(), Some(("new", "jd")));
        assert_eq!(session.resume_path, Some(PathBuf::from("/tmp/r.pdf")));
    }

    #[tokio::test]
    async fn test_chats_are_independent() {
        let store = InMemorySessionStore::new();
        store.set_resume(ALICE, "alice cv".into(), None).await;
        store.set_last_job_description(ALICE, "jd".into()).await;
        store.set_resume(BOB, "bob cv".into(), None).await;

        store.clear_last_job_description(BOB).await;

        assert_eq!(
            store.get(ALICE).await.unwrap().comparison_inputs(),
            Some(("alice cv", "jd"))
        );
        assert_eq!(store.get(BOB).await.unwrap().last_job_description, None);
    }
}
