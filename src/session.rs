//! Per-chat ephemeral choice-set storage
//!
//! Explicit store keyed by chat identity, purely in-memory and scoped to the
//! process lifetime. A new submission for a chat discards the previous
//! choice set outright, so stale indices become invalid immediately.

use dashmap::DashMap;
use teloxide::types::ChatId;

use crate::core::error::SessionError;
use crate::extract::formats::{Choice, ChoiceSet};

/// Concurrent map of chat id to its current choice set.
///
/// DashMap gives per-shard locking, which is all the mutual exclusion a
/// per-chat entry needs; there is no global lock and no cross-session state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<ChatId, ChoiceSet>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `set` for `chat_id`, replacing any previous set wholesale.
    pub fn put_choices(&self, chat_id: ChatId, set: ChoiceSet) {
        log::info!("Storing {} format choices for chat {}", set.len(), chat_id);
        self.sessions.insert(chat_id, set);
    }

    /// Resolves a selection index against the chat's current choice set.
    pub fn choice(&self, chat_id: ChatId, index: usize) -> Result<Choice, SessionError> {
        let set = self.sessions.get(&chat_id).ok_or(SessionError::NoSuchSession)?;
        set.get(index)
            .cloned()
            .ok_or(SessionError::IndexOutOfRange { index, len: set.len() })
    }
}
