// src/services/conversation.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

/// Persona prepended to every multi-turn prompt.
pub const SYSTEM_PROMPT: &str = "You are a motivational speaker and should provide a motivational \
response to the user. If the user emotions are in unstable state, you should provide a \
motivational response and suggest a best song to motivate them. For greetings like hi and \
hello, respond with friendly greetings.";

/// Number of earlier messages replayed into the prompt.
pub const HISTORY_WINDOW: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Bot => "Assistant",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

#[derive(Clone, Debug)]
struct Conversation {
    turns: Vec<Turn>,
    last_active: Instant,
}

impl Conversation {
    fn new() -> Self {
        Self {
            turns: Vec::new(),
            last_active: Instant::now(),
        }
    }
}

/// In-memory conversation history keyed by chat id, dropped after `ttl` idle.
#[derive(Clone)]
pub struct ConversationStore {
    inner: Arc<RwLock<HashMap<String, Conversation>>>,
    ttl: Duration,
}

impl Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ConversationStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // Start an empty conversation and return its id.
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), Conversation::new());
        id
    }

    /// Append a turn, creating the conversation if needed. Returns the new length.
    pub async fn append(&self, chat_id: &str, role: Role, content: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard.entry(chat_id.to_string()).or_insert_with(Conversation::new);
        entry.turns.push(Turn {
            role,
            content: content.into(),
        });
        entry.last_active = Instant::now();
        entry.turns.len()
    }

    /// The last `limit` turns, oldest first. Unknown ids have no history.
    pub async fn recent(&self, chat_id: &str, limit: usize) -> Vec<Turn> {
        let guard = self.inner.read().await;
        guard
            .get(chat_id)
            .map(|c| {
                let start = c.turns.len().saturating_sub(limit);
                c.turns[start..].to_vec()
            })
            .unwrap_or_default()
    }

    /// Remove conversations idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, c| now.duration_since(c.last_active) < self.ttl);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Render the persona, prior turns and the new message as a plain transcript
/// ending on an open assistant line for the model to continue.
pub fn build_prompt(history: &[Turn], user_msg: &str) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT);
    prompt.push_str("\n\n");
    for turn in history {
        prompt.push_str(turn.role.label());
        prompt.push_str(": ");
        prompt.push_str(turn.content.trim());
        prompt.push('\n');
    }
    prompt.push_str("User: ");
    prompt.push_str(user_msg.trim());
    prompt.push_str("\nAssistant:");
    prompt
}

/// Pull the assistant's answer out of a completion that may echo the prompt
/// and run on into an invented next user line.
pub fn extract_reply(prompt: &str, generated: &str) -> String {
    let continuation = generated.strip_prefix(prompt).unwrap_or(generated);
    let end = continuation.find("\nUser:").unwrap_or(continuation.len());
    continuation[..end].trim().to_string()
}
