// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppError;
use crate::services::conversation::ConversationStore;
use crate::services::generator::GenerationService;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub generator: GenerationService,
    pub conversations: ConversationStore,
    pub max_message_bytes: usize,
}

impl AppState {
    pub fn new(
        generator: GenerationService,
        conversation_ttl: Duration,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            generator,
            conversations: ConversationStore::new(conversation_ttl),
            max_message_bytes,
        }
    }

    /// Reject prompts over the configured size before they reach the generator.
    pub fn check_message_len(&self, message: &str) -> Result<(), AppError> {
        if message.len() > self.max_message_bytes {
            return Err(AppError::MessageTooLong {
                len: message.len(),
                limit: self.max_message_bytes,
            });
        }
        Ok(())
    }
}
