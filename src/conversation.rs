use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::profile::Persona;

/// 発言者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: format!("msg-{}", Uuid::new_v4()),
            sender,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// 相談相手との会話
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub persona: Persona,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn last_message_at(&self) -> DateTime<Utc> {
        self.messages
            .last()
            .map(|message| message.timestamp)
            .unwrap_or(self.created_at)
    }
}

/// 上から順に照合し、最初に一致した返答を使う
const REPLIES: &[(&[&str], &str)] = &[
    (
        &["anxious", "anxiety"],
        "It sounds like you're experiencing some anxiety. Remember to take deep breaths and focus on what you can control. Would you like to try a quick grounding exercise together?",
    ),
    (
        &["sad", "depressed"],
        "I'm sorry to hear you're feeling down. Remember that it's okay to have these feelings, and they won't last forever. Is there something specific that triggered these emotions?",
    ),
    (
        &["happy", "good"],
        "I'm glad to hear you're feeling positive! What's contributing to your good mood today?",
    ),
    (
        &["help"],
        "I'm here to support you. Could you tell me more about what you need help with so I can better assist you?",
    ),
];

const DEFAULT_REPLY: &str = "Thank you for sharing that with me. How does that make you feel?";

/// 大文字小文字を区別せずにキーワードを照合して返答を選ぶ
pub fn canned_reply(content: &str) -> &'static str {
    let lowered = content.to_lowercase();
    REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|&(_, reply)| reply)
        .unwrap_or(DEFAULT_REPLY)
}

pub trait ConversationStore: Send + Sync {
    fn create(&self, title: &str, persona: Persona) -> Conversation;
    fn get(&self, id: &str) -> Result<Conversation>;
    /// 最終発言の新しい順
    fn list(&self, limit: usize) -> Vec<Conversation>;
    /// 利用者の発言と返答を追加し、返答を返す
    fn send(&self, id: &str, content: &str) -> Result<Message>;
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<Vec<Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound {
        kind: "conversation",
        id: id.to_string(),
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn create(&self, title: &str, persona: Persona) -> Conversation {
        let conversation = Conversation {
            id: format!("conv-{}", Uuid::new_v4()),
            title: title.to_string(),
            persona,
            created_at: Utc::now(),
            messages: Vec::new(),
        };
        self.conversations.write().push(conversation.clone());
        conversation
    }

    fn get(&self, id: &str) -> Result<Conversation> {
        self.conversations
            .read()
            .iter()
            .find(|conversation| conversation.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn list(&self, limit: usize) -> Vec<Conversation> {
        let mut conversations = self.conversations.read().clone();
        conversations.sort_by_key(|conversation| std::cmp::Reverse(conversation.last_message_at()));
        conversations.truncate(limit);
        conversations
    }

    fn send(&self, id: &str, content: &str) -> Result<Message> {
        let mut conversations = self.conversations.write();
        let conversation = conversations
            .iter_mut()
            .find(|conversation| conversation.id == id)
            .ok_or_else(|| not_found(id))?;
        conversation.messages.push(Message::new(Sender::User, content));
        let reply = Message::new(Sender::Ai, canned_reply(content));
        conversation.messages.push(reply.clone());
        debug!(conversation = %id, messages = conversation.messages.len(), "reply sent");
        Ok(reply)
    }
}
