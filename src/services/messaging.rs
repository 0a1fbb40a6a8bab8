// Direct messaging - conversations of the signed-in user, keyed by the other participant

use tracing::debug;

use crate::core::{EntityId, Timestamp};
use crate::error::{AppError, AppResult};
use crate::framework::filter_engine::text_contains;
use crate::infrastructure::EntityStore;
use crate::models::{Message, User};

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub participant_id: EntityId,
    /// Oldest first
    pub messages: Vec<Message>,
    pub unread_count: u32,
}

impl Conversation {
    fn new(participant_id: EntityId) -> Self {
        Self {
            participant_id,
            messages: Vec::new(),
            unread_count: 0,
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn last_activity(&self) -> Option<Timestamp> {
        self.last_message().map(|m| m.created_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inbox {
    conversations: Vec<Conversation>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the inbox from direct messages involving `viewer`; group and
    /// unrelated messages are skipped.
    pub fn load(&mut self, viewer: &EntityId, messages: impl IntoIterator<Item = Message>) {
        self.conversations.clear();
        for message in messages {
            let Some(peer) = message.peer_of(viewer).cloned() else {
                debug!("Skipping message {} not addressed to {}", message.id, viewer);
                continue;
            };
            self.conversation_mut(&peer).messages.push(message);
        }
        for conversation in &mut self.conversations {
            conversation.messages.sort_by_key(|m| m.created_at);
        }
        self.sort();
    }

    /// Most recently active first
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, participant: &EntityId) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|c| &c.participant_id == participant)
    }

    /// Conversations whose participant name contains `text` (case-insensitive)
    pub fn search<'a>(&'a self, text: &str, users: &EntityStore<User>) -> Vec<&'a Conversation> {
        let needle = text.to_lowercase();
        self.conversations
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || users
                        .get(&c.participant_id)
                        .map(|u| text_contains(&u.name, &needle))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Marks the conversation read and returns its history
    pub fn open(&mut self, participant: &EntityId) -> AppResult<&[Message]> {
        let conversation = self
            .conversations
            .iter_mut()
            .find(|c| &c.participant_id == participant)
            .ok_or_else(|| AppError::NotFound(format!("conversation with {}", participant)))?;
        conversation.unread_count = 0;
        Ok(&conversation.messages)
    }

    /// Appends an outgoing message. Content is trimmed; blank messages are refused.
    pub fn send(
        &mut self,
        id: EntityId,
        sender: &EntityId,
        receiver: &EntityId,
        content: &str,
        now: Timestamp,
    ) -> AppResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("message content is empty".to_string()));
        }
        if !receiver.is_valid() {
            return Err(AppError::BadRequest("no conversation selected".to_string()));
        }

        let message = Message {
            id,
            sender_id: sender.clone(),
            receiver_id: Some(receiver.clone()),
            group_id: None,
            content: content.to_string(),
            created_at: now,
        };
        self.conversation_mut(receiver).messages.push(message.clone());
        self.sort();
        Ok(message)
    }

    /// Appends an incoming message and bumps the unread counter
    pub fn receive(&mut self, viewer: &EntityId, message: Message) -> AppResult<()> {
        let peer = message
            .peer_of(viewer)
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("message {} is not for {}", message.id, viewer)))?;
        let incoming = &message.sender_id != viewer;
        let conversation = self.conversation_mut(&peer);
        conversation.messages.push(message);
        if incoming {
            conversation.unread_count += 1;
        }
        self.sort();
        Ok(())
    }

    /// Overrides the unread counter of an existing conversation.
    /// Returns false when there is no conversation with `participant`.
    pub fn set_unread(&mut self, participant: &EntityId, count: u32) -> bool {
        match self
            .conversations
            .iter_mut()
            .find(|c| &c.participant_id == participant)
        {
            Some(conversation) => {
                conversation.unread_count = count;
                true
            }
            None => false,
        }
    }

    pub fn unread_total(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    fn conversation_mut(&mut self, participant: &EntityId) -> &mut Conversation {
        let index = match self
            .conversations
            .iter()
            .position(|c| &c.participant_id == participant)
        {
            Some(index) => index,
            None => {
                self.conversations.push(Conversation::new(participant.clone()));
                self.conversations.len() - 1
            }
        };
        &mut self.conversations[index]
    }

    fn sort(&mut self) {
        self.conversations
            .sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(minute: u32) -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2024, 1, 25, 10, minute, 0).unwrap())
    }

    fn message(id: &str, from: &str, to: &str, minute: u32) -> Message {
        Message {
            id: EntityId::from(id),
            sender_id: EntityId::from(from),
            receiver_id: Some(EntityId::from(to)),
            group_id: None,
            content: format!("message {}", id),
            created_at: at(minute),
        }
    }

    #[test]
    fn test_load_groups_by_peer_and_orders_history() {
        let me = EntityId::from("1");
        let mut inbox = Inbox::new();
        inbox.load(
            &me,
            vec![
                message("m2", "1", "2", 5),
                message("m1", "2", "1", 0),
                message("m3", "3", "1", 20),
                message("x", "4", "5", 30),
            ],
        );
        assert_eq!(inbox.conversations().len(), 2);
        assert_eq!(inbox.conversations()[0].participant_id.as_str(), "3");
        let with_two = inbox.conversation(&EntityId::from("2")).unwrap();
        let ids: Vec<_> = with_two.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_send_trims_and_refuses_blank() {
        let me = EntityId::from("1");
        let peer = EntityId::from("2");
        let mut inbox = Inbox::new();
        let sent = inbox
            .send(EntityId::from("m1"), &me, &peer, "  see you at 6  ", at(1))
            .unwrap();
        assert_eq!(sent.content, "see you at 6");
        assert!(matches!(
            inbox.send(EntityId::from("m2"), &me, &peer, "   ", at(2)),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(inbox.conversation(&peer).unwrap().messages.len(), 1);
    }

    #[test]
    fn test_receive_counts_unread_until_opened() {
        let me = EntityId::from("1");
        let peer = EntityId::from("2");
        let mut inbox = Inbox::new();
        inbox.receive(&me, message("m1", "2", "1", 0)).unwrap();
        inbox.receive(&me, message("m2", "2", "1", 1)).unwrap();
        assert_eq!(inbox.unread_total(), 2);
        assert_eq!(inbox.open(&peer).unwrap().len(), 2);
        assert_eq!(inbox.unread_total(), 0);
    }

    #[test]
    fn test_set_unread_only_touches_existing_conversations() {
        let me = EntityId::from("1");
        let mut inbox = Inbox::new();
        inbox.load(&me, vec![message("m1", "2", "1", 0)]);
        assert!(inbox.set_unread(&EntityId::from("2"), 3));
        assert!(!inbox.set_unread(&EntityId::from("9"), 1));
        assert_eq!(inbox.unread_total(), 3);
    }
}
