// Connection book - pending requests and accepted connections of the signed-in user
//
// pending --accept--> accepted, pending --decline--> removed. Nothing returns to pending.

use tracing::{debug, info};

use crate::core::{EntityId, Timestamp};
use crate::error::{AppError, AppResult};
use crate::models::{Connection, ConnectionStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionBook {
    pending: Vec<Connection>,
    accepted: Vec<Connection>,
}

impl ConnectionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both collections; records are sorted into the right one by status
    pub fn load(&mut self, connections: impl IntoIterator<Item = Connection>) {
        self.pending.clear();
        self.accepted.clear();
        for connection in connections {
            match connection.status {
                ConnectionStatus::Pending => self.pending.push(connection),
                ConnectionStatus::Accepted => self.accepted.push(connection),
                ConnectionStatus::Declined => {
                    debug!("Skipping declined connection {}", connection.id)
                }
            }
        }
    }

    /// Moves a pending request into accepted. Unknown ids are a no-op returning `None`.
    pub fn accept(&mut self, connection_id: &EntityId) -> Option<&Connection> {
        let index = self.pending.iter().position(|c| &c.id == connection_id)?;
        let mut connection = self.pending.remove(index);
        connection.status = ConnectionStatus::Accepted;
        info!("Accepted connection request {}", connection.id);
        self.accepted.push(connection);
        self.accepted.last()
    }

    /// Drops a pending request. Returns whether anything was removed.
    pub fn decline(&mut self, connection_id: &EntityId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|c| &c.id != connection_id);
        let removed = self.pending.len() != before;
        if removed {
            info!("Declined connection request {}", connection_id);
        }
        removed
    }

    /// Records an outgoing request from `from` to `to`
    pub fn request(
        &mut self,
        id: EntityId,
        from: &EntityId,
        to: &EntityId,
        now: Timestamp,
    ) -> AppResult<&Connection> {
        if from == to {
            return Err(AppError::BadRequest("cannot connect to yourself".to_string()));
        }
        if self.between(from, to).is_some() {
            return Err(AppError::Conflict(format!(
                "connection between {} and {} already exists",
                from, to
            )));
        }
        self.pending.push(Connection {
            id,
            user_id: from.clone(),
            connected_user_id: to.clone(),
            status: ConnectionStatus::Pending,
            created_at: now,
        });
        Ok(&self.pending[self.pending.len() - 1])
    }

    /// Any pending or accepted edge linking the two users, in either direction
    pub fn between(&self, a: &EntityId, b: &EntityId) -> Option<&Connection> {
        self.pending
            .iter()
            .chain(self.accepted.iter())
            .find(|c| c.links(a, b))
    }

    pub fn pending(&self) -> &[Connection] {
        &self.pending
    }

    pub fn accepted(&self) -> &[Connection] {
        &self.accepted
    }

    pub fn is_pending(&self, connection_id: &EntityId) -> bool {
        self.pending.iter().any(|c| &c.id == connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: &str, from: &str, to: &str) -> Connection {
        Connection {
            id: EntityId::from(id),
            user_id: EntityId::from(from),
            connected_user_id: EntityId::from(to),
            status: ConnectionStatus::Pending,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_accept_then_decline_is_noop() {
        let mut book = ConnectionBook::new();
        book.load(vec![pending("R1", "2", "1")]);

        let accepted = book.accept(&EntityId::from("R1")).cloned().unwrap();
        assert_eq!(accepted.status, ConnectionStatus::Accepted);
        assert!(book.pending().is_empty());
        assert_eq!(book.accepted().len(), 1);

        assert!(!book.is_pending(&EntityId::from("R1")));
        assert!(!book.decline(&EntityId::from("R1")));
        assert_eq!(book.accepted().len(), 1);
    }

    #[test]
    fn test_decline_removes_without_accepting() {
        let mut book = ConnectionBook::new();
        book.load(vec![pending("R1", "2", "1"), pending("R2", "3", "1")]);
        assert!(book.decline(&EntityId::from("R1")));
        assert_eq!(book.pending().len(), 1);
        assert!(book.accepted().is_empty());
    }

    #[test]
    fn test_accept_unknown_id_is_silent() {
        let mut book = ConnectionBook::new();
        assert!(book.accept(&EntityId::from("missing")).is_none());
    }

    #[test]
    fn test_request_refuses_existing_pair() {
        let mut book = ConnectionBook::new();
        book.load(vec![pending("R1", "2", "1")]);
        let me = EntityId::from("1");
        let other = EntityId::from("2");
        let result = book.request(EntityId::from("R9"), &me, &other, Timestamp::now());
        assert!(matches!(result, Err(AppError::Conflict(_))));
        let result = book.request(EntityId::from("R9"), &me, &me, Timestamp::now());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
