// Optimistic mutations - apply locally, confirm remotely, roll back on rejection

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::EntityId;
use crate::error::AppResult;
use crate::infrastructure::traits::MutationSink;
use crate::models::{Club, Connection, Message, RelationshipKind, RsvpStatus, StudyGroup};

/// Description of a local change, handed to the sink after it is applied
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    Membership {
        relationship: RelationshipKind,
        entity_id: EntityId,
        joined: bool,
    },
    Rsvp {
        event_id: EntityId,
        status: Option<RsvpStatus>,
    },
    AcceptConnection {
        connection_id: EntityId,
    },
    DeclineConnection {
        connection_id: EntityId,
    },
    RequestConnection {
        connection: Connection,
    },
    CreateGroup {
        group: StudyGroup,
    },
    CreateClub {
        club: Club,
    },
    SendMessage {
        message: Message,
    },
}

impl Mutation {
    pub fn label(&self) -> String {
        match self {
            Mutation::Membership { relationship, entity_id, joined } => format!(
                "{} {} {}",
                relationship.as_str(),
                entity_id,
                if *joined { "join" } else { "leave" }
            ),
            Mutation::Rsvp { event_id, status } => format!(
                "rsvp {} {}",
                event_id,
                status.map(|s| s.as_str()).unwrap_or("cleared")
            ),
            Mutation::AcceptConnection { connection_id } => format!("accept {}", connection_id),
            Mutation::DeclineConnection { connection_id } => format!("decline {}", connection_id),
            Mutation::RequestConnection { connection } => format!("request {}", connection.id),
            Mutation::CreateGroup { group } => format!("create group {}", group.id),
            Mutation::CreateClub { club } => format!("create club {}", club.id),
            Mutation::SendMessage { message } => format!("send message {}", message.id),
        }
    }
}

/// Runs `apply` against `state`, then commits the returned mutation through `sink`.
///
/// If `apply` fails nothing is committed and the state is whatever `apply` left
/// (mutators validate before changing anything). If the sink fails the state is
/// restored to the snapshot taken before `apply` and the sink's error is returned.
pub async fn run_optimistic<S, T, F>(state: &mut S, sink: &dyn MutationSink, apply: F) -> AppResult<T>
where
    S: Clone,
    F: FnOnce(&mut S) -> AppResult<(T, Mutation)>,
{
    let snapshot = state.clone();
    let (out, mutation) = apply(state)?;
    match sink.commit(&mutation).await {
        Ok(()) => {
            debug!("Committed {}", mutation.label());
            Ok(out)
        }
        Err(err) => {
            warn!("Rolling back {}: {}", mutation.label(), err);
            *state = snapshot;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;

    struct RejectingSink;

    #[async_trait]
    impl MutationSink for RejectingSink {
        async fn commit(&self, _mutation: &Mutation) -> AppResult<()> {
            Err(AppError::SyncFailed("backend unavailable".to_string()))
        }
    }

    fn bump(counter: &mut Vec<u32>) -> AppResult<(usize, Mutation)> {
        counter.push(1);
        Ok((
            counter.len(),
            Mutation::AcceptConnection {
                connection_id: EntityId::from("R1"),
            },
        ))
    }

    #[tokio::test]
    async fn test_rejected_commit_restores_snapshot() {
        let mut state = vec![0u32];
        let result = run_optimistic(&mut state, &RejectingSink, bump).await;
        assert!(matches!(result, Err(AppError::SyncFailed(_))));
        assert_eq!(state, vec![0]);
    }

    #[tokio::test]
    async fn test_accepted_commit_keeps_change() {
        let mut state = vec![0u32];
        let len = run_optimistic(&mut state, &crate::infrastructure::LocalOnlySink, bump)
            .await
            .unwrap();
        assert_eq!(len, 2);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_mutation_serializes_with_kind_tag() {
        let mutation = Mutation::Rsvp {
            event_id: EntityId::from("E1"),
            status: Some(RsvpStatus::Going),
        };
        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["kind"], "rsvp");
        assert_eq!(json["status"], "going");
        assert_eq!(mutation.label(), "rsvp E1 going");
    }
}
