// Change Notifier - observer contract between the core and whatever renders it

use tokio::sync::watch;
use tracing::debug;

use crate::models::EntityType;

/// Published after every state mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub revision: u64,
    /// `None` for changes that span several collections (fixture load, rollback)
    pub scope: Option<EntityType>,
}

#[derive(Debug)]
pub struct ChangeNotifier {
    tx: watch::Sender<StateChange>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StateChange {
            revision: 0,
            scope: None,
        });
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<StateChange> {
        self.tx.subscribe()
    }

    /// Bumps the revision and wakes subscribers; works with no subscribers
    pub fn notify(&self, scope: Option<EntityType>) -> StateChange {
        self.tx.send_modify(|change| {
            change.revision += 1;
            change.scope = scope;
        });
        let change = *self.tx.borrow();
        debug!(
            "State change {} ({})",
            change.revision,
            scope.map(|s| s.as_str()).unwrap_or("all")
        );
        change
    }

    pub fn current(&self) -> StateChange {
        *self.tx.borrow()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_increases_without_subscribers() {
        let notifier = ChangeNotifier::new();
        notifier.notify(Some(EntityType::Club));
        let change = notifier.notify(None);
        assert_eq!(change.revision, 2);
        assert_eq!(notifier.current().scope, None);
    }

    #[tokio::test]
    async fn test_subscriber_sees_latest_change() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();
        notifier.notify(Some(EntityType::Event));
        rx.changed().await.unwrap();
        let seen = *rx.borrow_and_update();
        assert_eq!(seen.revision, 1);
        assert_eq!(seen.scope, Some(EntityType::Event));
    }
}
