use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    config::Config,
    data_seeder::Fixtures,
    error::AppResult,
    services::CampusService,
    session::{FileSessionStore, Session},
};

pub struct AppState {
    pub service: CampusService,
    pub session: Session,
    pub config: Config,
}

impl AppState {
    /// Restores the session, then loads fixtures (if configured) from the
    /// signed-in user's point of view
    pub fn new(config: Config) -> AppResult<Self> {
        let store = Arc::new(FileSessionStore::new(config.session.dir.clone()));
        let mut session = Session::new(store, config.session.key.clone());
        session.restore();

        let mut service = CampusService::new(&config);
        match &config.data.fixtures_path {
            Some(path) => {
                let fixtures = Fixtures::from_path(path)?;
                let viewer = session.current_user().map(|u| u.id.clone());
                service.load_fixtures(fixtures, viewer.as_ref())?;
            }
            None => warn!("FIXTURES_PATH not set, starting with empty collections"),
        }
        info!(
            "App state ready ({})",
            session
                .current_user()
                .map(|u| format!("signed in as {}", u.name))
                .unwrap_or_else(|| "anonymous".to_string())
        );

        Ok(Self {
            service,
            session,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SessionStoreExt;
    use crate::session::SessionStore;

    #[test]
    fn test_new_loads_fixtures_for_restored_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.session.dir = dir.path().to_path_buf();
        config.data.fixtures_path = Some(concat!(env!("CARGO_MANIFEST_DIR"), "/data/fixtures.json").into());

        let fixtures = Fixtures::from_path(config.data.fixtures_path.as_ref().unwrap()).unwrap();
        let john = fixtures.users[0].clone();
        FileSessionStore::new(dir.path())
            .set_json(&config.session.key, &john)
            .unwrap();

        let state = AppState::new(config).unwrap();
        assert_eq!(state.session.current_user().map(|u| u.id.as_str()), Some("1"));
        assert_eq!(state.service.state().inbox.conversations().len(), 2);
        assert!(FileSessionStore::new(dir.path()).get(&state.config.session.key).unwrap().is_some());
    }
}
