// Session state machine
//
// Uninitialized -> Loading -> Authenticated(user) | Anonymous
// sign_in / register -> Authenticated, sign_out -> Anonymous

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::Timestamp;
use crate::error::{AppError, AppResult};
use crate::infrastructure::id_generator::IdGenerator;
use crate::infrastructure::traits::SessionStoreExt;
use crate::models::{ProfileUpdate, User};
use crate::session::session_store::SessionStore;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_GRADUATION_YEAR: i32 = 1950;
const MAX_YEARS_AHEAD: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated(User),
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub email: String,
    pub name: String,
    pub university: String,
    pub major: String,
    pub graduation_year: i32,
}

impl RegistrationForm {
    fn validate(&self, now: Timestamp) -> AppResult<()> {
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(AppError::Validation(format!("invalid email address: {}", self.email)));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        let latest = now.value().year() + MAX_YEARS_AHEAD;
        if !(MIN_GRADUATION_YEAR..=latest).contains(&self.graduation_year) {
            return Err(AppError::Validation(format!(
                "graduation year {} outside {}..={}",
                self.graduation_year, MIN_GRADUATION_YEAR, latest
            )));
        }
        Ok(())
    }
}

pub struct Session {
    store: Arc<dyn SessionStore>,
    key: String,
    state: SessionState,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Loads the persisted identity. Unreadable or corrupt data leaves the
    /// session anonymous instead of failing.
    pub fn restore(&mut self) -> &SessionState {
        self.state = SessionState::Loading;
        self.state = match self.store.get_json::<User>(&self.key) {
            Ok(Some(user)) => {
                info!("Restored session for {}", user.id);
                SessionState::Authenticated(user)
            }
            Ok(None) => {
                debug!("No stored session under {}", self.key);
                SessionState::Anonymous
            }
            Err(e) => {
                warn!("Discarding stored session under {}: {}", self.key, e);
                SessionState::Anonymous
            }
        };
        &self.state
    }

    pub fn sign_in(&mut self, user: User) -> AppResult<&User> {
        self.store.set_json(&self.key, &user)?;
        info!("Signed in {}", user.id);
        self.state = SessionState::Authenticated(user);
        self.current_user()
            .ok_or_else(|| AppError::Internal("session not authenticated after sign-in".to_string()))
    }

    pub fn register(&mut self, form: RegistrationForm, ids: &IdGenerator, now: Timestamp) -> AppResult<&User> {
        form.validate(now)?;
        let user = User {
            id: ids.next_id(),
            email: form.email.trim().to_string(),
            name: form.name.trim().to_string(),
            university: form.university,
            major: form.major,
            graduation_year: form.graduation_year,
            bio: String::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            profile_image: None,
            created_at: now,
        };
        self.sign_in(user)
    }

    /// Merges `update` into the signed-in user. Returns `None` when anonymous.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> AppResult<Option<&User>> {
        let SessionState::Authenticated(user) = &self.state else {
            debug!("Ignoring profile update without a signed-in user");
            return Ok(None);
        };
        let mut updated = user.clone();
        updated.apply(update);
        self.store.set_json(&self.key, &updated)?;
        self.state = SessionState::Authenticated(updated);
        Ok(self.current_user())
    }

    pub fn sign_out(&mut self) -> AppResult<()> {
        self.store.remove(&self.key)?;
        if let Some(user) = self.current_user() {
            info!("Signed out {}", user.id);
        }
        self.state = SessionState::Anonymous;
        Ok(())
    }
}
