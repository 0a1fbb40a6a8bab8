// Session - the signed-in identity, threaded explicitly to whoever needs it

pub mod session;
pub mod session_store;

pub use session::{RegistrationForm, Session, SessionState};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
