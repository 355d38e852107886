use crate::commands::directory;
use crate::error::Result;
use crate::model::{Session, User};
use crate::store::{KeyValueStore, RecordStore, SESSION};
use tracing::{debug, info};

/// Authenticate and persist the session marker.
pub fn login<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    email: &str,
    secret: &str,
) -> Result<Session> {
    let user = directory::authenticate(store, email, secret)?;
    store.save_one(SESSION, &user)?;
    info!(email = %user.email, "logged in");
    Ok(Session::Authenticated(user))
}

/// Rebuild the session from the persisted marker.
///
/// The stored user is trusted as-is; it is not checked against the directory.
pub fn restore<S: KeyValueStore>(store: &RecordStore<S>) -> Session {
    match store.load_one::<User>(SESSION) {
        Some(user) => {
            debug!(email = %user.email, "restored session");
            Session::Authenticated(user)
        }
        None => Session::Anonymous,
    }
}

pub fn logout<S: KeyValueStore>(store: &mut RecordStore<S>) -> Result<Session> {
    store.remove(SESSION)?;
    info!("logged out");
    Ok(Session::Anonymous)
}
