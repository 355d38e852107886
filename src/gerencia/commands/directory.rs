use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GerenciaError, Result};
use crate::model::User;
use crate::store::{KeyValueStore, RecordStore, USERS};
use tracing::info;

/// Sign-up form contents.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    pub secret: String,
    pub confirmation: String,
}

/// Add a user to the directory.
///
/// Emails are compared exactly (case-sensitive). A rejected registration
/// leaves the directory untouched.
pub fn register<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    registration: Registration,
) -> Result<CmdResult> {
    if registration.email.trim().is_empty() {
        return Err(GerenciaError::InvalidField("email cannot be empty".into()));
    }
    if registration.secret.is_empty() {
        return Err(GerenciaError::InvalidField("password cannot be empty".into()));
    }
    if registration.secret != registration.confirmation {
        return Err(GerenciaError::PasswordMismatch);
    }

    let mut users: Vec<User> = store.load_for_update(USERS)?;
    if users.iter().any(|u| u.email == registration.email) {
        return Err(GerenciaError::DuplicateEmail(registration.email));
    }

    let user = User::new(
        registration.name,
        registration.email,
        registration.tax_id,
        registration.phone,
        registration.secret,
    );
    users.push(user.clone());
    store.save(USERS, &users)?;
    info!(email = %user.email, "registered user");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Account created for {}",
        user.email
    )));
    Ok(result.with_users(vec![user]))
}

/// Find the user matching both email and password.
///
/// The error is the same whether the email is unknown or the password is
/// wrong.
pub fn authenticate<S: KeyValueStore>(
    store: &RecordStore<S>,
    email: &str,
    secret: &str,
) -> Result<User> {
    let users: Vec<User> = store.load(USERS);
    users
        .into_iter()
        .find(|u| u.email == email && u.secret == secret)
        .ok_or(GerenciaError::InvalidCredentials)
}

/// Password-recovery lookup: confirms the account exists. Nothing is sent.
pub fn recover<S: KeyValueStore>(store: &RecordStore<S>, email: &str) -> Result<CmdResult> {
    let users: Vec<User> = store.load(USERS);
    let user = users
        .into_iter()
        .find(|u| u.email == email)
        .ok_or_else(|| GerenciaError::not_found(USERS, email))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Recovery instructions would be sent to {}",
        user.email
    )));
    Ok(result.with_users(vec![user]))
}

pub fn list<S: KeyValueStore>(store: &RecordStore<S>) -> Result<CmdResult> {
    let users: Vec<User> = store.load(USERS);
    Ok(CmdResult::default().with_users(users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn registration(email: &str, secret: &str) -> Registration {
        Registration {
            name: "Ana".into(),
            email: email.into(),
            tax_id: "123.456.789-00".into(),
            phone: "(11) 99999-0000".into(),
            secret: secret.into(),
            confirmation: secret.into(),
        }
    }

    fn store() -> RecordStore<InMemoryStore> {
        RecordStore::new(InMemoryStore::new())
    }

    #[test]
    fn register_appends_user() {
        let mut store = store();
        let result = register(&mut store, registration("a@x.com", "p1")).unwrap();
        assert_eq!(result.users[0].email, "a@x.com");

        let users = list(&store).unwrap().users;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].tax_id, "123.456.789-00");
    }

    #[test]
    fn duplicate_email_is_rejected_without_mutation() {
        let mut store = store();
        register(&mut store, registration("a@x.com", "p1")).unwrap();
        let err = register(&mut store, registration("a@x.com", "other")).unwrap_err();
        assert!(matches!(err, GerenciaError::DuplicateEmail(ref e) if e == "a@x.com"));

        let users = list(&store).unwrap().users;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].secret, "p1");
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let mut store = store();
        register(&mut store, registration("a@x.com", "p1")).unwrap();
        register(&mut store, registration("A@x.com", "p1")).unwrap();
        assert_eq!(list(&store).unwrap().users.len(), 2);
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut store = store();
        let mut reg = registration("a@x.com", "p1");
        reg.confirmation = "p2".into();
        let err = register(&mut store, reg).unwrap_err();
        assert!(matches!(err, GerenciaError::PasswordMismatch));
        assert!(list(&store).unwrap().users.is_empty());
    }

    #[test]
    fn empty_email_is_rejected() {
        let mut store = store();
        let err = register(&mut store, registration("  ", "p1")).unwrap_err();
        assert!(matches!(err, GerenciaError::InvalidField(_)));
    }

    #[test]
    fn authenticate_matches_email_and_password() {
        let mut store = store();
        register(&mut store, registration("a@x.com", "p1")).unwrap();

        let user = authenticate(&store, "a@x.com", "p1").unwrap();
        assert_eq!(user.email, "a@x.com");

        let wrong_secret = authenticate(&store, "a@x.com", "wrong").unwrap_err();
        assert!(matches!(wrong_secret, GerenciaError::InvalidCredentials));

        let unknown = authenticate(&store, "b@x.com", "p1").unwrap_err();
        assert_eq!(unknown.to_string(), wrong_secret.to_string());
    }

    #[test]
    fn recover_reports_unknown_email() {
        let mut store = store();
        register(&mut store, registration("a@x.com", "p1")).unwrap();

        assert_eq!(recover(&store, "a@x.com").unwrap().users.len(), 1);
        let err = recover(&store, "nobody@x.com").unwrap_err();
        assert!(matches!(err, GerenciaError::NotFound { .. }));
    }

    #[test]
    fn failed_save_leaves_directory_unchanged() {
        let mut store = store();
        register(&mut store, registration("a@x.com", "p1")).unwrap();
        store.backend().set_simulate_write_error(true);
        assert!(register(&mut store, registration("b@x.com", "p1")).is_err());

        store.backend().set_simulate_write_error(false);
        assert_eq!(list(&store).unwrap().users.len(), 1);
    }

    #[test]
    fn read_failure_aborts_registration() {
        let mut store = store();
        register(&mut store, registration("a@x.com", "p1")).unwrap();

        store.backend().set_simulate_read_error(true);
        let err = register(&mut store, registration("a@x.com", "other")).unwrap_err();
        assert!(matches!(err, GerenciaError::Store(_)));

        store.backend().set_simulate_read_error(false);
        let users = list(&store).unwrap().users;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].secret, "p1");
    }
}
