//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every gerencia operation, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Guards** catalog, ledger and report operations behind an authenticated
//!   [`Session`]
//! - **Returns structured types** (`Result<CmdResult>`, `Result<Session>`)
//!
//! It does no I/O of its own and holds no session state: callers obtain a
//! `Session` from [`GerenciaApi::login`] or [`GerenciaApi::restore_session`]
//! and pass it back in.
//!
//! `GerenciaApi<S: KeyValueStore>` is generic over the storage medium:
//! - Production: `GerenciaApi<FileStore>`
//! - Testing: `GerenciaApi<InMemoryStore>`

use crate::commands;
use crate::config::GerenciaConfig;
use crate::error::{GerenciaError, Result};
use crate::model::{MovementKind, Session};
use crate::store::{KeyValueStore, RecordStore};
use std::path::{Path, PathBuf};

pub struct GerenciaApi<S: KeyValueStore> {
    store: RecordStore<S>,
    paths: commands::GerenciaPaths,
}

impl<S: KeyValueStore> GerenciaApi<S> {
    pub fn new(backend: S, paths: commands::GerenciaPaths) -> Self {
        Self {
            store: RecordStore::new(backend),
            paths,
        }
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn paths(&self) -> &commands::GerenciaPaths {
        &self.paths
    }

    // --- Directory & session ---

    pub fn register(&mut self, registration: Registration) -> Result<CmdResult> {
        commands::directory::register(&mut self.store, registration)
    }

    pub fn recover(&self, email: &str) -> Result<CmdResult> {
        commands::directory::recover(&self.store, email)
    }

    pub fn login(&mut self, email: &str, secret: &str) -> Result<Session> {
        commands::session::login(&mut self.store, email, secret)
    }

    pub fn restore_session(&self) -> Session {
        commands::session::restore(&self.store)
    }

    pub fn logout(&mut self) -> Result<Session> {
        commands::session::logout(&mut self.store)
    }

    // --- Catalog ---

    pub fn create_product(
        &mut self,
        session: &Session,
        name: String,
        price: f64,
        quantity: u32,
    ) -> Result<CmdResult> {
        require_login(session)?;
        commands::catalog::create(&mut self.store, name, price, quantity)
    }

    pub fn update_product(
        &mut self,
        session: &Session,
        id: &str,
        name: String,
        price: f64,
        quantity: u32,
    ) -> Result<CmdResult> {
        require_login(session)?;
        commands::catalog::update(&mut self.store, id, name, price, quantity)
    }

    pub fn delete_product(&mut self, session: &Session, id: &str) -> Result<CmdResult> {
        require_login(session)?;
        commands::catalog::delete(&mut self.store, id)
    }

    pub fn get_product(&self, session: &Session, id: &str) -> Result<CmdResult> {
        require_login(session)?;
        commands::catalog::get(&self.store, id)
    }

    pub fn list_products(&self, session: &Session, filter: Option<&str>) -> Result<CmdResult> {
        require_login(session)?;
        commands::catalog::list(&self.store, filter)
    }

    // --- Ledger ---

    pub fn append_movement(
        &mut self,
        session: &Session,
        description: String,
        amount: f64,
        kind: MovementKind,
    ) -> Result<CmdResult> {
        require_login(session)?;
        commands::ledger::append(&mut self.store, description, amount, kind)
    }

    pub fn delete_movement(&mut self, session: &Session, id: &str) -> Result<CmdResult> {
        require_login(session)?;
        commands::ledger::delete(&mut self.store, id)
    }

    pub fn list_movements(
        &self,
        session: &Session,
        kind: Option<MovementKind>,
    ) -> Result<CmdResult> {
        require_login(session)?;
        commands::ledger::list(&self.store, kind)
    }

    // --- Views ---

    pub fn stock(&self, session: &Session) -> Result<CmdResult> {
        require_login(session)?;
        commands::reports::stock(&self.store)
    }

    pub fn dashboard(&self, session: &Session) -> Result<CmdResult> {
        require_login(session)?;
        commands::reports::dashboard(&self.store)
    }

    /// Report rollup; `preview_len` falls back to the configured default.
    pub fn report(&self, session: &Session, preview_len: Option<usize>) -> Result<CmdResult> {
        require_login(session)?;
        let preview_len = match preview_len {
            Some(len) => len,
            None => self.load_config()?.report_preview,
        };
        commands::reports::report(&self.store, preview_len)
    }

    /// Export the CSV report into `out_dir`, the configured export dir, or
    /// the current directory, in that order.
    pub fn export(&self, session: &Session, out_dir: Option<&Path>) -> Result<CmdResult> {
        require_login(session)?;
        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => self
                .load_config()?
                .export_dir
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        commands::export::run(&self.store, &dir)
    }

    // --- Misc ---

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    fn load_config(&self) -> Result<GerenciaConfig> {
        GerenciaConfig::load(&self.paths.data)
    }
}

fn require_login(session: &Session) -> Result<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(GerenciaError::NotLoggedIn)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::directory::Registration;
pub use crate::commands::{CmdMessage, CmdResult, GerenciaPaths, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn api(dir: &tempfile::TempDir) -> GerenciaApi<InMemoryStore> {
        GerenciaApi::new(
            InMemoryStore::new(),
            GerenciaPaths {
                data: dir.path().to_path_buf(),
            },
        )
    }

    fn signed_up(api: &mut GerenciaApi<InMemoryStore>) -> Session {
        api.register(Registration {
            name: "Ana".into(),
            email: "a@x.com".into(),
            secret: "p1".into(),
            confirmation: "p1".into(),
            ..Default::default()
        })
        .unwrap();
        api.login("a@x.com", "p1").unwrap()
    }

    #[test]
    fn catalog_requires_login() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(&dir);
        let err = api
            .create_product(&Session::Anonymous, "X".into(), 1.0, 1)
            .unwrap_err();
        assert!(matches!(err, GerenciaError::NotLoggedIn));
        assert!(matches!(
            api.dashboard(&Session::Anonymous),
            Err(GerenciaError::NotLoggedIn)
        ));
    }

    #[test]
    fn end_to_end_register_login_and_stock() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(&dir);
        let session = signed_up(&mut api);
        assert_eq!(api.restore_session(), session);

        api.create_product(&session, "Widget".into(), 10.0, 3)
            .unwrap();
        let stock = api.stock(&session).unwrap().stock.unwrap();
        assert_eq!(stock.low_stock_count, 1);
        assert_eq!(stock.total_value, 30.0);

        assert!(matches!(
            api.login("a@x.com", "wrong"),
            Err(GerenciaError::InvalidCredentials)
        ));
    }

    #[test]
    fn report_uses_configured_preview() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(&dir);
        let session = signed_up(&mut api);
        for i in 0..4 {
            api.create_product(&session, format!("P{}", i), 1.0, 1)
                .unwrap();
        }
        api.config(ConfigAction::Set("report-preview".into(), "1".into()))
            .unwrap();

        let rollup = api.report(&session, None).unwrap().report.unwrap();
        assert_eq!(rollup.products.items.len(), 1);
        assert_eq!(rollup.products.remaining, 3);

        let explicit = api.report(&session, Some(10)).unwrap().report.unwrap();
        assert_eq!(explicit.products.remaining, 0);
    }

    #[test]
    fn export_defaults_to_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(&dir);
        let session = signed_up(&mut api);
        let out = dir.path().join("out");
        api.config(ConfigAction::Set(
            "export-dir".into(),
            out.display().to_string(),
        ))
        .unwrap();

        let result = api.export(&session, None).unwrap();
        assert!(result.export_path.unwrap().starts_with(&out));
    }

    #[test]
    fn logout_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(&dir);
        signed_up(&mut api);
        let session = api.logout().unwrap();
        assert_eq!(session, Session::Anonymous);
        assert_eq!(api.restore_session(), Session::Anonymous);
    }
}
