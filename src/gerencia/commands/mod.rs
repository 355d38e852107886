//! # Command Layer
//!
//! Business logic for every operation, one module per area:
//!
//! - [`directory`]: user registration, credential checks, recovery lookup
//! - [`session`]: login / restore / logout of the persisted session marker
//! - [`catalog`]: product CRUD and filtering
//! - [`ledger`]: receivable/payable movements
//! - [`reports`]: stock, finance, dashboard and report views over [`crate::stats`]
//! - [`export`]: CSV report file
//! - [`config`]: reading and writing `config.json`
//!
//! Commands operate on a [`RecordStore`](crate::store::RecordStore) and return a
//! [`CmdResult`]: typed payloads plus user-facing messages. They never print.

use crate::config::GerenciaConfig;
use crate::model::{Movement, Product, User};
use crate::stats::{DashboardSnapshot, FinancialSummary, ReportRollup, StockSummary};
use std::path::PathBuf;

pub mod catalog;
pub mod config;
pub mod directory;
pub mod export;
pub mod ledger;
pub mod reports;
pub mod session;

#[derive(Debug, Clone)]
pub struct GerenciaPaths {
    /// Directory holding the store files and `config.json`.
    pub data: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub movements: Vec<Movement>,
    pub stock: Option<StockSummary>,
    pub finance: Option<FinancialSummary>,
    pub dashboard: Option<DashboardSnapshot>,
    pub report: Option<ReportRollup>,
    pub export_path: Option<PathBuf>,
    pub config: Option<GerenciaConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_movements(mut self, movements: Vec<Movement>) -> Self {
        self.movements = movements;
        self
    }

    pub fn with_config(mut self, config: GerenciaConfig) -> Self {
        self.config = Some(config);
        self
    }
}
