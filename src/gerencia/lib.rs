//! # Gerencia Architecture
//!
//! Gerencia is a small business-management library: users sign up and log in,
//! then keep a product catalog and a ledger of receivables and payables, and
//! read aggregated views (stock status, balances, reports) over them. The CLI
//! shipped with the crate is one client of the library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Initializes logging                                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Checks the caller's Session                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + Aggregations (stats.rs)    │
//! │  - Read-modify-write of whole collections                   │
//! │  - Pure statistics over loaded snapshots                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait: FileStore, InMemoryStore            │
//! │  - RecordStore: typed, lenient collections                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; the binary decides where
//! they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`stats`]: Stock, financial and report aggregations
//! - [`store`]: Key-value storage and typed collections
//! - [`model`]: Core data types (`User`, `Product`, `Movement`, `Session`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod stats;
pub mod store;
