//! # Scrivener
//!
//! An admin backend for Markdown blogs, usable both as a standalone binary
//! and as a library. Posts live as frontmatter + body files inside a static
//! site generator's content directory; scrivener authenticates a single
//! administrator and exposes CRUD over those files, triggering a site
//! rebuild after each mutation in production.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! scrivener = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scrivener::config::AppConfig;
//! use scrivener::server::{AppState, create_router};
//! use scrivener::store::{SqliteStore, Store};
//!
//! let config = AppConfig::default();
//! let store = SqliteStore::new(config.db_path()).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), config));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the binary's CLI dependencies. Disable with
//!   `default-features = false` for library use.

pub mod auth;
pub mod config;
pub mod error;
pub mod posts;
pub mod server;
pub mod store;
pub mod types;
