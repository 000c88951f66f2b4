//! # tagnotes
//!
//! Personal note-taking web application. Notes carry free-text content
//! and any number of tags; the note list is filtered and sorted by
//! search and sort preferences held per browser session.
//!
//! ## Architecture
//!
//! ```text
//! Browser (HTML forms, session cookie)
//!     │
//!     ├── Session middleware (session/)
//!     ├── Route handlers (api/) ── HTML pages (views/)
//!     │
//!     ├── NotebookService (service/)     SessionStore (session/)
//!     │
//!     ├── Note / Tag / TagNote repositories (persistence/)
//!     │
//!     └── SQLite
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod session;
pub mod views;
