pub mod auth;
pub mod comments;
pub mod error;
pub mod flash;
pub mod guard;
pub mod pages;
pub mod posts;
pub mod routes;
pub mod sanitize;
pub mod session;
pub mod views;

use std::sync::Arc;

use quill_db::Database;

use crate::session::{Passwords, Sessions};

pub type AppState = Arc<AppStateInner>;

/// Services shared by every handler. Constructed once in `main` and passed
/// in through axum state; nothing here is a process-wide global.
pub struct AppStateInner {
    pub db: Database,
    pub sessions: Sessions,
    pub passwords: Passwords,
    /// The privileged identity with blanket edit/delete rights over posts.
    /// By convention the first registered account (row id 1).
    pub admin_id: i64,
}
