//! Browser sessions: identifiers, the cookie middleware, and preference
//! storage.

pub mod cookie;
pub mod id;
pub mod store;

pub use cookie::{SESSION_COOKIE, session_middleware};
pub use id::SessionId;
pub use store::{MemorySessionStore, SessionStore, sweep_expired};
