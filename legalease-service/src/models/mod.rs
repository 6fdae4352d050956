//! Domain models for the LegalEase service.

pub mod session;

pub use session::{Role, SessionId, Turn};
