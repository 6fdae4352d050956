//! HTTP handlers for legalease-service.

pub mod analysis;
pub mod chat;
pub mod health;
pub mod reference;
