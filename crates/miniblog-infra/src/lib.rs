//! # Miniblog Infra
//!
//! Infrastructure implementations for the miniblog client: the HTTP
//! adapter for the mock collection endpoint, an in-memory fallback, and
//! the auth session with its credential persistence.

pub mod auth;
pub mod remote;
