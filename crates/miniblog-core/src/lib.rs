//! # Miniblog Core
//!
//! The domain layer of the miniblog client.
//! This crate contains the post/comment entities, the remote-collection
//! port, and the synchronizing post store — no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod store;

pub use error::{ErrorKind, RemoteError, StoreError};
pub use store::PostStore;
