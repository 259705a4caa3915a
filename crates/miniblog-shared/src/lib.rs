//! # Miniblog Shared
//!
//! Wire types of the mock-server auth protocol, shared between the
//! adapters and the application.

pub mod dto;

pub use dto::{AuthResponse, LoginRequest, RegisterRequest, SessionUser};
