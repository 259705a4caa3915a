//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod collection;

pub use collection::PostCollection;
