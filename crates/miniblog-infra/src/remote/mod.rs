//! Remote collection adapters.

mod http;
mod memory;

pub use http::HttpPostCollection;
pub use memory::InMemoryPostCollection;
