//! Models Module
//!
//! Key and value types crossing the store boundary. Every backend accepts
//! the same tagged shapes and rejects the ones it cannot persist.

mod key;
mod value;

pub use key::CacheKey;
pub use value::{CacheValue, Payload};
