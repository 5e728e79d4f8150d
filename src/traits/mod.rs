//! Core traits for the service container.

mod dispose;
mod resolve;

pub use dispose::Dispose;
pub use resolve::{Resolve, Resolver};
