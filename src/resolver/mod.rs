pub mod client;
pub mod decode;
pub mod errors;
pub mod types;

pub use client::{ResolverClient, get_client};
pub use errors::ResolveError;
pub use types::RawResponse;
