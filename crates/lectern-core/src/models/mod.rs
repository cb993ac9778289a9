//! Data models for the upload pipeline
//!
//! Wire types mirror the backend contract exactly: camelCase field names on
//! every request and response body.

mod owner;
mod upload;

// Re-export all models for convenient imports
pub use owner::*;
pub use upload::*;
