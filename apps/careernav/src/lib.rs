//! CareerNav client core: session data orchestration with a local fallback
//! that emulates the backend when it cannot be reached.

pub mod config;
pub mod envelope;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod recommend;
pub mod scoring;
pub mod session;
pub mod store;

pub use envelope::Envelope;
pub use errors::CoreError;
pub use session::Session;
