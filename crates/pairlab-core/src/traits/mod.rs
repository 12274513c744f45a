//! Core traits for API backends and sessions.

mod admin;
mod annotator;
mod api;
mod session;

pub use admin::AdminSession;
pub use annotator::AnnotatorSession;
pub use api::Api;
pub use session::Session;
