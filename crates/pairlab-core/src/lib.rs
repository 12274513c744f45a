//! pairlab-core - Core types, traits and list views for pairlab.

pub mod credentials;
pub mod error;
pub mod listing;
pub mod model;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use tokens::AuthToken;
pub use traits::{AdminSession, AnnotatorSession, Api, Session};
pub use types::{ApiUrl, Role};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
