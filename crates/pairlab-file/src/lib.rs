//! pairlab-file - Filesystem-backed annotation API.

mod api;
mod records;
mod session;
mod store;

pub use api::FileApi;
pub use session::FileSession;
pub use store::{FileStore, LocalAccount};
