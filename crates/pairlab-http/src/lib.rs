//! pairlab-http - REST-backed implementation of the pairlab traits.

mod api;
mod client;
pub mod endpoints;
mod session;

pub use api::HttpApi;
pub use client::HttpClient;
pub use session::HttpSession;
