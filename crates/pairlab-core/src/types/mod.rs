//! Validated pairlab types.
//!
//! These types enforce their invariants at construction time.

mod api_url;
mod role;

pub use api_url::ApiUrl;
pub use role::Role;
