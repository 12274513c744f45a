//! Login state and local accounts.

pub mod create_account;
pub mod login;
pub mod logout;
pub mod whoami;
