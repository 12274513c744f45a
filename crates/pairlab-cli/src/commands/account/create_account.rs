//! Create account command implementation.
//!
//! Accounts can only be created in a local `file://` store. The annotation
//! server manages its own accounts.

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use pairlab_core::Role;
use pairlab_file::FileApi;

use crate::commands::ApiArgs;
use crate::output;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
    Admin,
    User,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::User => Role::User,
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateAccountArgs {
    /// Login for the new account
    pub login: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Account role
    #[arg(long, value_enum, default_value = "user")]
    pub role: RoleArg,

    #[command(flatten)]
    pub api: ApiArgs,
}

pub async fn run(args: CreateAccountArgs) -> Result<()> {
    let api_url = args.api.url()?;

    if !api_url.is_local() {
        bail!(
            "Accounts on the annotation server are managed by the server.\n\
             For local work, use a file:// URL (e.g., --api file:///tmp/pairlab)"
        );
    }

    let api = FileApi::from_url(api_url.clone()).context("Failed to open local store")?;
    let account = api
        .create_account(&args.login, &args.password, args.role.into())
        .await
        .context("Failed to create account")?;

    output::field("Login", &account.login);
    output::field("Role", account.role.name());
    output::field("API", api_url.as_str());
    output::success("Account created successfully");

    Ok(())
}
