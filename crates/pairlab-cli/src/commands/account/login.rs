//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pairlab_core::traits::{Api, Session};
use pairlab_core::Credentials;
use pairlab_file::FileApi;
use pairlab_http::HttpApi;

use crate::commands::ApiArgs;
use crate::output;
use crate::session::CliSession;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account login
    #[arg(long)]
    pub login: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    #[command(flatten)]
    pub api: ApiArgs,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let api_url = args.api.url()?;
    let credentials = Credentials::new(&args.login, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let session = if api_url.is_local() {
        let api = FileApi::from_url(api_url).context("Failed to open local store")?;
        CliSession::File(api.login(credentials).await.context("Failed to login")?)
    } else {
        let api = HttpApi::new(api_url);
        CliSession::Http(api.login(credentials).await.context("Failed to login")?)
    };

    storage::save_session(&session)
        .await
        .context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("Login", session.login());
    output::field("Role", session.role().name());
    output::field("API", session.api_url().as_str());

    Ok(())
}
