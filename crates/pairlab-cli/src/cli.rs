//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::account::{
    create_account::CreateAccountArgs, login::LoginArgs, logout::LogoutArgs, whoami::WhoamiArgs,
};
use crate::commands::annotators::AnnotatorsCommand;
use crate::commands::datasets::DatasetsCommand;
use crate::commands::tasks::TasksCommand;

/// Administer and annotate text-pair datasets.
#[derive(Parser, Debug)]
#[command(name = "pairlab")]
#[command(author, version = env!("PAIRLAB_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new session (login)
    Login(LoginArgs),

    /// Display the active session
    Whoami(WhoamiArgs),

    /// Forget the active session
    Logout(LogoutArgs),

    /// Create a login account (local store only)
    CreateAccount(CreateAccountArgs),

    /// Dataset administration
    Datasets(DatasetsCommand),

    /// Annotator administration
    Annotators(AnnotatorsCommand),

    /// Annotation tasks of the signed-in annotator
    Tasks(TasksCommand),
}
