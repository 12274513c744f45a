//! Annotation commands for the signed-in annotator.

mod annotate;
mod classes;
mod list;
mod show;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub command: TasksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TasksSubcommand {
    /// List assigned tasks with progress
    List(list::ListArgs),

    /// Show one couple of a task
    Show(show::ShowArgs),

    /// List the classes of a task
    Classes(classes::ClassesArgs),

    /// Classify a couple
    Annotate(annotate::AnnotateArgs),
}

pub async fn handle(cmd: TasksCommand) -> Result<()> {
    match cmd.command {
        TasksSubcommand::List(args) => list::run(args).await,
        TasksSubcommand::Show(args) => show::run(args).await,
        TasksSubcommand::Classes(args) => classes::run(args).await,
        TasksSubcommand::Annotate(args) => annotate::run(args).await,
    }
}
