//! Interactive list browser driven by line commands.
//!
//! Each input line becomes a list event; search lines go through the
//! debouncer, so typing several in quick succession renders once.

use std::future::Future;

use anyhow::{Context, Result, anyhow};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use pairlab_core::listing::{
    ListController, ListEvent, ListSchema, ListView, PageRequest, SEARCH_DEBOUNCE, SortKey, drive,
};

use crate::output;

const HELP: &str = "search <text> | toggle <flag> | sort original|name|status | \
                    next | prev | page <n> | clear | reload | quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Input<C> {
    Search(String),
    Toggle(C),
    Sort(SortKey),
    Page(PageRequest),
    Clear,
    Reload,
    Help,
    Quit,
}

impl<C> Input<C> {
    /// The list event for inputs the controller handles itself.
    fn into_event<R>(self) -> Option<ListEvent<R, C>> {
        match self {
            Input::Search(term) => Some(ListEvent::SearchTermChanged(term)),
            Input::Toggle(flag) => Some(ListEvent::CategoryFlagToggled(flag)),
            Input::Sort(key) => Some(ListEvent::SortKeyChanged(key)),
            Input::Page(request) => Some(ListEvent::PageChanged(request)),
            Input::Clear => Some(ListEvent::FiltersCleared),
            Input::Reload | Input::Help | Input::Quit => None,
        }
    }
}

/// Parse one line. `parse_flag` resolves category flag names.
pub(crate) fn parse_input<C, E>(
    line: &str,
    parse_flag: impl Fn(&str) -> Result<C, E>,
) -> Result<Input<C>, String>
where
    E: std::fmt::Display,
{
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        // A bare "search" clears the term.
        "search" | "s" | "/" => Ok(Input::Search(rest.to_string())),
        "toggle" | "t" => parse_flag(rest).map(Input::Toggle).map_err(|e| e.to_string()),
        "sort" => rest
            .parse()
            .map(Input::Sort)
            .map_err(|e: pairlab_core::Error| e.to_string()),
        "next" | "n" => Ok(Input::Page(PageRequest::Next)),
        "prev" | "p" => Ok(Input::Page(PageRequest::Previous)),
        "page" => rest
            .parse()
            .map(|n| Input::Page(PageRequest::GoTo(n)))
            .map_err(|_| format!("'{}' is not a page number", rest)),
        "clear" => Ok(Input::Clear),
        "reload" | "r" => Ok(Input::Reload),
        "help" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        "" => Ok(Input::Help),
        other => Err(format!("unknown command '{}' ({})", other, HELP)),
    }
}

async fn load_into<R, C, F, Fut>(events: &mpsc::Sender<ListEvent<R, C>>, load: &F) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = pairlab_core::Result<Vec<R>>>,
{
    let event = match load().await {
        Ok(records) => ListEvent::RecordsLoaded(records),
        Err(e) => {
            output::error(&format!("Load failed: {}", e));
            ListEvent::LoadFailed(e.to_string())
        }
    };
    events
        .send(event)
        .await
        .map_err(|_| anyhow!("list driver stopped"))
}

/// Browse a list with commands read from stdin.
pub async fn run<R, C, F, Fut, P, E>(
    schema: ListSchema<R, C>,
    page_size: usize,
    load: F,
    parse_flag: P,
    render: impl FnMut(&ListView<R>),
) -> Result<()>
where
    R: Clone + Send + 'static,
    C: Copy + Ord + Send + 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = pairlab_core::Result<Vec<R>>>,
    P: Fn(&str) -> Result<C, E>,
    E: std::fmt::Display,
{
    output::note(HELP);
    run_with_input(
        BufReader::new(tokio::io::stdin()),
        schema,
        page_size,
        load,
        parse_flag,
        render,
    )
    .await
}

pub(crate) async fn run_with_input<I, R, C, F, Fut, P, E>(
    input: I,
    schema: ListSchema<R, C>,
    page_size: usize,
    load: F,
    parse_flag: P,
    mut render: impl FnMut(&ListView<R>),
) -> Result<()>
where
    I: AsyncBufRead + Unpin,
    R: Clone + Send + 'static,
    C: Copy + Ord + Send + 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = pairlab_core::Result<Vec<R>>>,
    P: Fn(&str) -> Result<C, E>,
    E: std::fmt::Display,
{
    let (event_tx, event_rx) = mpsc::channel(32);
    let (view_tx, mut view_rx) = mpsc::channel(32);

    let driver = tokio::spawn(drive(
        ListController::new(schema, page_size),
        event_rx,
        view_tx,
        SEARCH_DEBOUNCE,
    ));

    load_into(&event_tx, &load).await?;

    let mut lines = input.lines();
    let mut events = Some(event_tx);

    loop {
        tokio::select! {
            view = view_rx.recv() => match view {
                Some(view) => render(&view),
                None => break,
            },
            line = lines.next_line(), if events.is_some() => {
                let Some(line) = line.context("Failed to read input")? else {
                    // End of input: closing the channel flushes any pending search.
                    events = None;
                    continue;
                };
                let Some(tx) = events.as_ref() else { continue };

                match parse_input(&line, &parse_flag) {
                    Ok(Input::Quit) => events = None,
                    Ok(Input::Reload) => load_into(tx, &load).await?,
                    Ok(Input::Help) => output::note(HELP),
                    Ok(input) => {
                        if let Some(event) = input.into_event() {
                            tx.send(event)
                                .await
                                .map_err(|_| anyhow!("list driver stopped"))?;
                        }
                    }
                    Err(message) => output::error(&message),
                }
            }
        }
    }

    let controller = driver.await.context("List driver failed")?;
    debug!(
        shown = controller.filtered().len(),
        total = controller.records().len(),
        "Browser closed"
    );
    Ok(())
}
