//! Async event loop that feeds a [`ListController`] and debounces search.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::controller::{ListController, ListEvent, ListView};
use super::debounce::Debouncer;

/// Run a list until the event channel closes or the view receiver goes away.
///
/// Search-term events wait out the quiet period; any other event applies at
/// once, folding in a pending search term first so only one view is emitted.
/// A pending search is flushed when the event channel closes.
///
/// Returns the controller with its final state.
pub async fn drive<R, C>(
    mut controller: ListController<R, C>,
    mut events: mpsc::Receiver<ListEvent<R, C>>,
    views: mpsc::Sender<ListView<R>>,
    quiet: Duration,
) -> ListController<R, C>
where
    R: Clone,
    C: Copy + Ord,
{
    let mut search = Debouncer::new(quiet);

    loop {
        let view = tokio::select! {
            term = search.ready() => {
                debug!(%term, "Applying debounced search");
                controller.handle(ListEvent::SearchTermChanged(term))
            }
            event = events.recv() => match event {
                Some(ListEvent::SearchTermChanged(term)) => {
                    trace!(%term, "Search input");
                    search.push(term);
                    continue;
                }
                Some(event) => {
                    if let Some(term) = search.cancel() {
                        controller.handle(ListEvent::SearchTermChanged(term));
                    }
                    controller.handle(event)
                }
                None => {
                    if let Some(term) = search.cancel() {
                        let view = controller.handle(ListEvent::SearchTermChanged(term));
                        let _ = views.send(view).await;
                    }
                    break;
                }
            },
        };

        if views.send(view).await.is_err() {
            break;
        }
    }

    controller
}
