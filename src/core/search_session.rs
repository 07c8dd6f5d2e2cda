//! Search-as-you-type with cancellation of superseded requests.
//!
//! Every submitted term starts a new generation. The request of the previous
//! generation is aborted; if it already finished, its result is dropped when it
//! arrives. Only the latest generation can produce a [`SearchUpdate`].

use crate::core::api::Searcher;
use crate::core::error::KotobatenError;
use crate::core::models::SearchResult;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub enum SearchUpdate {
    Results { term: String, result: SearchResult },
    Failed { term: String, error: KotobatenError },
    Cleared,
}

struct Outcome {
    generation: u64,
    update: SearchUpdate,
}

pub struct SearchSession {
    searcher: Arc<dyn Searcher>,
    token: String,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl SearchSession {
    pub fn new(searcher: Arc<dyn Searcher>, token: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            searcher,
            token: token.into(),
            generation: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                log::debug!("Cancelling superseded search (generation {})", self.generation);
            }
            handle.abort();
        }
    }

    /// Replace the current query. An empty term clears the results without a request.
    pub fn submit(&mut self, term: &str) {
        self.cancel_in_flight();
        self.generation += 1;
        let generation = self.generation;
        let term = term.trim().to_string();

        if term.is_empty() {
            let _ = self.tx.send(Outcome {
                generation,
                update: SearchUpdate::Cleared,
            });
            return;
        }

        let searcher = self.searcher.clone();
        let token = self.token.clone();
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let update = match searcher.search(&term, &token).await {
                Ok(result) => SearchUpdate::Results { term, result },
                Err(error) => SearchUpdate::Failed { term, error },
            };
            let _ = tx.send(Outcome { generation, update });
        }));
    }

    /// Wait for the result of the latest submitted term.
    pub async fn next_update(&mut self) -> Option<SearchUpdate> {
        loop {
            let outcome = self.rx.recv().await?;
            if outcome.generation == self.generation {
                return Some(outcome.update);
            }
            log::debug!(
                "Discarding result of superseded search (generation {})",
                outcome.generation
            );
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
