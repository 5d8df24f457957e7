//! Live snapshot streams
//!
//! Writers publish a [`CollectionChanged`] notification after every create or
//! delete. Subscribers turn notifications into Server-Sent Events that carry
//! the full, sorted contents of the collection, so a client never has to
//! apply deltas.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::error::AppResult;

const CHANNEL_CAPACITY: usize = 64;
const KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Which collection a write touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChanged {
    /// Videos or audio tracks
    Media,
    Posts,
}

/// Fan-out of change notifications to every open stream
#[derive(Clone)]
pub struct LiveHub {
    tx: broadcast::Sender<CollectionChanged>,
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Announces a change; having no subscribers is not an error
    pub fn publish(&self, change: CollectionChanged) {
        let receivers = self.tx.send(change).unwrap_or(0);
        tracing::debug!(?change, receivers, "published collection change");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CollectionChanged> {
        self.tx.subscribe()
    }
}

/// Builds an SSE response that re-sends `snapshot()` whenever `watched` changes
///
/// The first event is sent immediately. A lagging subscriber gets a fresh
/// snapshot instead of the missed notifications.
pub fn snapshot_stream<T, F>(
    hub: &LiveHub,
    watched: CollectionChanged,
    snapshot: F,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    T: Serialize,
    F: Fn() -> AppResult<T> + Send + 'static,
{
    let updates = BroadcastStream::new(hub.subscribe()).filter_map(move |msg| match msg {
        Ok(change) if change == watched => Some(()),
        Ok(_) => None,
        // Lagged: some notifications were dropped, resync with a full snapshot.
        Err(_) => Some(()),
    });

    let events = tokio_stream::once(())
        .chain(updates)
        .map(move |()| Ok(snapshot_event(snapshot())));

    Sse::new(events).keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
}

fn snapshot_event<T: Serialize>(result: AppResult<T>) -> Event {
    let event = result.map_err(|err| err.to_string()).and_then(|data| {
        Event::default()
            .event("snapshot")
            .json_data(data)
            .map_err(|err| err.to_string())
    });

    match event {
        Ok(event) => event,
        Err(message) => {
            tracing::error!(error = %message, "snapshot failed");
            Event::default().event("error").data(message)
        }
    }
}
