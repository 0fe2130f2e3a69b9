//! Session registry for the MCP Streamable HTTP transport
//!
//! Sessions are created when a client POSTs `initialize` without a
//! session header and removed by DELETE. Each session carries at most
//! one live SSE stream; the slot is released when the stream drops.

use axum::response::sse::Event;
use chrono::{DateTime, Utc};
use futures::Stream;
use std::collections::HashMap;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Channel depth for server-to-client SSE events
const STREAM_BUFFER: usize = 16;

#[derive(Debug)]
struct Session {
    created_at: DateTime<Utc>,
    /// Sender half of the live SSE stream, when one is open. Nothing
    /// is pushed through it today; dropping it ends the stream, which
    /// is how DELETE terminates an open GET.
    stream: Option<mpsc::Sender<Event>>,
}

/// Why a stream could not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    SessionNotFound,
    StreamAlreadyOpen,
}

/// Registry of live MCP sessions
///
/// Cheap to clone; all clones share the same map. Lock sections are
/// short and never cross an await point.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and return its id
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session {
            created_at: Utc::now(),
            stream: None,
        };

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), session);

        info!(session_id = %id, "Session created");
        id
    }

    /// True when the id refers to a live session
    pub fn contains(&self, id: &str) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Number of live sessions
    pub fn count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Remove a session, ending any live stream
    ///
    /// Returns false when the id is unknown.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);

        match removed {
            Some(session) => {
                let age_secs = (Utc::now() - session.created_at).num_seconds();
                info!(session_id = %id, age_secs, "Session terminated");
                true
            }
            None => false,
        }
    }

    /// Open the session's SSE stream
    ///
    /// At most one live stream per session; the returned stream ends
    /// when the session is removed and releases its slot on drop.
    pub fn open_stream(&self, id: &str) -> Result<SessionStream, StreamError> {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let session = sessions.get_mut(id).ok_or(StreamError::SessionNotFound)?;
        if matches!(&session.stream, Some(tx) if !tx.is_closed()) {
            return Err(StreamError::StreamAlreadyOpen);
        }

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        session.stream = Some(tx);
        debug!(session_id = %id, "SSE stream opened");

        Ok(SessionStream {
            rx,
            _guard: StreamGuard {
                sessions: Arc::clone(&self.sessions),
                id: id.to_string(),
            },
        })
    }
}

/// Server-to-client event stream for one session
///
/// Yields whatever the session's sender pushes and ends when the
/// sender is dropped (session removal).
#[derive(Debug)]
pub struct SessionStream {
    rx: mpsc::Receiver<Event>,
    _guard: StreamGuard,
}

impl Stream for SessionStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx).map(|event| event.map(Ok))
    }
}

/// Releases the session's stream slot when the stream drops
#[derive(Debug)]
struct StreamGuard {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    id: String,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(session) = sessions.get_mut(&self.id) {
            session.stream = None;
            debug!(session_id = %self.id, "SSE stream released");
        }
    }
}
