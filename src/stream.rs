//! Result Stream
//!
//! Closable, thread-safe sequence of result atoms. One producer appends and then closes
//! exactly once; any number of readers walk the sequence with their own cursor. A reader
//! that runs past the last element waits until the producer appends or closes. After the
//! close every read past the end returns end-of-sequence immediately.

use crate::error::StreamError;
use crate::types::NodeId;
use futures::Stream;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct StreamState {
    items: Vec<NodeId>,
    closed: bool,
}

#[derive(Default)]
struct Shared {
    state: Mutex<StreamState>,
    /// Wakes blocked readers
    ready: Condvar,
    /// Wakes async readers
    notify: Notify,
}

impl Shared {
    fn wake_all(&self) {
        self.ready.notify_all();
        self.notify.notify_waiters();
    }
}

/// Outcome of a non-blocking read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryNext {
    Item(NodeId),
    /// Nothing past the cursor yet, stream still open
    Pending,
    /// Stream closed and fully read
    Closed,
}

/// Handle to a result stream. Clones share the same sequence.
#[derive(Clone, Default)]
pub struct ResultStream {
    shared: Arc<Shared>,
}

impl fmt::Debug for ResultStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ResultStream")
            .field("len", &state.items.len())
            .field("closed", &state.closed)
            .finish()
    }
}

impl ResultStream {
    /// Create an empty, open stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one atom. Appending to a closed stream is a protocol violation.
    pub fn push(&self, atom: NodeId) -> Result<(), StreamError> {
        {
            let mut state = self.shared.state.lock();
            if state.closed {
                return Err(StreamError::PushAfterClose(atom));
            }
            state.items.push(atom);
        }
        self.shared.wake_all();
        Ok(())
    }

    /// Close the stream. Must happen exactly once.
    pub fn close(&self) -> Result<(), StreamError> {
        {
            let mut state = self.shared.state.lock();
            if state.closed {
                return Err(StreamError::AlreadyClosed);
            }
            state.closed = true;
        }
        self.shared.wake_all();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Number of atoms appended so far
    pub fn len(&self) -> usize {
        self.shared.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the atoms appended so far
    pub fn snapshot(&self) -> Vec<NodeId> {
        self.shared.state.lock().items.clone()
    }

    /// A new reader positioned at the start of the sequence
    pub fn reader(&self) -> StreamReader {
        StreamReader {
            stream: self.clone(),
            cursor: 0,
        }
    }
}

/// Cursor over a [`ResultStream`]
///
/// Blocking reads go through [`Iterator`], async reads through [`StreamReader::recv`].
#[derive(Debug, Clone)]
pub struct StreamReader {
    stream: ResultStream,
    cursor: usize,
}

impl StreamReader {
    pub fn try_next(&mut self) -> TryNext {
        let shared = Arc::clone(&self.stream.shared);
        let state = shared.state.lock();
        self.advance(&state)
    }

    fn advance(&mut self, state: &StreamState) -> TryNext {
        if let Some(atom) = state.items.get(self.cursor) {
            self.cursor += 1;
            TryNext::Item(*atom)
        } else if state.closed {
            TryNext::Closed
        } else {
            TryNext::Pending
        }
    }

    /// Wait for the next atom without blocking the thread.
    pub async fn recv(&mut self) -> Option<NodeId> {
        let shared = Arc::clone(&self.stream.shared);
        loop {
            // Register before checking state so a push between the check and the
            // await is not missed.
            let notified = shared.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.try_next() {
                TryNext::Item(atom) => return Some(atom),
                TryNext::Closed => return None,
                TryNext::Pending => notified.await,
            }
        }
    }

    /// Adapt this reader into a [`futures::Stream`].
    pub fn into_stream(self) -> impl Stream<Item = NodeId> + Send {
        futures::stream::unfold(self, |mut reader| async move {
            reader.recv().await.map(|atom| (atom, reader))
        })
    }
}

impl Iterator for StreamReader {
    type Item = NodeId;

    /// Blocks the calling thread while the stream is open and drained.
    fn next(&mut self) -> Option<NodeId> {
        let shared = Arc::clone(&self.stream.shared);
        let mut state = shared.state.lock();
        loop {
            match self.advance(&state) {
                TryNext::Item(atom) => return Some(atom),
                TryNext::Closed => return None,
                TryNext::Pending => shared.ready.wait(&mut state),
            }
        }
    }
}
