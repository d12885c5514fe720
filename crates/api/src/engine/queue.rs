//! In-process sequential task queue.
//!
//! [`InMemoryQueue`] is a single-consumer FIFO: tasks are handed to one
//! [`TaskHandler`] strictly one at a time, in enqueue order. A drain task is
//! spawned on demand when work arrives and exits once the queue is empty.
//!
//! The pending list and the `running` flag share one lock, so a task pushed
//! while a drain is finishing is either popped by that drain or starts a new
//! one. At most one drain runs at any instant.
//!
//! A failing or panicking handler is logged and the drain moves on to the
//! next task. Nothing is persisted; pending tasks are lost on exit.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pomelli_core::types::Timestamp;
use tokio::sync::Notify;

/// Error type returned by task handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Processes one queued payload.
#[async_trait]
pub trait TaskHandler<T>: Send + Sync + 'static {
    async fn handle(&self, payload: T) -> Result<(), BoxError>;
}

/// Adapts an async closure into a [`TaskHandler`]. See [`handler_fn`].
pub struct FnHandler<F>(F);

/// Wrap an async closure as a [`TaskHandler`].
///
/// ```ignore
/// let queue = InMemoryQueue::new(handler_fn(|n: u32| async move {
///     tracing::info!(n, "processing");
///     Ok(())
/// }));
/// ```
pub fn handler_fn<T, F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<(), BoxError>>,
{
    FnHandler(f)
}

#[async_trait]
impl<T, F, Fut> TaskHandler<T> for FnHandler<F>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    async fn handle(&self, payload: T) -> Result<(), BoxError> {
        (self.0)(payload).await
    }
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

struct QueueTask<T> {
    id: String,
    payload: T,
    enqueued_at: Timestamp,
}

struct QueueState<T> {
    tasks: VecDeque<QueueTask<T>>,
    /// A drain task is alive and will pick up anything in `tasks`.
    running: bool,
}

struct Inner<T> {
    state: Mutex<QueueState<T>>,
    handler: Arc<dyn TaskHandler<T>>,
    /// Signalled whenever a drain exits.
    idle: Notify,
}

/// Sequential in-memory task queue. Cheap to clone; clones share the queue.
pub struct InMemoryQueue<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for InMemoryQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> InMemoryQueue<T> {
    pub fn new(handler: impl TaskHandler<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState {
                    tasks: VecDeque::new(),
                    running: false,
                }),
                handler: Arc::new(handler),
                idle: Notify::new(),
            }),
        }
    }

    /// Append a task and make sure a drain is running.
    ///
    /// Returns immediately; the handler runs on a spawned Tokio task, so this
    /// must be called from within a Tokio runtime.
    pub fn enqueue(&self, id: impl Into<String>, payload: T) {
        let id = id.into();
        let start_drain = {
            let mut state = self.inner.lock_state();
            state.tasks.push_back(QueueTask {
                id: id.clone(),
                payload,
                enqueued_at: chrono::Utc::now(),
            });
            tracing::debug!(task_id = %id, pending = state.tasks.len(), "Task enqueued");
            !std::mem::replace(&mut state.running, true)
        };

        if start_drain {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(inner.drain());
        }
    }

    /// Number of tasks waiting to run (excluding the one in progress).
    pub fn size(&self) -> usize {
        self.inner.lock_state().tasks.len()
    }

    /// Whether no drain is running (nothing pending, nothing in progress).
    pub fn is_idle(&self) -> bool {
        !self.inner.lock_state().running
    }

    /// Wait until the queue has no pending or running work.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            // Register before checking so a drain exiting in between is seen.
            notified.as_mut().enable();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}

impl<T: Send + 'static> Inner<T> {
    fn lock_state(&self) -> MutexGuard<'_, QueueState<T>> {
        // The lock is never held across a handler call, so a poisoned state
        // is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_task(&self) -> Option<QueueTask<T>> {
        let mut state = self.lock_state();
        let task = state.tasks.pop_front();
        if task.is_none() {
            state.running = false;
        }
        task
    }

    async fn drain(self: Arc<Self>) {
        while let Some(task) = self.next_task() {
            self.run_task(task).await;
        }
        self.idle.notify_waiters();
    }

    async fn run_task(&self, task: QueueTask<T>) {
        let QueueTask {
            id,
            payload,
            enqueued_at,
        } = task;
        let waited_ms = (chrono::Utc::now() - enqueued_at).num_milliseconds();
        tracing::debug!(task_id = %id, waited_ms, "Task started");

        // Run on its own task so a panic is contained to this payload.
        let handler = Arc::clone(&self.handler);
        match tokio::spawn(async move { handler.handle(payload).await }).await {
            Ok(Ok(())) => tracing::debug!(task_id = %id, "Task finished"),
            Ok(Err(e)) => tracing::error!(task_id = %id, error = %e, "Queue task failed"),
            Err(e) => tracing::error!(task_id = %id, error = %e, "Queue task panicked"),
        }
    }
}
