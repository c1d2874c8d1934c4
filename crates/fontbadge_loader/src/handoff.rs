//! Worker pool and home-thread handoff
//!
//! Acquisition work runs on a shared blocking pool. Its result is posted to
//! the [`AsyncHandoff`] of the thread that asked for it, and the matching
//! `on_ready` callback runs there when that thread pumps its queue.
//! Callbacks stay on the home thread, so they may capture `Rc`/`Weak`
//! handles to the component that scheduled them.

use crate::error::{LoadError, Result};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::AssertUnwindSafe;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Shared pool of worker threads for background acquisition
#[derive(Clone)]
pub struct WorkerPool {
    runtime: Arc<tokio::runtime::Runtime>,
}

static GLOBAL_WORKERS: OnceLock<WorkerPool> = OnceLock::new();

impl WorkerPool {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("fontbadge-worker")
            .enable_time()
            .build()
            .map_err(|e| LoadError::Runtime(e.to_string()))?;
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }

    /// The process-wide pool, created on first use.
    ///
    /// Panics if the runtime cannot be built at all.
    pub fn global() -> &'static WorkerPool {
        GLOBAL_WORKERS.get_or_init(|| {
            WorkerPool::new().unwrap_or_else(|e| panic!("failed to start fontbadge workers: {e}"))
        })
    }

    /// Run blocking work on the pool without waiting for it
    pub fn spawn<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        drop(self.runtime.spawn_blocking(work));
    }
}

struct Delivery {
    id: u64,
    /// `Err` carries the panic message when the work panicked
    payload: std::result::Result<Box<dyn Any + Send>, String>,
}

type ReadyCallback = Box<dyn FnOnce(std::result::Result<Box<dyn Any + Send>, String>)>;

/// Home-thread side of the handoff.
///
/// Not `Send`: create one per home thread and pump it from that thread with
/// [`dispatch_pending`](Self::dispatch_pending) or
/// [`wait_and_dispatch`](Self::wait_and_dispatch).
pub struct AsyncHandoff {
    workers: WorkerPool,
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
    pending: RefCell<FxHashMap<u64, ReadyCallback>>,
    next_id: Cell<u64>,
}

impl AsyncHandoff {
    pub fn new(workers: WorkerPool) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            workers,
            tx,
            rx,
            pending: RefCell::new(FxHashMap::default()),
            next_id: Cell::new(0),
        }
    }

    pub fn workers(&self) -> &WorkerPool {
        &self.workers
    }

    /// Run `work` on the pool; once it has returned, `on_ready` receives its
    /// result on this thread, exactly once, during a later dispatch.
    ///
    /// A panic in `work` still notifies: `on_ready` gets
    /// [`LoadError::WorkerPanicked`] instead of a value.
    ///
    /// Returns immediately. There is no cancellation: if the receiver of
    /// `on_ready` has gone away in the meantime it is up to the callback to
    /// notice (e.g. a failed `Weak::upgrade`).
    pub fn run_then_notify<T, W, R>(&self, work: W, on_ready: R)
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        R: FnOnce(Result<T>) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let callback: ReadyCallback = Box::new(move |payload| match payload {
            Ok(value) => match value.downcast::<T>() {
                Ok(value) => on_ready(Ok(*value)),
                Err(_) => tracing::error!("handoff {} delivered an unexpected payload type", id),
            },
            Err(message) => on_ready(Err(LoadError::WorkerPanicked(message))),
        });
        self.pending.borrow_mut().insert(id, callback);

        let tx = self.tx.clone();
        self.workers.spawn(move || {
            let payload = match std::panic::catch_unwind(AssertUnwindSafe(work)) {
                Ok(value) => Ok(Box::new(value) as Box<dyn Any + Send>),
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!("handoff {} work panicked: {}", id, message);
                    Err(message)
                }
            };
            // The home side may already be gone
            let _ = tx.send(Delivery { id, payload });
        });
    }

    /// Number of notifications not yet delivered
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Deliver every notification that has already arrived. Never blocks.
    pub fn dispatch_pending(&self) -> usize {
        let mut delivered = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            delivered += self.deliver(delivery);
        }
        delivered
    }

    /// Block until at least one notification arrives or `timeout` passes,
    /// then deliver everything available.
    pub fn wait_and_dispatch(&self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(delivery) => self.deliver(delivery) + self.dispatch_pending(),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Keep dispatching until nothing is pending or `timeout` passes.
    /// Returns `true` when everything was delivered.
    pub fn run_until_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending() > 0 {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.wait_and_dispatch(deadline - now);
        }
        true
    }

    fn deliver(&self, delivery: Delivery) -> usize {
        // Release the borrow before running the callback; it may schedule more work
        let callback = self.pending.borrow_mut().remove(&delivery.id);
        match callback {
            Some(callback) => {
                callback(delivery.payload);
                1
            }
            None => 0,
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
