//! ALFA Biometrics - Execution Contexts
//!
//! Where completion callbacks run. The platform replies on an arbitrary
//! thread; the authenticator hops every outcome onto its designated
//! [`Executor`] before invoking the caller.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

/// Unit of work posted to an executor
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling domain accepting work for ordered, later execution
pub trait Executor: Send + Sync {
    /// Post `job`. Jobs dispatched from one thread run in dispatch order.
    fn dispatch(&self, job: Job);
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn dispatch(&self, job: Job) {
        (**self).dispatch(job)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn dispatch(&self, job: Job) {
        (**self).dispatch(job)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERIAL QUEUE
// ═══════════════════════════════════════════════════════════════════════════════

/// FIFO queue drained by one dedicated worker thread
///
/// Plays the role of a main/UI queue for hosts that have none. Dropping the
/// queue closes it; jobs already posted still run before the worker exits.
pub struct SerialQueue {
    sender: Sender<Job>,
    label: String,
}

impl SerialQueue {
    /// Spawn the worker thread
    pub fn new(label: impl Into<String>) -> std::io::Result<Self> {
        let label = label.into();
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();

        thread::Builder::new()
            .name(label.clone())
            .spawn(move || Self::run(receiver))?;

        tracing::debug!("Serial queue '{}' started", label);
        Ok(Self { sender, label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn run(receiver: Receiver<Job>) {
        for job in receiver {
            job();
        }
    }
}

impl Executor for SerialQueue {
    fn dispatch(&self, job: Job) {
        if self.sender.send(job).is_err() {
            tracing::warn!("Serial queue '{}' is closed, job dropped", self.label);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MANUAL QUEUE
// ═══════════════════════════════════════════════════════════════════════════════

/// Buffer drained by the host on its own thread (run-loop pump)
#[derive(Default)]
pub struct ManualQueue {
    jobs: Mutex<VecDeque<Job>>,
}

impl ManualQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs waiting to run
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    /// Run queued jobs on the calling thread, including any they enqueue.
    /// Returns the number of jobs run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Lock released before the job runs so it can dispatch again
            let job = self.jobs.lock().pop_front();
            match job {
                Some(job) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl Executor for ManualQueue {
    fn dispatch(&self, job: Job) {
        self.jobs.lock().push_back(job);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// INLINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Runs each job immediately on the dispatching thread
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn dispatch(&self, job: Job) {
        job();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_serial_queue_runs_in_order_on_worker() {
        let queue = SerialQueue::new("alfa-test-queue").unwrap();
        let (tx, rx) = mpsc::channel();

        for i in 0..10 {
            let tx = tx.clone();
            queue.dispatch(Box::new(move || {
                let name = thread::current().name().map(str::to_owned);
                tx.send((i, name)).unwrap();
            }));
        }

        for i in 0..10 {
            let (n, name) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(n, i);
            assert_eq!(name.as_deref(), Some("alfa-test-queue"));
        }
    }

    #[test]
    fn test_serial_queue_drains_after_drop() {
        let (tx, rx) = mpsc::channel();
        {
            let queue = SerialQueue::new("alfa-drop-queue").unwrap();
            queue.dispatch(Box::new(move || tx.send(7).unwrap()));
        }
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 7);
    }

    #[test]
    fn test_manual_queue_defers_until_pumped() {
        let queue = Arc::new(ManualQueue::new());
        let hits = Arc::new(Mutex::new(Vec::new()));

        let h = hits.clone();
        let q = queue.clone();
        queue.dispatch(Box::new(move || {
            h.lock().push(1);
            let h = h.clone();
            q.dispatch(Box::new(move || h.lock().push(2)));
        }));

        assert_eq!(queue.len(), 1);
        assert!(hits.lock().is_empty());

        assert_eq!(queue.run_pending(), 2);
        assert_eq!(*hits.lock(), vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_inline_runs_immediately() {
        let hit = Arc::new(Mutex::new(false));
        let h = hit.clone();
        InlineExecutor.dispatch(Box::new(move || *h.lock() = true));
        assert!(*hit.lock());
    }
}
