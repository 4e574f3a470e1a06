//! Background computations that can be polled without blocking

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// The state of a [`Task`] as seen by its owner
#[derive(Debug, PartialEq)]
pub enum TaskStatus<T> {
    Pending,
    Done(T),
    /// The task ended without a result (it panicked)
    Lost,
}

/// A computation running on its own thread
///
/// Dropping a `Task` detaches the thread; whatever it eventually returns is
/// discarded.
pub struct Task<T> {
    receiver: Receiver<T>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Task<T> {
    /// Starts `work` on a new thread called `name`
    pub fn spawn<F>(name: &str, work: F) -> std::io::Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = channel();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                // the receiver is gone if the task was abandoned
                let _ = tx.send(work());
            })?;

        Ok(Self {
            receiver: rx,
            handle: Some(handle),
        })
    }

    /// Checks for a result without blocking
    ///
    /// Once `Done` or `Lost` has been returned, later calls return `Lost`.
    pub fn poll(&mut self) -> TaskStatus<T> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.reap();
                TaskStatus::Done(result)
            }
            Err(TryRecvError::Empty) => TaskStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                self.reap();
                TaskStatus::Lost
            }
        }
    }

    /// Waits at most `timeout` for the result
    ///
    /// Returns `None` if the task did not finish in time, in which case the
    /// thread is detached.
    pub fn join(mut self, timeout: Duration) -> Option<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => {
                self.reap();
                Some(result)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.reap();
                None
            }
        }
    }

    // the thread has sent (or dropped) its result, so this join is immediate
    fn reap(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
